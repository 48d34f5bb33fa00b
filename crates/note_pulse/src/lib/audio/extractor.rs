use std::{
    fs::File,
    io::BufWriter,
    path::Path,
};

use hound::{SampleFormat, WavSpec, WavWriter};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use symphonia::core::{
    audio::SampleBuffer,
    codecs::{DecoderOptions, CODEC_TYPE_NULL},
    errors::Error as SymphoniaError,
    formats::FormatOptions,
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};

use crate::error::ExtractionError;

pub const TARGET_SAMPLE_RATE: u32 = 16_000;
pub const TARGET_CHANNELS: u16 = 1;
pub const TARGET_BITS_PER_SAMPLE: u16 = 16;

/// Input block size fed to the resampler.
const RESAMPLE_BLOCK: usize = 1024;

/// Demuxes the first audio stream of `media_path`, decodes it in stream
/// order and writes a mono 16-bit 16 kHz PCM WAV to `output_wav`.
///
/// Multi-channel sources are downmixed by per-frame averaging. Sources
/// already at the target rate bypass the resampler entirely.
#[tracing::instrument(skip_all, fields(media = %media_path.display()))]
pub fn extract_audio(media_path: &Path, output_wav: &Path) -> Result<(), ExtractionError> {
    let file = File::open(media_path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = media_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(ExtractionError::Probe)?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| ExtractionError::NoAudioStream {
            path: media_path.to_path_buf(),
        })?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(ExtractionError::Decode)?;

    let spec = WavSpec {
        channels: TARGET_CHANNELS,
        sample_rate: TARGET_SAMPLE_RATE,
        bits_per_sample: TARGET_BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(output_wav, spec)?;

    // Source rate is only trusted once the first frame has decoded, so the
    // resampler is built lazily.
    let mut resampler: Option<SincFixedIn<f32>> = None;
    let mut src_rate: Option<u32> = None;
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut pending: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(ExtractionError::Decode(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                // recoverable per the symphonia contract
                tracing::warn!(error = %e, "Skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(ExtractionError::Decode(e)),
        };

        let frame_spec = *decoded.spec();
        if src_rate.is_none() {
            src_rate = Some(frame_spec.rate);
            if frame_spec.rate != TARGET_SAMPLE_RATE {
                resampler = Some(build_resampler(frame_spec.rate)?);
            }
            tracing::debug!(
                rate = frame_spec.rate,
                channels = frame_spec.channels.count(),
                "Decoding audio stream"
            );
        }

        let buf = sample_buf
            .get_or_insert_with(|| SampleBuffer::new(decoded.capacity() as u64, frame_spec));
        buf.copy_interleaved_ref(decoded);

        let channels = frame_spec.channels.count();
        for frame in buf.samples().chunks_exact(channels) {
            pending.push(frame.iter().sum::<f32>() / channels as f32);
        }

        match resampler.as_mut() {
            Some(resampler) => {
                while pending.len() >= RESAMPLE_BLOCK {
                    let block: Vec<f32> = pending.drain(..RESAMPLE_BLOCK).collect();
                    let out = resampler
                        .process(&[block], None)
                        .map_err(|e| ExtractionError::Resample(e.to_string()))?;
                    write_frames(&mut writer, &out[0])?;
                }
            }
            None => {
                write_frames(&mut writer, &pending)?;
                pending.clear();
            }
        }
    }

    // Drain the resampler tail; the final block is shorter than the fixed
    // input size.
    if let Some(mut resampler) = resampler {
        if !pending.is_empty() {
            let out = resampler
                .process_partial(Some(&[pending.as_slice()]), None)
                .map_err(|e| ExtractionError::Resample(e.to_string()))?;
            write_frames(&mut writer, &out[0])?;
        }
        let out = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| ExtractionError::Resample(e.to_string()))?;
        write_frames(&mut writer, &out[0])?;
    }

    writer.finalize()?;
    Ok(())
}

fn build_resampler(src_rate: u32) -> Result<SincFixedIn<f32>, ExtractionError> {
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    SincFixedIn::new(
        f64::from(TARGET_SAMPLE_RATE) / f64::from(src_rate),
        2.0,
        params,
        RESAMPLE_BLOCK,
        1,
    )
    .map_err(|e| ExtractionError::Resample(e.to_string()))
}

fn write_frames(
    writer: &mut WavWriter<BufWriter<File>>,
    samples: &[f32],
) -> Result<(), hound::Error> {
    for &sample in samples {
        let value = (sample * 32768.0).clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16;
        writer.write_sample(value)?;
    }
    Ok(())
}
