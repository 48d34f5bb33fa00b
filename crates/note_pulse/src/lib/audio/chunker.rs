use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavWriter};

use crate::error::ChunkingError;

pub const DEFAULT_CHUNK_DURATION_SEC: u16 = 300;

/// Splits `wav_path` into sequential chunks of at most `chunk_duration_sec`
/// seconds, written to `chunks_dir` as `chunk_1.wav`, `chunk_2.wav`, ...
///
/// Chunks carry the source spec unchanged and never overlap; the final
/// chunk holds whatever frames remain and is not padded. Returns the chunk
/// paths in order.
#[tracing::instrument(skip_all, fields(wav = %wav_path.display()))]
pub fn split_wav(
    wav_path: &Path,
    chunks_dir: &Path,
    chunk_duration_sec: u16,
) -> Result<Vec<PathBuf>, ChunkingError> {
    if chunk_duration_sec == 0 {
        return Err(ChunkingError::InvalidChunkDuration);
    }

    let mut reader = WavReader::open(wav_path)?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(ChunkingError::UnsupportedFormat {
            bits_per_sample: spec.bits_per_sample,
            sample_format: spec.sample_format,
        });
    }

    let total_frames = u64::from(reader.duration());
    let chunk_frames = u64::from(chunk_duration_sec) * u64::from(spec.sample_rate);
    let chunk_count = total_frames.div_ceil(chunk_frames) as usize;
    let samples_per_chunk = chunk_frames * u64::from(spec.channels);

    std::fs::create_dir_all(chunks_dir)?;

    let mut chunk_paths = Vec::with_capacity(chunk_count);
    let mut samples = reader.samples::<i16>();

    for index in 1..=chunk_count {
        let chunk_path = chunks_dir.join(format!("chunk_{index}.wav"));
        let mut writer = WavWriter::create(&chunk_path, spec)?;

        // wave-style sequential cursor: the last chunk reads whatever is left
        for _ in 0..samples_per_chunk {
            match samples.next() {
                Some(sample) => writer.write_sample(sample?)?,
                None => break,
            }
        }

        writer.finalize()?;
        tracing::debug!(chunk = index, path = %chunk_path.display(), "Saved audio chunk");
        chunk_paths.push(chunk_path);
    }

    Ok(chunk_paths)
}
