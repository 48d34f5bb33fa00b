use std::path::PathBuf;

/// Stage 1 failure: the source container could not be decoded into the
/// intermediate PCM artifact.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no audio stream in {}", path.display())]
    NoAudioStream { path: PathBuf },
    #[error("failed to probe media container: {0}")]
    Probe(#[source] symphonia::core::errors::Error),
    #[error("failed to decode audio stream: {0}")]
    Decode(#[source] symphonia::core::errors::Error),
    #[error("audio stream does not declare a sample rate")]
    UnknownSampleRate,
    #[error("resampler error: {0}")]
    Resample(String),
    #[error("failed to write wav: {0}")]
    Wav(#[from] hound::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stage 2 failure: the intermediate WAV could not be split into chunks.
#[derive(Debug, thiserror::Error)]
pub enum ChunkingError {
    #[error("chunk duration must be greater than zero")]
    InvalidChunkDuration,
    #[error("unsupported wav format: expected 16-bit int samples, got {bits_per_sample}-bit {sample_format:?}")]
    UnsupportedFormat {
        bits_per_sample: u16,
        sample_format: hound::SampleFormat,
    },
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stage 3 failure. Transcript lines already flushed to disk are kept.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription service error: {0}")]
    Service(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stage 4/5 failure. No notes file is written on failure.
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    #[error("chat completion service error: {0}")]
    Service(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Chunking(#[from] ChunkingError),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Formatting(#[from] FormattingError),
    #[error("pipeline io error: {0}")]
    Io(#[from] std::io::Error),
}
