pub mod chunker;
pub mod extractor;

pub use chunker::{split_wav, DEFAULT_CHUNK_DURATION_SEC};
pub use extractor::{extract_audio, TARGET_BITS_PER_SAMPLE, TARGET_CHANNELS, TARGET_SAMPLE_RATE};
