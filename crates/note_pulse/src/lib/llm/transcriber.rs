use std::{fmt::Debug, future::Future, path::Path};

use serde::Deserialize;

/// Speech-to-text service boundary. Implementations are handed one audio
/// chunk at a time, strictly in chunk order.
pub trait Transcriber {
    const TRANSCRIBER_MODEL: &'static str;

    type Error: Debug;

    fn transcribe(
        &self,
        chunk_path: &Path,
    ) -> impl Future<Output = Result<TranscribeResponse, Self::Error>> + Send;
}

/// The service contract only guarantees an object that may carry a `text`
/// field; an absent field is an empty transcription, not an error.
#[derive(Debug, Deserialize)]
pub struct TranscribeResponse {
    #[serde(default)]
    pub text: String,
}
