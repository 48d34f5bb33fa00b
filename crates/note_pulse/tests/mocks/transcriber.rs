use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use note_pulse::{TranscribeResponse, Transcriber};

#[derive(Clone)]
pub struct MockTranscriber {
    pub response_text: String,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_on_call: Option<usize>,
}

impl MockTranscriber {
    pub fn new(response_text: &str) -> Self {
        Self {
            response_text: response_text.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on_call: None,
        }
    }

    /// Fails the nth call, 1-indexed; earlier calls succeed.
    pub fn failing_on_call(response_text: &str, call: usize) -> Self {
        Self {
            response_text: response_text.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on_call: Some(call),
        }
    }
}

impl Transcriber for MockTranscriber {
    const TRANSCRIBER_MODEL: &'static str = "mock-whisper";

    type Error = anyhow::Error;

    async fn transcribe(&self, chunk_path: &Path) -> Result<TranscribeResponse, Self::Error> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(chunk_path.to_path_buf());
            calls.len()
        };

        if self.fail_on_call == Some(call) {
            anyhow::bail!("mock transcription failure on call {call}");
        }

        Ok(TranscribeResponse {
            text: format!("{} {call}", self.response_text),
        })
    }
}
