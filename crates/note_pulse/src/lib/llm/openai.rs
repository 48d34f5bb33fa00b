use std::{path::Path, time::Duration};

use reqwest::Client;
use serde::Deserialize;

use crate::{FormattedNote, NotesFormatter, TranscribeResponse, Transcriber};

/// OpenAI-backed implementation of both service seams. Credentials are
/// injected here by the caller; nothing reads ambient process state.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl OpenAIClient {
    const SYSTEM_PROMPT: &str = include_str!("./prompts/system_0.txt");

    /// Per-request deadline. A hung service call fails the run instead of
    /// blocking it forever.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_transcribe_request(
        &self,
        file: impl AsRef<Path>,
        model_name: impl Into<String>,
    ) -> Result<TranscribeResponse, OpenAIError> {
        let audio_path = file.as_ref();

        let bytes = tokio::fs::read(audio_path).await?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("chunk.wav")
            .mime_str("audio/wav")
            .unwrap();

        let form = reqwest::multipart::Form::new()
            .text("model", model_name.into())
            .text("response_format", "json")
            .part("file", part);

        let resp = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .timeout(Self::REQUEST_TIMEOUT)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        let response = resp.json::<TranscribeResponse>().await?;

        Ok(response)
    }

    pub async fn send_completion_request(
        &self,
        model_name: impl Into<String>,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, OpenAIError> {
        let body = serde_json::json!({
            "model": model_name.into(),
            "messages": [
                {
                    "role": "system",
                    "content": Self::SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ],
            "temperature": 0.7
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(Self::REQUEST_TIMEOUT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl Transcriber for OpenAIClient {
    const TRANSCRIBER_MODEL: &'static str = "whisper-1";

    type Error = OpenAIError;

    async fn transcribe(&self, chunk_path: &Path) -> Result<TranscribeResponse, Self::Error> {
        self.send_transcribe_request(chunk_path, Self::TRANSCRIBER_MODEL)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to transcribe audio chunk"))
    }
}

impl NotesFormatter for OpenAIClient {
    const FORMATTER_MODEL: &'static str = "gpt-4";

    type Error = OpenAIError;

    async fn format_notes(&self, segment: &str) -> Result<FormattedNote, Self::Error> {
        let prompt = format!(
            "You are a note-taking assistant. Format the following text into study notes with bullet points, headings, and subheadings:\n\n{segment}"
        );

        let response = self
            .send_completion_request(Self::FORMATTER_MODEL, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to format transcript segment"))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| OpenAIError::Api {
                status: 0,
                message: "No content in response".into(),
            })?;

        Ok(FormattedNote { content })
    }
}
