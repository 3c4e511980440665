use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use super::interface::{ASRInterface, ASRResponse, TranscriptionError};
use crate::config::TranscriptionConfig;

/// OpenAI-compatible `/audio/transcriptions` client
pub struct OpenAITranscriber {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAITranscriber {
    pub fn new(config: &TranscriptionConfig) -> Self {
        info!(
            "Initialized OpenAITranscriber: model={}, base_url={}",
            config.model, config.base_url
        );
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl ASRInterface for OpenAITranscriber {
    async fn transcribe_file(&self, path: &Path) -> Result<ASRResponse, TranscriptionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TranscriptionError::MissingApiKey)?;

        let file = tokio::fs::File::open(path).await?;
        let length = file.metadata().await?.len();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.webm")
            .to_string();
        let mime = audio_mime_type(path);

        let file_part = Part::stream_with_length(file, length)
            .file_name(file_name)
            .mime_str(mime)?;
        let form = Form::new()
            .part("file", file_part)
            .text("model", self.model.clone());

        let url = format!("{}/audio/transcriptions", self.base_url);
        debug!("Sending {} bytes to {} (model={})", length, url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let result: ASRResponse = response.json().await?;
        Ok(result)
    }
}

fn audio_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "webm" => "audio/webm",
        "wav" => "audio/wav",
        "mp3" | "mpga" | "mpeg" => "audio/mpeg",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// Pull `error.message` out of an OpenAI-style error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}
