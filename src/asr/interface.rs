//! ASR interface - transcription is delegated to a remote speech-to-text API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ASRResponse {
    pub text: String,
}

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("failed to stage audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("transcription API returned status {status}: {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait ASRInterface: Send + Sync {
    /// Transcribe the audio file at `path`. The caller owns the file.
    async fn transcribe_file(&self, path: &Path) -> Result<ASRResponse, TranscriptionError>;
}
