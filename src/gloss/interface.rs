use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Body accepted by `/api/convert` and forwarded to the gloss service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
}

#[derive(Debug, Error)]
pub enum GlossError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("gloss service returned status {0}")]
    Status(u16),

    #[error("invalid JSON from gloss service: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Sentence to sign-language gloss conversion
#[async_trait]
pub trait GlossInterface: Send + Sync {
    /// Convert `sentence`, returning the service's JSON unmodified
    async fn convert(&self, sentence: &str) -> Result<Value, GlossError>;
}
