use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::interface::{GlossError, GlossInterface};

/// Client for the remote gloss conversion service
#[derive(Debug, Clone)]
pub struct GlossServiceClient {
    client: Client,
    endpoint: String,
}

impl GlossServiceClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl GlossInterface for GlossServiceClient {
    async fn convert(&self, sentence: &str) -> Result<Value, GlossError> {
        debug!("Forwarding sentence to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "sentence": sentence }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GlossError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let result: Value = serde_json::from_slice(&body)?;
        Ok(result)
    }
}
