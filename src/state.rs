use std::sync::Arc;

use crate::asr::{ASRInterface, OpenAITranscriber};
use crate::config::Config;
use crate::gloss::{GlossInterface, GlossServiceClient};

/// Shared, read-only handler dependencies
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gloss: Arc<dyn GlossInterface>,
    pub asr: Arc<dyn ASRInterface>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gloss = Arc::new(GlossServiceClient::new(config.gloss_config.endpoint.clone()));
        let asr = Arc::new(OpenAITranscriber::new(&config.transcription_config));

        Self::with_services(config, gloss, asr)
    }

    pub fn with_services(
        config: Config,
        gloss: Arc<dyn GlossInterface>,
        asr: Arc<dyn ASRInterface>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            gloss,
            asr,
        }
    }
}
