mod asr;
mod config;
mod error;
mod gloss;
mod handlers;
mod routes;
mod state;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gloss_relay=debug,tower_http=debug")),
        )
        .init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    let config = Config::resolve()?;
    if config.transcription_config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; /api/transcribe requests will fail");
    }

    let system_config = config.system_config.clone();
    info!(
        "Relaying gloss requests to {}",
        config.gloss_config.endpoint
    );

    // Initialize app state
    let app_state = AppState::new(config);
    let app = routes::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind((system_config.host.as_str(), system_config.port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind {}:{}",
                system_config.host, system_config.port
            )
        })?;
    info!(
        "Server running at http://localhost:{}",
        listener.local_addr()?.port()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
