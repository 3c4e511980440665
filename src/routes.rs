use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::debug;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let system_config = &state.config.system_config;

    // Static file serving, minus dotfiles and config files
    let static_files = Router::new()
        .fallback_service(ServeDir::new(&system_config.static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), hide_private_files));

    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))
        // Relay endpoints
        .route("/api/convert", post(handlers::convert_gloss))
        .route("/api/transcribe", post(handlers::transcribe_audio))
        .layer(DefaultBodyLimit::max(system_config.max_upload_bytes))
        .merge(static_files)
}

/// Full application: routes, CORS for any origin and request tracing
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn hide_private_files(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if is_private_path(request.uri().path(), &state.config.private_file_names()) {
        debug!("Refusing to serve private file {}", request.uri().path());
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(request).await
}

/// Any hidden segment, or a final segment naming a config file.
/// Segments are percent-decoded first, as `ServeDir` does.
fn is_private_path(path: &str, private_names: &[String]) -> bool {
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            urlencoding::decode(s)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| s.to_string())
        })
        .collect();

    if segments.iter().any(|s| s.starts_with('.')) {
        return true;
    }

    segments
        .last()
        .is_some_and(|last| private_names.iter().any(|name| name.eq_ignore_ascii_case(last)))
}
