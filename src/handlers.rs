use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::asr::{ASRResponse, TempAudioFile, TranscriptionError};
use crate::error::ApiError;
use crate::gloss::ConversionRequest;
use crate::state::AppState;

/// Multipart field carrying the uploaded clip
pub const AUDIO_FIELD: &str = "audio";

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn convert_gloss(
    State(state): State<AppState>,
    payload: Result<Json<ConversionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let sentence = payload
        .ok()
        .and_then(|Json(request)| request.sentence)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            warn!("Gloss conversion request without a sentence");
            ApiError::InvalidInput("No sentence provided")
        })?;

    let result = state.gloss.convert(&sentence).await.map_err(|e| {
        error!("Gloss conversion error: {}", e);
        ApiError::UpstreamFailure(e.to_string())
    })?;

    Ok(Json(result))
}

pub async fn transcribe_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ASRResponse>, ApiError> {
    let audio = match multipart {
        Ok(multipart) => read_audio_field(multipart).await,
        Err(rejection) => {
            warn!("Rejected transcription upload: {}", rejection);
            None
        }
    }
    .ok_or(ApiError::InvalidInput("No audio file provided"))?;

    info!("Received {} bytes of audio for transcription", audio.len());

    let result = transcribe_upload(&state, &audio).await.map_err(|e| {
        error!("Transcription error: {}", e);
        ApiError::TranscriptionFailure(e.to_string())
    })?;

    Ok(Json(result))
}

/// First `audio` file part in the upload, if any. Plain text fields are skipped.
async fn read_audio_field(mut multipart: Multipart) -> Option<Bytes> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field))
                if field.name() == Some(AUDIO_FIELD) && field.file_name().is_some() =>
            {
                return match field.bytes().await {
                    Ok(data) => Some(data),
                    Err(e) => {
                        warn!("Failed to read audio field: {}", e);
                        None
                    }
                };
            }
            Ok(Some(_)) => continue,
            Ok(None) => return None,
            Err(e) => {
                warn!("Malformed multipart upload: {}", e);
                return None;
            }
        }
    }
}

async fn transcribe_upload(
    state: &AppState,
    audio: &[u8],
) -> Result<ASRResponse, TranscriptionError> {
    let temp_file = TempAudioFile::create(
        &state.config.system_config.temp_dir(),
        &state.config.transcription_config.file_extension,
        audio,
    )
    .await?;

    let result = state.asr.transcribe_file(temp_file.path()).await;
    drop(temp_file);
    result
}
