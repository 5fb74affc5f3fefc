use super::state::AppState;
use crate::catalog::Language;
use crate::error::SessionError;
use crate::session::{InputMode, Session, SessionConfig, SessionSnapshot};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    /// Initial source language (default: en-US)
    pub source_language: Option<String>,

    /// Initial target language (default: es-ES)
    pub target_language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: InputMode,
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct SetTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CloseSessionResponse {
    pub session_id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions
/// Create a new translation session
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    let defaults = SessionConfig::default();
    let session_id = req.session_id.unwrap_or(defaults.session_id);
    let source_language = req.source_language.unwrap_or(defaults.source_language);
    let target_language = req.target_language.unwrap_or(defaults.target_language);

    for code in [&source_language, &target_language] {
        if !state.catalog.contains(code) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown language code: {}", code),
                }),
            )
                .into_response();
        }
    }

    {
        let sessions = state.sessions.read().await;
        if sessions.contains_key(&session_id) {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Session {} already exists", session_id),
                }),
            )
                .into_response();
        }
    }

    let config = SessionConfig {
        session_id: session_id.clone(),
        source_language,
        target_language,
    };

    let session = match state.build_session(config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to create session: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create session: {}", e),
                }),
            )
                .into_response();
        }
    };

    let snapshot = session.snapshot().await;

    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id.clone(), session);
    }

    info!("Session created: {}", session_id);
    (StatusCode::OK, Json(snapshot)).into_response()
}

/// DELETE /sessions/:session_id
/// Destroy a session; capture is stopped and playback cancelled
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match session {
        Some(session) => {
            session.shutdown().await;
            info!("Session closed: {}", session_id);
            (
                StatusCode::OK,
                Json(CloseSessionResponse {
                    session_id,
                    status: "closed".to_string(),
                }),
            )
                .into_response()
        }
        None => not_found(&session_id),
    }
}

/// GET /sessions/:session_id
/// Current session snapshot, including control enablement
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match lookup(&state, &session_id).await {
        Some(session) => ok_snapshot(session.snapshot().await),
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/mode
pub async fn set_input_mode(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SetModeRequest>,
) -> impl IntoResponse {
    match lookup(&state, &session_id).await {
        Some(session) => ok_snapshot(session.set_input_mode(req.mode).await),
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/source-language
pub async fn set_source_language(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SetLanguageRequest>,
) -> impl IntoResponse {
    match lookup(&state, &session_id).await {
        Some(session) => language_result(session.set_source_language(&req.code).await),
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/target-language
pub async fn set_target_language(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SetLanguageRequest>,
) -> impl IntoResponse {
    match lookup(&state, &session_id).await {
        Some(session) => language_result(session.set_target_language(&req.code).await),
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/text
/// Replace the manual text buffer (Text mode)
pub async fn set_text_input(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SetTextRequest>,
) -> impl IntoResponse {
    match lookup(&state, &session_id).await {
        Some(session) => ok_snapshot(session.set_text_input(req.text).await),
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/capture/toggle
pub async fn toggle_capture(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match lookup(&state, &session_id).await {
        Some(session) => ok_snapshot(session.toggle_capture().await),
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/translate
pub async fn request_translate(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match lookup(&state, &session_id).await {
        Some(session) => ok_snapshot(session.request_translate().await),
        None => not_found(&session_id),
    }
}

/// POST /sessions/:session_id/playback/toggle
pub async fn toggle_playback(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match lookup(&state, &session_id).await {
        Some(session) => ok_snapshot(session.toggle_playback().await),
        None => not_found(&session_id),
    }
}

/// GET /languages
/// The supported-language catalog, in display order
pub async fn list_languages(State(state): State<AppState>) -> impl IntoResponse {
    let languages: Vec<Language> = state.catalog.languages().to_vec();
    (StatusCode::OK, Json(languages)).into_response()
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ============================================================================
// Helpers
// ============================================================================

async fn lookup(state: &AppState, session_id: &str) -> Option<Arc<Session>> {
    let sessions = state.sessions.read().await;
    sessions.get(session_id).cloned()
}

fn ok_snapshot(snapshot: SessionSnapshot) -> axum::response::Response {
    (StatusCode::OK, Json(snapshot)).into_response()
}

fn language_result(
    result: Result<SessionSnapshot, SessionError>,
) -> axum::response::Response {
    match result {
        Ok(snapshot) => ok_snapshot(snapshot),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

fn not_found(session_id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Session {} not found", session_id),
        }),
    )
        .into_response()
}
