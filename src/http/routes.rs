use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Language catalog
        .route("/languages", get(handlers::list_languages))
        // Session lifecycle
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/:session_id", get(handlers::get_session))
        .route("/sessions/:session_id", delete(handlers::close_session))
        // Session controls
        .route("/sessions/:session_id/mode", post(handlers::set_input_mode))
        .route(
            "/sessions/:session_id/source-language",
            post(handlers::set_source_language),
        )
        .route(
            "/sessions/:session_id/target-language",
            post(handlers::set_target_language),
        )
        .route("/sessions/:session_id/text", post(handlers::set_text_input))
        .route(
            "/sessions/:session_id/capture/toggle",
            post(handlers::toggle_capture),
        )
        .route(
            "/sessions/:session_id/translate",
            post(handlers::request_translate),
        )
        .route(
            "/sessions/:session_id/playback/toggle",
            post(handlers::toggle_playback),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
