use serde::{Deserialize, Serialize};

/// Failures from the translation gateway
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum TranslateError {
    /// Could not reach the translation service at all
    #[error("translation service unreachable: {0}")]
    Network(String),

    /// The service answered, but with a 5xx or an unusable body
    #[error("translation service error: {0}")]
    Service(String),

    /// Service-level quota or rate limit; retryable later, not immediately
    #[error("translation quota exceeded")]
    QuotaExceeded,
}

/// Errors surfaced to the session's `last_error`
///
/// No variant is fatal: the session stays interactive after any of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum SessionError {
    /// Microphone access was refused
    #[error("microphone permission denied")]
    Permission,

    /// The platform offers no speech capture capability
    #[error("speech capture is not supported on this platform")]
    CaptureUnsupported,

    /// Invalid language selection
    #[error("unknown language code: {0}")]
    Configuration(String),

    #[error("translation failed: {0}")]
    Translation(#[from] TranslateError),

    #[error("playback failed: {0}")]
    Playback(String),
}
