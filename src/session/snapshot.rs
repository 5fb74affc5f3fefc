use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::{CaptureState, InputMode, PlaybackState, TranslationState};
use crate::error::SessionError;

/// Point-in-time view of a session, as served to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    pub input_mode: InputMode,
    pub source_language: String,
    pub target_language: String,

    /// Recognized speech so far (Voice mode)
    pub transcript: String,

    /// Manual input buffer (Text mode)
    pub text_input: String,

    /// Last successful translation, or empty
    pub translation: String,

    pub capture_state: CaptureState,
    pub translation_state: TranslationState,
    pub playback_state: PlaybackState,

    pub last_error: Option<SessionError>,

    /// Which user controls are currently actionable
    pub controls: Controls,
}

/// Enabled/disabled state of each user-facing control, mirroring the
/// session state exactly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Controls {
    /// Start/stop capture: Voice mode with a capture capability present
    pub capture_toggle: bool,

    /// Translate: source text non-empty and no request already in flight
    pub translate: bool,

    /// Speak/stop speaking: a translation exists
    pub playback_toggle: bool,
}
