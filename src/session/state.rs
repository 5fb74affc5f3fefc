use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// How source text enters the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    Voice,
    Text,
}

/// Capture side of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    Idle,
    RequestingPermission,
    Listening,
    /// Microphone access refused; the user can retry
    Denied,
    /// No capture capability on this platform
    Unsupported,
}

/// Translation side of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Playback side of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Speaking,
}

/// The session's single mutable aggregate
///
/// Owned exclusively by the controller behind one async mutex; every adapter
/// report is reconciled against it and discarded when its generation or
/// sequence number no longer matches.
#[derive(Debug)]
pub(crate) struct SessionState {
    pub input_mode: InputMode,
    pub source_language: String,
    pub target_language: String,
    /// Cumulative recognized text; rebuilt wholesale from every capture report
    pub transcript: String,
    /// Manual buffer used in Text mode
    pub text_input: String,
    /// Last successful translation, or empty
    pub translation: String,
    pub capture: CaptureState,
    pub translation_state: TranslationState,
    pub playback: PlaybackState,
    /// Newest error wins; cleared by the next successful user action
    pub last_error: Option<SessionError>,
    /// Desired capture state; only a user stop request clears it. Kept
    /// separate from adapter-reported state so a late termination report
    /// cannot resurrect a stopped capture.
    pub want_listening: bool,
    /// Bumped on every capture start/stop; events from older streams are stale
    pub capture_gen: u64,
    /// Highest issued translation request number; only its response may land
    pub translate_seq: u64,
    /// Bumped on every speak/cancel; events from older utterances are stale
    pub playback_gen: u64,
    pub closed: bool,
}

impl SessionState {
    pub fn new(source_language: String, target_language: String) -> Self {
        Self {
            input_mode: InputMode::Voice,
            source_language,
            target_language,
            transcript: String::new(),
            text_input: String::new(),
            translation: String::new(),
            capture: CaptureState::Idle,
            translation_state: TranslationState::Idle,
            playback: PlaybackState::Idle,
            last_error: None,
            want_listening: false,
            capture_gen: 0,
            translate_seq: 0,
            playback_gen: 0,
            closed: false,
        }
    }

    /// Source text for translation under the current input mode
    pub fn source_text(&self) -> &str {
        match self.input_mode {
            InputMode::Voice => &self.transcript,
            InputMode::Text => &self.text_input,
        }
    }
}
