//! Voice-translation session management
//!
//! This module provides the `Session` controller that coordinates:
//! - Continuous speech capture (with permission handling and auto-restart)
//! - Text translation (with stale-response defense and fallback degradation)
//! - Speech synthesis (one utterance at a time)
//! - Session state, error surfacing, and control enablement

mod config;
mod session;
mod snapshot;
mod state;

pub use config::SessionConfig;
pub use session::Session;
pub use snapshot::{Controls, SessionSnapshot};
pub use state::{CaptureState, InputMode, PlaybackState, TranslationState};
