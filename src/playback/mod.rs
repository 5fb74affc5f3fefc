pub mod backend;
pub mod scripted;

pub use backend::{PlaybackBackend, PlaybackError, PlaybackEvent};
pub use scripted::{ScriptedPlayback, ScriptedPlaybackHandle};
