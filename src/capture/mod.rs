pub mod backend;
pub mod scripted;

pub use backend::{CaptureBackend, CaptureError, CaptureErrorKind, CaptureEvent, EndReason};
pub use scripted::{ScriptedCapture, ScriptedCaptureHandle};
