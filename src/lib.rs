pub mod capture;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod playback;
pub mod session;
pub mod translate;

pub use capture::{CaptureBackend, CaptureError, CaptureErrorKind, CaptureEvent, EndReason};
pub use catalog::{base_subtag, Language, LanguageCatalog};
pub use config::Config;
pub use error::{SessionError, TranslateError};
pub use http::{create_router, AppState};
pub use playback::{PlaybackBackend, PlaybackError, PlaybackEvent};
pub use session::{
    CaptureState, Controls, InputMode, PlaybackState, Session, SessionConfig, SessionSnapshot,
    TranslationState,
};
pub use translate::{FallbackTranslator, RemoteTranslator, TranslationGateway, Translator};
