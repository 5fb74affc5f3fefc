use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::capture::{CaptureBackend, ScriptedCapture};
use crate::catalog::LanguageCatalog;
use crate::config::{AdapterConfig, TranslationConfig};
use crate::playback::{PlaybackBackend, ScriptedPlayback};
use crate::session::{Session, SessionConfig};
use crate::translate::{RemoteTranslator, TranslationGateway};

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active translation sessions (session_id → session)
    pub sessions: Arc<RwLock<HashMap<String, Arc<Session>>>>,

    pub catalog: LanguageCatalog,

    translation_endpoint: Option<String>,
    translation_timeout: Duration,
    adapters: AdapterConfig,
}

impl AppState {
    pub fn new(translation: &TranslationConfig, adapters: AdapterConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            catalog: LanguageCatalog::default_catalog(),
            translation_endpoint: translation.endpoint.clone(),
            translation_timeout: Duration::from_secs(translation.timeout_secs),
            adapters,
        }
    }

    /// Build a session with its own adapters and translation gateway
    ///
    /// The gateway is per-session on purpose: its remote-availability probe
    /// is cached for the session's lifetime.
    pub fn build_session(&self, config: SessionConfig) -> Result<Session> {
        let capture: Arc<dyn CaptureBackend> = match self.adapters.capture.as_str() {
            "unsupported" => Arc::new(ScriptedCapture::unsupported()),
            _ => Arc::new(ScriptedCapture::new()),
        };

        let playback: Arc<dyn PlaybackBackend> = Arc::new(ScriptedPlayback::auto_complete(
            Duration::from_millis(self.adapters.playback_utterance_ms),
        ));

        let remote = match &self.translation_endpoint {
            Some(endpoint) => Some(RemoteTranslator::new(endpoint, self.translation_timeout)?),
            None => None,
        };
        let gateway = Arc::new(TranslationGateway::new(remote));

        Ok(Session::new(
            config,
            self.catalog.clone(),
            capture,
            playback,
            gateway,
        ))
    }
}
