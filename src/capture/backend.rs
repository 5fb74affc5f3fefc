use tokio::sync::mpsc;

/// Why a capture stream ended on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Silence timeout from the recognizer
    SilenceTimeout,
    /// Transient provider-side termination
    ProviderHiccup,
    /// The adapter's own `stop()` took effect
    Stopped,
}

/// Capture-side error kinds, mirroring what continuous recognizers report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureErrorKind {
    /// Microphone access refused by the user or platform
    NotAllowed,
    /// Recognizer heard nothing; recoverable via restart
    NoSpeech,
    /// Stream aborted by the provider; recoverable via restart
    Aborted,
    /// Anything else transient
    Other,
}

impl CaptureErrorKind {
    /// Transient kinds are absorbed by the controller's restart policy
    pub fn is_transient(self) -> bool {
        !matches!(self, CaptureErrorKind::NotAllowed)
    }
}

/// Events pushed by an active capture stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Cumulative transcript so far (not a delta); each report replaces the
    /// previous one wholesale
    Partial(String),
    /// The stream terminated
    Ended(EndReason),
    Error(CaptureErrorKind),
}

/// Failure starting (or probing) a capture backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// No capture capability on this platform; rejectable synchronously
    #[error("speech capture unsupported on this platform")]
    Unsupported,

    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("capture backend failed to start: {0}")]
    Failed(String),
}

/// Continuous speech-to-text backend
///
/// Implementations own the microphone exclusively; callers must await `stop`
/// before issuing another `start` so two streams are never active at once.
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Check or request microphone permission
    ///
    /// `Err(PermissionDenied)` means the user refused; `Err(Unsupported)`
    /// means there is nothing to ask permission for.
    async fn request_permission(&self) -> Result<(), CaptureError>;

    /// Start recognizing speech in the given language
    ///
    /// Returns a channel receiver of capture events. The stream may terminate
    /// spontaneously (silence timeout, provider hiccup); restarting is the
    /// caller's policy, not the backend's.
    async fn start(&self, language: &str) -> Result<mpsc::Receiver<CaptureEvent>, CaptureError>;

    /// Stop the active stream, if any. Takes effect before returning.
    async fn stop(&self);

    /// Backend name for logging
    fn name(&self) -> &str;
}
