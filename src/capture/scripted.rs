//! Scripted capture backend for demos and tests
//!
//! Stands in for a platform recognizer: events are injected through a
//! [`ScriptedCaptureHandle`] instead of coming from a microphone. Late event
//! delivery after `stop()` is possible on purpose, because real recognizers
//! do exactly that and the controller has to cope.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::backend::{CaptureBackend, CaptureError, CaptureEvent, EndReason};

const EVENT_BUFFER: usize = 32;

#[derive(Debug)]
struct Shared {
    supported: bool,
    permission_granted: bool,
    /// Sender side of the most recently started stream. Not cleared on
    /// `stop()` so a stale provider event can still be injected.
    active: Mutex<Option<mpsc::Sender<CaptureEvent>>>,
    starts: AtomicUsize,
    stops: AtomicUsize,
    languages: Mutex<Vec<String>>,
}

/// Capture backend driven by test or demo code
pub struct ScriptedCapture {
    shared: Arc<Shared>,
}

impl ScriptedCapture {
    /// A supported backend with permission granted
    pub fn new() -> Self {
        Self::with_flags(true, true)
    }

    /// A backend whose permission probe always denies
    pub fn denying() -> Self {
        Self::with_flags(true, false)
    }

    /// A backend reporting no capture capability at all
    pub fn unsupported() -> Self {
        Self::with_flags(false, true)
    }

    fn with_flags(supported: bool, permission_granted: bool) -> Self {
        Self {
            shared: Arc::new(Shared {
                supported,
                permission_granted,
                active: Mutex::new(None),
                starts: AtomicUsize::new(0),
                stops: AtomicUsize::new(0),
                languages: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Handle for injecting events and inspecting backend activity
    pub fn handle(&self) -> ScriptedCaptureHandle {
        ScriptedCaptureHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Default for ScriptedCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CaptureBackend for ScriptedCapture {
    async fn request_permission(&self) -> Result<(), CaptureError> {
        if !self.shared.supported {
            return Err(CaptureError::Unsupported);
        }
        if !self.shared.permission_granted {
            return Err(CaptureError::PermissionDenied);
        }
        Ok(())
    }

    async fn start(&self, language: &str) -> Result<mpsc::Receiver<CaptureEvent>, CaptureError> {
        if !self.shared.supported {
            return Err(CaptureError::Unsupported);
        }

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        {
            let mut active = self.shared.active.lock().unwrap();
            *active = Some(tx);
        }
        {
            let mut languages = self.shared.languages.lock().unwrap();
            languages.push(language.to_string());
        }
        self.shared.starts.fetch_add(1, Ordering::SeqCst);

        Ok(rx)
    }

    async fn stop(&self) {
        self.shared.stops.fetch_add(1, Ordering::SeqCst);

        // Real recognizers fire a final end report after stop; deliver one so
        // callers see the same lifecycle
        let tx = {
            let active = self.shared.active.lock().unwrap();
            active.clone()
        };
        if let Some(tx) = tx {
            let _ = tx.send(CaptureEvent::Ended(EndReason::Stopped)).await;
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Inspection and event-injection handle for a [`ScriptedCapture`]
#[derive(Clone)]
pub struct ScriptedCaptureHandle {
    shared: Arc<Shared>,
}

impl ScriptedCaptureHandle {
    /// Inject an event into the most recently started stream
    ///
    /// Returns false if no stream was ever started or the receiver is gone.
    pub async fn emit(&self, event: CaptureEvent) -> bool {
        let tx = {
            let active = self.shared.active.lock().unwrap();
            active.clone()
        };
        match tx {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }

    /// Number of `start` calls observed
    pub fn starts(&self) -> usize {
        self.shared.starts.load(Ordering::SeqCst)
    }

    /// Number of `stop` calls observed
    pub fn stops(&self) -> usize {
        self.shared.stops.load(Ordering::SeqCst)
    }

    /// Languages passed to `start`, in call order
    pub fn languages(&self) -> Vec<String> {
        self.shared.languages.lock().unwrap().clone()
    }
}
