//! Scripted playback backend for demos and tests
//!
//! In manual mode events are injected through a [`ScriptedPlaybackHandle`].
//! With `auto_complete` enabled each utterance emits `Started` immediately
//! and `Ended` after a short delay, so demos hear a plausible lifecycle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use super::backend::{PlaybackBackend, PlaybackError, PlaybackEvent};

const EVENT_BUFFER: usize = 8;

#[derive(Debug)]
struct Shared {
    auto_complete: Option<Duration>,
    active: Mutex<Option<mpsc::Sender<PlaybackEvent>>>,
    speaks: AtomicUsize,
    cancels: AtomicUsize,
    utterances: Mutex<Vec<(String, String)>>,
}

/// Playback backend driven by test or demo code
pub struct ScriptedPlayback {
    shared: Arc<Shared>,
}

impl ScriptedPlayback {
    /// Manual mode: the handle injects every event
    pub fn new() -> Self {
        Self::with_auto_complete(None)
    }

    /// Auto mode: each utterance starts immediately and ends after `delay`
    pub fn auto_complete(delay: Duration) -> Self {
        Self::with_auto_complete(Some(delay))
    }

    fn with_auto_complete(auto_complete: Option<Duration>) -> Self {
        Self {
            shared: Arc::new(Shared {
                auto_complete,
                active: Mutex::new(None),
                speaks: AtomicUsize::new(0),
                cancels: AtomicUsize::new(0),
                utterances: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Handle for injecting events and inspecting backend activity
    pub fn handle(&self) -> ScriptedPlaybackHandle {
        ScriptedPlaybackHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Default for ScriptedPlayback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PlaybackBackend for ScriptedPlayback {
    async fn speak(
        &self,
        text: &str,
        language: &str,
    ) -> Result<mpsc::Receiver<PlaybackEvent>, PlaybackError> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        {
            let mut active = self.shared.active.lock().unwrap();
            *active = Some(tx.clone());
        }
        {
            let mut utterances = self.shared.utterances.lock().unwrap();
            utterances.push((text.to_string(), language.to_string()));
        }
        self.shared.speaks.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.shared.auto_complete {
            tokio::spawn(async move {
                if tx.send(PlaybackEvent::Started).await.is_err() {
                    return;
                }
                tokio::time::sleep(delay).await;
                let _ = tx.send(PlaybackEvent::Ended).await;
            });
        }

        Ok(rx)
    }

    async fn cancel(&self) {
        self.shared.cancels.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Inspection and event-injection handle for a [`ScriptedPlayback`]
#[derive(Clone)]
pub struct ScriptedPlaybackHandle {
    shared: Arc<Shared>,
}

impl ScriptedPlaybackHandle {
    /// Inject an event into the most recent utterance's stream
    pub async fn emit(&self, event: PlaybackEvent) -> bool {
        let tx = {
            let active = self.shared.active.lock().unwrap();
            active.clone()
        };
        match tx {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }

    /// Number of `speak` calls observed
    pub fn speaks(&self) -> usize {
        self.shared.speaks.load(Ordering::SeqCst)
    }

    /// Number of `cancel` calls observed
    pub fn cancels(&self) -> usize {
        self.shared.cancels.load(Ordering::SeqCst)
    }

    /// (text, language) pairs passed to `speak`, in call order
    pub fn utterances(&self) -> Vec<(String, String)> {
        self.shared.utterances.lock().unwrap().clone()
    }
}
