use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use super::config::SessionConfig;
use super::snapshot::{Controls, SessionSnapshot};
use super::state::{CaptureState, InputMode, PlaybackState, SessionState, TranslationState};
use crate::capture::{CaptureBackend, CaptureError, CaptureErrorKind, CaptureEvent};
use crate::catalog::LanguageCatalog;
use crate::error::SessionError;
use crate::playback::{PlaybackBackend, PlaybackEvent};
use crate::translate::Translator;

/// A voice-translation session
///
/// Coordinates speech capture, translation, and speech synthesis into one
/// stateful aggregate. All adapter reports funnel through reconciliation
/// methods that check the report against the current capture/playback
/// generation or translation sequence number and drop anything stale.
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    created_at: DateTime<Utc>,
    catalog: LanguageCatalog,
    capture: Arc<dyn CaptureBackend>,
    playback: Arc<dyn PlaybackBackend>,
    translator: Arc<dyn Translator>,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        catalog: LanguageCatalog,
        capture: Arc<dyn CaptureBackend>,
        playback: Arc<dyn PlaybackBackend>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        info!("Creating translation session: {}", config.session_id);

        let state = SessionState::new(
            config.source_language.clone(),
            config.target_language.clone(),
        );

        Self {
            inner: Arc::new(SessionInner {
                config,
                created_at: Utc::now(),
                catalog,
                capture,
                playback,
                translator,
                state: Mutex::new(state),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.config.session_id
    }

    /// Current session state, including control enablement
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.state.lock().await;
        self.inner.snapshot_locked(&state)
    }

    /// Switch between Voice and Text input
    ///
    /// Leaving Voice while listening stops capture first. Idempotent when the
    /// mode is unchanged; always clears `last_error`.
    pub async fn set_input_mode(&self, mode: InputMode) -> SessionSnapshot {
        let mut state = self.inner.state.lock().await;
        if state.closed {
            return self.inner.snapshot_locked(&state);
        }

        state.last_error = None;
        if state.input_mode == mode {
            return self.inner.snapshot_locked(&state);
        }

        if state.input_mode == InputMode::Voice {
            match state.capture {
                CaptureState::Listening => {
                    self.inner.stop_capture_locked(&mut state).await;
                }
                CaptureState::RequestingPermission => {
                    // Invalidate the outstanding permission probe
                    state.capture = CaptureState::Idle;
                    state.capture_gen += 1;
                }
                _ => {}
            }
        }

        state.input_mode = mode;
        state.transcript.clear();
        info!("Input mode set to {:?}", mode);

        self.inner.snapshot_locked(&state)
    }

    /// Replace the manual text buffer used in Text mode
    pub async fn set_text_input(&self, text: String) -> SessionSnapshot {
        let mut state = self.inner.state.lock().await;
        if !state.closed {
            state.text_input = text;
            state.last_error = None;
        }
        self.inner.snapshot_locked(&state)
    }

    /// Change the source language
    ///
    /// Invalid codes are rejected and the prior value is retained. If capture
    /// is active it is retargeted to the new language in place: stopped and
    /// re-armed under the state lock, so from the caller's perspective the
    /// session never leaves Listening and no transcript is lost.
    pub async fn set_source_language(&self, code: &str) -> Result<SessionSnapshot, SessionError> {
        let mut state = self.inner.state.lock().await;
        if state.closed {
            return Ok(self.inner.snapshot_locked(&state));
        }

        if !self.inner.catalog.contains(code) {
            let err = SessionError::Configuration(code.to_string());
            state.last_error = Some(err.clone());
            return Err(err);
        }

        state.last_error = None;
        state.source_language = code.to_string();

        if state.capture == CaptureState::Listening && state.want_listening {
            state.capture_gen += 1;
            self.inner.capture.stop().await;

            let gen = state.capture_gen;
            match self.inner.capture.start(code).await {
                Ok(rx) => {
                    info!("Capture retargeted to {}", code);
                    spawn_capture_pump(Arc::clone(&self.inner), gen, rx);
                }
                Err(e) => {
                    warn!("Capture restart after language change failed: {}", e);
                    state.want_listening = false;
                    state.capture = CaptureState::Idle;
                }
            }
        }

        Ok(self.inner.snapshot_locked(&state))
    }

    /// Change the target language; invalid codes are rejected
    pub async fn set_target_language(&self, code: &str) -> Result<SessionSnapshot, SessionError> {
        let mut state = self.inner.state.lock().await;
        if state.closed {
            return Ok(self.inner.snapshot_locked(&state));
        }

        if !self.inner.catalog.contains(code) {
            let err = SessionError::Configuration(code.to_string());
            state.last_error = Some(err.clone());
            return Err(err);
        }

        state.last_error = None;
        state.target_language = code.to_string();

        Ok(self.inner.snapshot_locked(&state))
    }

    /// Start or stop speech capture
    ///
    /// Starting goes through the microphone permission probe first; the state
    /// lock is released for the probe so the session stays responsive, and
    /// the outcome is reconciled against whatever happened meanwhile.
    pub async fn toggle_capture(&self) -> SessionSnapshot {
        let gen_at_probe;
        {
            let mut state = self.inner.state.lock().await;
            if state.closed {
                return self.inner.snapshot_locked(&state);
            }

            match state.capture {
                CaptureState::Listening => {
                    state.last_error = None;
                    self.inner.stop_capture_locked(&mut state).await;
                    return self.inner.snapshot_locked(&state);
                }
                CaptureState::RequestingPermission => {
                    // A probe is already outstanding
                    return self.inner.snapshot_locked(&state);
                }
                _ => {}
            }

            if state.input_mode != InputMode::Voice {
                warn!("Capture toggle ignored in text input mode");
                return self.inner.snapshot_locked(&state);
            }

            state.last_error = None;
            state.capture = CaptureState::RequestingPermission;
            gen_at_probe = state.capture_gen;
        }

        let permission = self.inner.capture.request_permission().await;

        let mut state = self.inner.state.lock().await;
        if state.closed
            || state.capture != CaptureState::RequestingPermission
            || state.capture_gen != gen_at_probe
        {
            // Mode switch or shutdown raced the probe
            return self.inner.snapshot_locked(&state);
        }

        match permission {
            Err(CaptureError::PermissionDenied) => {
                info!("Microphone permission denied");
                state.capture = CaptureState::Denied;
                state.last_error = Some(SessionError::Permission);
                return self.inner.snapshot_locked(&state);
            }
            Err(CaptureError::Unsupported) => {
                self.inner.degrade_to_text_locked(&mut state);
                return self.inner.snapshot_locked(&state);
            }
            Err(CaptureError::Failed(msg)) => {
                // Transient; absorbed, the user can retry
                warn!("Permission probe failed transiently: {}", msg);
                state.capture = CaptureState::Idle;
                return self.inner.snapshot_locked(&state);
            }
            Ok(()) => {}
        }

        state.capture_gen += 1;
        let gen = state.capture_gen;
        let language = state.source_language.clone();

        match self.inner.capture.start(&language).await {
            Ok(rx) => {
                info!("Capture armed ({})", language);
                state.transcript.clear();
                state.translation.clear();
                state.want_listening = true;
                state.capture = CaptureState::Listening;
                spawn_capture_pump(Arc::clone(&self.inner), gen, rx);
            }
            Err(CaptureError::Unsupported) => {
                self.inner.degrade_to_text_locked(&mut state);
            }
            Err(CaptureError::PermissionDenied) => {
                state.capture = CaptureState::Denied;
                state.last_error = Some(SessionError::Permission);
            }
            Err(CaptureError::Failed(msg)) => {
                warn!("Capture failed to start: {}", msg);
                state.capture = CaptureState::Idle;
            }
        }

        self.inner.snapshot_locked(&state)
    }

    /// Translate the current source text
    ///
    /// No-op when the source text is empty. The request carries a sequence
    /// number; when it resolves, only the highest issued number may mutate
    /// the session, so a superseded response can never overwrite a newer one.
    pub async fn request_translate(&self) -> SessionSnapshot {
        let (text, source, target, seq);
        {
            let mut state = self.inner.state.lock().await;
            if state.closed {
                return self.inner.snapshot_locked(&state);
            }

            if state.source_text().trim().is_empty() {
                return self.inner.snapshot_locked(&state);
            }

            state.last_error = None;
            state.translate_seq += 1;
            state.translation_state = TranslationState::InFlight;
            seq = state.translate_seq;
            text = state.source_text().to_string();
            source = state.source_language.clone();
            target = state.target_language.clone();
        }

        debug!("Translation request #{} issued ({} -> {})", seq, source, target);

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = inner.translator.translate(&text, &source, &target).await;

            let mut state = inner.state.lock().await;
            if state.closed || state.translate_seq != seq {
                debug!("Discarding superseded translation response #{}", seq);
                return;
            }

            match result {
                Ok(translated) => {
                    state.translation = translated;
                    state.translation_state = TranslationState::Succeeded;
                }
                Err(e) => {
                    warn!("Translation request #{} failed: {}", seq, e);
                    state.translation_state = TranslationState::Failed;
                    state.last_error = Some(SessionError::Translation(e));
                }
            }
        });

        self.snapshot().await
    }

    /// Start or stop playback of the current translation
    ///
    /// Starting is a no-op while the translation is empty. At most one
    /// utterance plays at a time; stopping cancels synthesis immediately.
    pub async fn toggle_playback(&self) -> SessionSnapshot {
        let mut state = self.inner.state.lock().await;
        if state.closed {
            return self.inner.snapshot_locked(&state);
        }

        if state.playback == PlaybackState::Speaking {
            state.last_error = None;
            state.playback_gen += 1;
            self.inner.playback.cancel().await;
            state.playback = PlaybackState::Idle;
            return self.inner.snapshot_locked(&state);
        }

        if state.translation.is_empty() {
            return self.inner.snapshot_locked(&state);
        }

        state.last_error = None;
        state.playback_gen += 1;
        let gen = state.playback_gen;
        let text = state.translation.clone();
        let language = state.target_language.clone();

        match self.inner.playback.speak(&text, &language).await {
            Ok(rx) => {
                info!("Playback started ({})", language);
                state.playback = PlaybackState::Speaking;
                spawn_playback_pump(Arc::clone(&self.inner), gen, rx);
            }
            Err(e) => {
                warn!("Playback failed to start: {}", e);
                state.last_error = Some(SessionError::Playback(e.to_string()));
            }
        }

        self.inner.snapshot_locked(&state)
    }

    /// Destroy the session: force capture to stop and playback to cancel
    ///
    /// Each adapter receives its stop/cancel exactly once, and no report
    /// arriving afterwards can mutate the session.
    pub async fn shutdown(&self) {
        let mut state = self.inner.state.lock().await;
        if state.closed {
            return;
        }

        info!("Shutting down session: {}", self.inner.config.session_id);
        state.closed = true;
        state.translate_seq += 1;

        if state.capture == CaptureState::Listening {
            self.inner.stop_capture_locked(&mut state).await;
        } else {
            state.capture_gen += 1;
            state.capture = CaptureState::Idle;
            state.want_listening = false;
        }

        if state.playback == PlaybackState::Speaking {
            state.playback_gen += 1;
            self.inner.playback.cancel().await;
        } else {
            state.playback_gen += 1;
        }
        state.playback = PlaybackState::Idle;
    }
}

impl SessionInner {
    /// Stop the active capture stream and invalidate its events
    async fn stop_capture_locked(&self, state: &mut SessionState) {
        state.want_listening = false;
        state.capture_gen += 1;
        self.capture.stop().await;
        state.capture = CaptureState::Idle;
        info!("Capture stopped");
    }

    /// Capture is unavailable: fall back to manual text entry
    fn degrade_to_text_locked(&self, state: &mut SessionState) {
        warn!("Speech capture unsupported; switching to text input");
        state.capture = CaptureState::Unsupported;
        state.input_mode = InputMode::Text;
        state.last_error = Some(SessionError::CaptureUnsupported);
    }

    fn snapshot_locked(&self, state: &SessionState) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.config.session_id.clone(),
            created_at: self.created_at,
            input_mode: state.input_mode,
            source_language: state.source_language.clone(),
            target_language: state.target_language.clone(),
            transcript: state.transcript.clone(),
            text_input: state.text_input.clone(),
            translation: state.translation.clone(),
            capture_state: state.capture,
            translation_state: state.translation_state,
            playback_state: state.playback,
            last_error: state.last_error.clone(),
            controls: Controls {
                capture_toggle: state.input_mode == InputMode::Voice
                    && state.capture != CaptureState::Unsupported,
                translate: !state.source_text().trim().is_empty()
                    && state.translation_state != TranslationState::InFlight,
                playback_toggle: !state.translation.is_empty(),
            },
        }
    }

    /// Reconcile one capture event against the current state
    ///
    /// Returns false once the pump that delivered the event should exit
    /// (stream superseded, stream ended, or session closed).
    async fn apply_capture_event(inner: &Arc<Self>, gen: u64, event: CaptureEvent) -> bool {
        let mut state = inner.state.lock().await;
        if state.closed || state.capture_gen != gen {
            debug!("Discarding stale capture event: {:?}", event);
            return false;
        }

        match event {
            CaptureEvent::Partial(text) => {
                if state.want_listening {
                    // Reports are cumulative: replace, not append
                    state.transcript = text;
                }
                true
            }
            CaptureEvent::Error(kind) => {
                if kind == CaptureErrorKind::NotAllowed {
                    info!("Capture revoked by the platform");
                    state.want_listening = false;
                    state.capture_gen += 1;
                    state.capture = CaptureState::Denied;
                    state.last_error = Some(SessionError::Permission);
                    return false;
                }
                // NoSpeech / Aborted / Other: absorbed; the stream's Ended
                // report drives the restart policy
                debug!("Transient capture error absorbed: {:?}", kind);
                true
            }
            CaptureEvent::Ended(reason) => {
                if !state.want_listening {
                    return false;
                }

                // Spontaneous termination while the user still wants to
                // listen: re-arm without surfacing anything
                state.capture_gen += 1;
                let new_gen = state.capture_gen;
                let language = state.source_language.clone();

                match inner.capture.start(&language).await {
                    Ok(rx) => {
                        debug!("Capture re-armed after {:?}", reason);
                        spawn_capture_pump(Arc::clone(inner), new_gen, rx);
                    }
                    Err(e) => {
                        warn!("Capture re-arm failed: {}", e);
                        state.want_listening = false;
                        state.capture = CaptureState::Idle;
                    }
                }
                false
            }
        }
    }

    /// Reconcile one playback event; same return convention as capture
    async fn apply_playback_event(&self, gen: u64, event: PlaybackEvent) -> bool {
        let mut state = self.state.lock().await;
        if state.closed || state.playback_gen != gen {
            debug!("Discarding stale playback event: {:?}", event);
            return false;
        }

        match event {
            PlaybackEvent::Started => true,
            PlaybackEvent::Ended => {
                state.playback = PlaybackState::Idle;
                false
            }
            PlaybackEvent::Error(reason) => {
                warn!("Playback error: {}", reason);
                state.playback = PlaybackState::Idle;
                state.last_error = Some(SessionError::Playback(reason));
                false
            }
        }
    }
}

fn spawn_capture_pump(
    inner: Arc<SessionInner>,
    gen: u64,
    mut rx: mpsc::Receiver<CaptureEvent>,
) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if !SessionInner::apply_capture_event(&inner, gen, event).await {
                break;
            }
        }
    });
}

fn spawn_playback_pump(
    inner: Arc<SessionInner>,
    gen: u64,
    mut rx: mpsc::Receiver<PlaybackEvent>,
) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if !inner.apply_playback_event(gen, event).await {
                break;
            }
        }
    });
}
