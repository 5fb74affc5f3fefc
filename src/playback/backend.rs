use tokio::sync::mpsc;

/// Events pushed by an utterance in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Synthesis actually started producing audio
    Started,
    /// The utterance finished
    Ended,
    /// Synthesis failed mid-utterance
    Error(String),
}

/// Failure starting synthesis
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// No text-to-speech capability on this platform
    #[error("speech synthesis unsupported on this platform")]
    Unsupported,

    #[error("speech synthesis failed to start: {0}")]
    Failed(String),
}

/// Text-to-speech backend
///
/// Implementations own the audio output device exclusively and honor at most
/// one utterance at a time; a `speak` while speaking implies a cancel of the
/// prior utterance. Callers must still await `cancel` before a new `speak`
/// so the device is never doubly acquired.
#[async_trait::async_trait]
pub trait PlaybackBackend: Send + Sync {
    /// Synthesize `text` in the given language
    ///
    /// Returns a channel receiver of playback events for this utterance.
    async fn speak(
        &self,
        text: &str,
        language: &str,
    ) -> Result<mpsc::Receiver<PlaybackEvent>, PlaybackError>;

    /// Cancel the active utterance, if any. Takes effect before returning.
    async fn cancel(&self);

    /// Backend name for logging
    fn name(&self) -> &str;
}
