use tokio::sync::OnceCell;
use tracing::info;

use super::fallback::FallbackTranslator;
use super::remote::RemoteTranslator;
use crate::error::TranslateError;

/// Stateless translation function behind the session
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError>;
}

/// Dispatches between the remote endpoint and the local fallback
///
/// Availability is probed once per session and cached; a probe failure is
/// the same as "unconfigured" and routes every call to the fallback, never
/// a session error. One gateway instance belongs to one session.
pub struct TranslationGateway {
    remote: Option<RemoteTranslator>,
    fallback: FallbackTranslator,
    remote_available: OnceCell<bool>,
}

impl TranslationGateway {
    pub fn new(remote: Option<RemoteTranslator>) -> Self {
        Self {
            remote,
            fallback: FallbackTranslator::new(),
            remote_available: OnceCell::new(),
        }
    }

    /// A gateway that only ever uses the fallback translator
    pub fn fallback_only() -> Self {
        Self::new(None)
    }
}

#[async_trait::async_trait]
impl Translator for TranslationGateway {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        if let Some(remote) = &self.remote {
            let available = self
                .remote_available
                .get_or_init(|| async {
                    let ok = remote.probe().await;
                    info!(
                        "Translation endpoint availability: {}",
                        if ok { "remote" } else { "fallback" }
                    );
                    ok
                })
                .await;

            if *available {
                return remote.translate(text, source, target).await;
            }
        }

        self.fallback.translate(text, source, target)
    }
}
