use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::base_subtag;
use crate::error::TranslateError;

/// Client for the remote translation endpoint
///
/// The service takes `?q=<text>&langpair=<src>|<tgt>` and answers with a JSON
/// body carrying the translated text plus quota signalling.
pub struct RemoteTranslator {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    /// Number or string depending on the service's mood
    #[serde(rename = "responseStatus")]
    response_status: Option<serde_json::Value>,
    #[serde(rename = "quotaFinished")]
    quota_finished: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl RemoteTranslator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for translation endpoint")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Probe whether the endpoint is reachable at all
    ///
    /// Any HTTP answer counts as reachable; only transport-level failure
    /// means the endpoint is unavailable.
    pub async fn probe(&self) -> bool {
        let url = format!("{}/get", self.base_url);
        match self
            .client
            .get(&url)
            .query(&[("q", "hello"), ("langpair", "en|es")])
            .send()
            .await
        {
            Ok(resp) => {
                debug!("Translation endpoint probe answered: {}", resp.status());
                true
            }
            Err(e) => {
                warn!("Translation endpoint probe failed: {}", e);
                false
            }
        }
    }

    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        // The service may not recognize dialect-qualified codes
        let langpair = format!("{}|{}", base_subtag(source), base_subtag(target));
        let url = format!("{}/get", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| TranslateError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(TranslateError::QuotaExceeded);
        }
        if !status.is_success() {
            return Err(TranslateError::Service(format!(
                "endpoint returned status {}",
                status
            )));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Service(format!("unreadable response body: {}", e)))?;

        if body.quota_finished == Some(true) || is_quota_status(body.response_status.as_ref()) {
            return Err(TranslateError::QuotaExceeded);
        }

        body.response_data
            .and_then(|d| d.translated_text)
            .ok_or_else(|| TranslateError::Service("response carried no translation".to_string()))
    }
}

fn is_quota_status(status: Option<&serde_json::Value>) -> bool {
    match status {
        Some(v) => v.as_i64() == Some(429) || v.as_str() == Some("429"),
        None => false,
    }
}
