use serde::{Deserialize, Serialize};

/// Configuration for a translation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier
    pub session_id: String,

    /// Initial source language (catalog code)
    pub source_language: String,

    /// Initial target language (catalog code)
    pub target_language: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            source_language: "en-US".to_string(),
            target_language: "es-ES".to_string(),
        }
    }
}
