use serde::{Deserialize, Serialize};

/// A supported language: identifier plus display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language identifier, possibly dialect-qualified (e.g. "en-US")
    pub code: String,
    /// Human-readable name for selectors
    pub display_name: String,
}

/// Ordered catalog of the languages the translator supports
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    /// The catalog shipped with the product
    pub fn default_catalog() -> Self {
        let languages = [
            ("en-US", "English"),
            ("es-ES", "Spanish"),
            ("fr-FR", "French"),
            ("de-DE", "German"),
            ("it-IT", "Italian"),
            ("ja-JP", "Japanese"),
            ("ko-KR", "Korean"),
            ("zh-CN", "Chinese"),
            ("ru-RU", "Russian"),
            ("pt-BR", "Portuguese"),
        ]
        .into_iter()
        .map(|(code, name)| Language {
            code: code.to_string(),
            display_name: name.to_string(),
        })
        .collect();

        Self::new(languages)
    }

    /// Languages in catalog order
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Whether a code is in the catalog
    pub fn contains(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l.code == code)
    }

    /// Look up a language by its code
    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }
}

/// Reduce a possibly dialect-qualified code to its primary language subtag
/// ("en-US" -> "en"). The remote translation service may not recognize
/// dialect-qualified codes.
pub fn base_subtag(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}
