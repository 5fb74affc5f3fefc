//! Local stand-in translator used when the remote endpoint is unavailable
//!
//! Returns canned demo phrases for the English source pairs the demo ships
//! with, and otherwise a clearly marked placeholder so the user can tell the
//! result is not a real translation.

use crate::catalog::base_subtag;
use crate::error::TranslateError;

/// Demo phrases for English sources, keyed by target base subtag
const DEMO_PHRASES: &[(&str, &str)] = &[
    ("es", "Hola, esto es una traducción de demostración."),
    ("fr", "Bonjour, c'est une traduction de démonstration."),
    ("de", "Hallo, dies ist eine Demo-Übersetzung."),
    ("it", "Ciao, questa è una traduzione dimostrativa."),
    ("ja", "こんにちは、これはデモ翻訳です。"),
    ("ko", "안녕하세요, 이것은 데모 번역입니다."),
    ("zh", "你好，这是一个演示翻译。"),
    ("ru", "Привет, это демонстрационный перевод."),
    ("pt", "Olá, esta é uma tradução de demonstração."),
];

#[derive(Debug, Default)]
pub struct FallbackTranslator;

impl FallbackTranslator {
    pub fn new() -> Self {
        Self
    }

    pub fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        if base_subtag(source) == "en" {
            let target_base = base_subtag(target);
            if let Some((_, phrase)) = DEMO_PHRASES.iter().find(|(code, _)| *code == target_base) {
                return Ok((*phrase).to_string());
            }
        }

        Ok(format!(
            "[Translation from {} to {}]: {}",
            source, target, text
        ))
    }
}
