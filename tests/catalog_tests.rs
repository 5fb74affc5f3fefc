// Unit tests for the language catalog.

use live_translate::{base_subtag, LanguageCatalog};

#[test]
fn default_catalog_preserves_display_order() {
    let catalog = LanguageCatalog::default_catalog();
    let codes: Vec<&str> = catalog.languages().iter().map(|l| l.code.as_str()).collect();

    assert_eq!(
        codes,
        vec![
            "en-US", "es-ES", "fr-FR", "de-DE", "it-IT", "ja-JP", "ko-KR", "zh-CN", "ru-RU",
            "pt-BR"
        ]
    );
}

#[test]
fn membership_check_and_lookup() {
    let catalog = LanguageCatalog::default_catalog();

    assert!(catalog.contains("ja-JP"));
    assert!(!catalog.contains("xx-XX"));
    assert!(!catalog.contains("en"), "lookup is by full code");

    let language = catalog.get("de-DE").unwrap();
    assert_eq!(language.display_name, "German");
    assert!(catalog.get("nope").is_none());
}

#[test]
fn base_subtag_strips_dialect_qualifier() {
    assert_eq!(base_subtag("en-US"), "en");
    assert_eq!(base_subtag("pt-BR"), "pt");
    assert_eq!(base_subtag("zh-CN"), "zh");
    assert_eq!(base_subtag("en"), "en");
    assert_eq!(base_subtag(""), "");
}
