// Tests for the translation gateway: remote wire behavior, error mapping,
// base-subtag normalization, and fallback degradation.

use std::time::Duration;

use live_translate::{RemoteTranslator, TranslateError, TranslationGateway, Translator};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(2);

fn success_body(text: &str) -> serde_json::Value {
    json!({
        "responseData": { "translatedText": text },
        "responseStatus": 200
    })
}

#[tokio::test]
async fn remote_returns_translated_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("hola")))
        .mount(&server)
        .await;

    let remote = RemoteTranslator::new(&server.uri(), TIMEOUT).unwrap();
    let result = remote.translate("hello", "en-US", "es-ES").await.unwrap();
    assert_eq!(result, "hola");
}

#[tokio::test]
async fn dialect_qualified_codes_are_reduced_to_base_subtags() {
    let server = MockServer::start().await;
    // Only the base-subtag pair is mocked; a request with the full codes
    // would miss and fail the test
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("q", "hello"))
        .and(query_param("langpair", "en|pt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("olá")))
        .expect(1)
        .mount(&server)
        .await;

    let remote = RemoteTranslator::new(&server.uri(), TIMEOUT).unwrap();
    let result = remote.translate("hello", "en-US", "pt-BR").await.unwrap();
    assert_eq!(result, "olá");
}

#[tokio::test]
async fn http_429_maps_to_quota_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let remote = RemoteTranslator::new(&server.uri(), TIMEOUT).unwrap();
    let err = remote.translate("hello", "en-US", "es-ES").await.unwrap_err();
    assert_eq!(err, TranslateError::QuotaExceeded);
}

#[tokio::test]
async fn quota_flags_in_body_map_to_quota_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseData": { "translatedText": "MYMEMORY WARNING" },
            "responseStatus": "429",
            "quotaFinished": true
        })))
        .mount(&server)
        .await;

    let remote = RemoteTranslator::new(&server.uri(), TIMEOUT).unwrap();
    let err = remote.translate("hello", "en-US", "es-ES").await.unwrap_err();
    assert_eq!(err, TranslateError::QuotaExceeded);
}

#[tokio::test]
async fn server_error_maps_to_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let remote = RemoteTranslator::new(&server.uri(), TIMEOUT).unwrap();
    let err = remote.translate("hello", "en-US", "es-ES").await.unwrap_err();
    assert!(matches!(err, TranslateError::Service(_)));
}

#[tokio::test]
async fn missing_translation_in_body_maps_to_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "responseStatus": 200 })))
        .mount(&server)
        .await;

    let remote = RemoteTranslator::new(&server.uri(), TIMEOUT).unwrap();
    let err = remote.translate("hello", "en-US", "es-ES").await.unwrap_err();
    assert!(matches!(err, TranslateError::Service(_)));
}

#[tokio::test]
async fn unreachable_endpoint_maps_to_network_error() {
    let remote = RemoteTranslator::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
    let err = remote.translate("hello", "en-US", "es-ES").await.unwrap_err();
    assert!(matches!(err, TranslateError::Network(_)));
}

#[tokio::test]
async fn gateway_routes_to_remote_when_probe_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("hola")))
        .mount(&server)
        .await;

    let remote = RemoteTranslator::new(&server.uri(), TIMEOUT).unwrap();
    let gateway = TranslationGateway::new(Some(remote));

    let result = gateway.translate("hello", "en-US", "es-ES").await.unwrap();
    assert_eq!(result, "hola");
}

#[tokio::test]
async fn gateway_degrades_to_fallback_when_probe_fails() {
    let remote = RemoteTranslator::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
    let gateway = TranslationGateway::new(Some(remote));

    let result = gateway.translate("hello", "en-US", "es-ES").await.unwrap();
    assert_eq!(result, "Hola, esto es una traducción de demostración.");

    // The probe result is cached: no second probe delay, same routing
    let result = gateway.translate("hi", "fr-FR", "de-DE").await.unwrap();
    assert_eq!(result, "[Translation from fr-FR to de-DE]: hi");
}

#[tokio::test]
async fn fallback_only_gateway_marks_placeholders() {
    let gateway = TranslationGateway::fallback_only();

    let result = gateway.translate("ciao", "it-IT", "ru-RU").await.unwrap();
    assert_eq!(result, "[Translation from it-IT to ru-RU]: ciao");
}
