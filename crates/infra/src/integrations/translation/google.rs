//! Google Translate client (public `translate_a/single` endpoint)

use async_trait::async_trait;
use awaydesk_core::TranslationService;
use awaydesk_domain::{AwayDeskError, Result, TranslationConfig};
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use crate::http::HttpClient;

/// Translates free text into English with source-language auto-detection.
pub struct GoogleTranslateClient {
    http: HttpClient,
    endpoint: String,
}

impl GoogleTranslateClient {
    pub fn new(http: HttpClient, config: &TranslationConfig) -> Self {
        let endpoint = format!("{}/translate_a/single", config.base_url.trim_end_matches('/'));
        Self { http, endpoint }
    }
}

#[async_trait]
impl TranslationService for GoogleTranslateClient {
    #[instrument(skip_all, fields(provider = "google", chars = text.chars().count()))]
    async fn translate_to_english(&self, text: &str) -> Result<String> {
        let request = self.http.request(Method::GET, &self.endpoint).query(&[
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", "en"),
            ("dt", "t"),
            ("q", text),
        ]);

        let body: Value = self
            .http
            .send_json(request)
            .await
            .map_err(|err| AwayDeskError::Translation(err.to_string()))?;

        extract_translation(&body)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
///
/// The payload is a nested array whose first element lists
/// `[translated, original, ...]` segments.
fn extract_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| AwayDeskError::Translation("response has no segment list".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(AwayDeskError::Translation("response contained no translated text".into()));
    }
    Ok(translated)
}

/// [`TranslationService`] used when translation is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl TranslationService for PassthroughTranslator {
    async fn translate_to_english(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> GoogleTranslateClient {
        let config =
            TranslationConfig { enabled: true, base_url: server.uri(), timeout_seconds: 5 };
        GoogleTranslateClient::new(HttpClient::new().unwrap(), &config)
    }

    #[test]
    fn joins_multiple_segments() {
        let body = json!([
            [["Are you free ", "Sei libero ", null, null, 10], ["tomorrow?", "domani?", null, null, 10]],
            null,
            "it"
        ]);
        assert_eq!(extract_translation(&body).unwrap(), "Are you free tomorrow?");
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(extract_translation(&json!({"error": "nope"})).is_err());
        assert!(extract_translation(&json!([[]])).is_err());
    }

    #[tokio::test]
    async fn requests_english_with_auto_detection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "auto"))
            .and(query_param("tl", "en"))
            .and(query_param("dt", "t"))
            .and(query_param("q", "domani"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([[["tomorrow", "domani", null, null, 10]], null, "it"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let translated = client(&server).translate_to_english("domani").await.unwrap();
        assert_eq!(translated, "tomorrow");
    }

    #[tokio::test]
    async fn http_failures_surface_as_translation_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = client(&server).translate_to_english("domani").await;
        assert!(matches!(result, Err(AwayDeskError::Translation(_))));
    }

    #[tokio::test]
    async fn passthrough_returns_input() {
        assert_eq!(PassthroughTranslator.translate_to_english("ciao").await.unwrap(), "ciao");
    }
}
