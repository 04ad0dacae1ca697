//! Presence lookups over HTTP

use async_trait::async_trait;
use awaydesk_core::PresenceService;
use awaydesk_domain::{AwayDeskError, Presence, PresenceConfig, Result};
use reqwest::Method;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct PresenceResponse {
    online: bool,
}

/// Reads presence from `GET {base_url}/users/{user_id}/presence`.
pub struct HttpPresenceClient {
    http: HttpClient,
    base_url: Url,
}

impl HttpPresenceClient {
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            AwayDeskError::Config(format!("Invalid presence base URL '{}': {}", base_url, e))
        })?;
        Ok(Self { http, base_url })
    }

    /// Build from config, or `None` when no presence source is configured.
    pub fn from_config(http: HttpClient, config: &PresenceConfig) -> Result<Option<Self>> {
        config.base_url.as_deref().map(|base_url| Self::new(http, base_url)).transpose()
    }

    fn presence_url(&self, user_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AwayDeskError::Config("presence base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["users", user_id, "presence"]);
        Ok(url)
    }
}

#[async_trait]
impl PresenceService for HttpPresenceClient {
    #[instrument(skip(self))]
    async fn get_presence(&self, user_id: &str) -> Result<Presence> {
        let url = self.presence_url(user_id)?;
        let response: PresenceResponse = self
            .http
            .send_json(self.http.request(Method::GET, url))
            .await
            .map_err(|err| AwayDeskError::Presence(err.to_string()))?;

        Ok(Presence { online: response.online })
    }
}

/// Presence source used when none is configured.
///
/// Always reports the lookup as failed; the decision engine reads that as
/// offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownPresence;

#[async_trait]
impl PresenceService for UnknownPresence {
    async fn get_presence(&self, _user_id: &str) -> Result<Presence> {
        Err(AwayDeskError::Presence("no presence source configured".into()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn reads_online_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/owner-1/presence"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"online": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpPresenceClient::new(HttpClient::new().unwrap(), &server.uri()).unwrap();
        assert_eq!(client.get_presence("owner-1").await.unwrap(), Presence::online());
    }

    #[tokio::test]
    async fn malformed_body_is_a_presence_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "away"})))
            .mount(&server)
            .await;

        let client = HttpPresenceClient::new(HttpClient::new().unwrap(), &server.uri()).unwrap();
        assert!(matches!(client.get_presence("owner-1").await, Err(AwayDeskError::Presence(_))));
    }

    #[test]
    fn absent_base_url_yields_none() {
        let config = PresenceConfig::default();
        assert!(HttpPresenceClient::from_config(HttpClient::new().unwrap(), &config)
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unknown_presence_always_fails() {
        assert!(UnknownPresence.get_presence("owner-1").await.is_err());
    }
}
