//! Conversions from external infrastructure errors into domain errors.

use awaydesk_domain::AwayDeskError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AwayDeskError);

impl From<InfraError> for AwayDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AwayDeskError> for InfraError {
    fn from(value: AwayDeskError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAwayDeskError {
    fn into_awaydesk(self) -> AwayDeskError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AwayDeskError */
/* -------------------------------------------------------------------------- */

impl IntoAwayDeskError for HttpError {
    fn into_awaydesk(self) -> AwayDeskError {
        if self.is_timeout() {
            return AwayDeskError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return AwayDeskError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return AwayDeskError::InvalidInput(format!("malformed response body: {self}"));
        }

        if let Some(status) = self.status() {
            return status_error(status);
        }

        AwayDeskError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_awaydesk())
    }
}

/// Domain error for a non-success HTTP status.
pub(crate) fn status_error(status: reqwest::StatusCode) -> AwayDeskError {
    let code = status.as_u16();
    let message = format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

    match code {
        401 | 403 => AwayDeskError::Auth(message),
        400..=499 => AwayDeskError::InvalidInput(message),
        _ => AwayDeskError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → AwayDeskError */
/* -------------------------------------------------------------------------- */

impl IntoAwayDeskError for JsonError {
    fn into_awaydesk(self) -> AwayDeskError {
        AwayDeskError::InvalidInput(format!(
            "invalid JSON at line {} column {}: {}",
            self.line(),
            self.column(),
            self
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_awaydesk())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: AwayDeskError = InfraError::from(error).into();
        match mapped {
            AwayDeskError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[test]
    fn server_errors_map_to_network() {
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE),
            AwayDeskError::Network(msg) if msg.contains("503")
        ));
        assert!(matches!(status_error(StatusCode::NOT_FOUND), AwayDeskError::InvalidInput(_)));
    }

    #[test]
    fn json_errors_keep_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\"online\": }").unwrap_err();
        let mapped: AwayDeskError = InfraError::from(err).into();
        match mapped {
            AwayDeskError::InvalidInput(msg) => assert!(msg.contains("line 1")),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }
}
