//! API client for the Verbatim cloud service.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! calls against the service's Authenticate endpoints.
//!
//! The API uses JWT bearer token authentication; the token comes from
//! the key material loaded at startup.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::error::ApiError;
use super::models::TokenInfo;

// ============================================================================
// Constants
// ============================================================================

/// Default base URL for the Verbatim cloud API
pub const DEFAULT_BASE_URL: &str = "https://api.verbatim.cloud";

/// Path of the "who am I" endpoint (Authenticate section of the service API)
const WHOAMI_PATH: &str = "/auth/whoami";

/// HTTP request timeout in seconds.
/// The whoami call is tiny; anything slower is a stuck connection.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transport settings and credentials for the API client.
/// Both the base URL and the bearer token are required up front, so a
/// misconfigured authentication scheme cannot surface at call time.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub bearer_token: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

/// API client for the Verbatim cloud service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new API client from the given configuration
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    /// Call the "who am I" endpoint and return the token metadata.
    ///
    /// A single attempt with no retry or backoff; retry policy is left
    /// to the caller.
    pub async fn whoami(&self) -> Result<TokenInfo, ApiError> {
        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            WHOAMI_PATH
        );
        debug!(url = %url, "calling whoami");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.bearer_token)
            .send()
            .await?;

        let response = Self::check_response(response).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("failed to parse whoami response: {e}"))
        })
    }

    /// Check if a response is successful, capturing status, body and
    /// headers if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status,
                body,
                headers,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_whoami_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/whoami"))
            .and(header("Authorization", "Bearer sk-deadbeef"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organizationId": "org-123"
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(ApiConfig::new(mock_server.uri(), "sk-deadbeef")).unwrap();
        let info = client.whoami().await.unwrap();

        assert_eq!(info.organization_id, "org-123");
    }

    #[tokio::test]
    async fn test_whoami_tolerates_trailing_slash_in_base_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/whoami"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organizationId": "org-123"
            })))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/", mock_server.uri());
        let client = ApiClient::new(ApiConfig::new(base_url, "sk-deadbeef")).unwrap();

        assert!(client.whoami().await.is_ok());
    }

    #[tokio::test]
    async fn test_whoami_unauthorized_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/whoami"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"message":"invalid token"}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(ApiConfig::new(mock_server.uri(), "sk-bogus")).unwrap();
        let err = client.whoami().await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 401);
                assert_eq!(body, r#"{"message":"invalid token"}"#);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_whoami_error_carries_response_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/whoami"))
            .respond_with(
                ResponseTemplate::new(500)
                    .insert_header("x-request-id", "req-1")
                    .set_body_string("internal error"),
            )
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(ApiConfig::new(mock_server.uri(), "sk-deadbeef")).unwrap();
        let err = client.whoami().await.unwrap_err();

        let headers = err.headers().expect("status error should carry headers");
        assert_eq!(headers.get("x-request-id").unwrap(), "req-1");
    }

    #[tokio::test]
    async fn test_whoami_connection_failure_has_no_status() {
        // Grab a port, then shut the server down so the connection is refused
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let client = ApiClient::new(ApiConfig::new(uri, "sk-deadbeef")).unwrap();
        let err = client.whoami().await.unwrap_err();

        assert_eq!(err.status(), None);
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_whoami_unparseable_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/whoami"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(ApiConfig::new(mock_server.uri(), "sk-deadbeef")).unwrap();
        let err = client.whoami().await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
