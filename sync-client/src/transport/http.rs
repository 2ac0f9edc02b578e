//! reqwest-backed transport for the hosted team API.

use super::{Method, Transport, TransportError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::fmt;
use std::time::Duration;

/// Default API host.
pub const DEFAULT_HOST: &str = "https://app.honeybadger.io";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Statuses treated as success. Everything else, other 2xx included, is a
/// rejection.
pub fn is_success_status(status: u16) -> bool {
    matches!(status, 200 | 201 | 202 | 204)
}

/// Configuration for [`HttpTransport`].
#[derive(Clone)]
pub struct HttpTransportConfig {
    /// Scheme and host, e.g. `https://app.honeybadger.io`.
    pub base_url: String,
    /// API token, sent as the basic-auth user name.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HOST.to_string(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpTransportConfig {
    /// Configuration for the default host with the given token.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            ..Self::default()
        }
    }

    /// Set the host.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for HttpTransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransportConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTPS transport with basic auth and JSON bodies.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Build a transport from its configuration.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Resolve a request path against the host.
    ///
    /// Absolute URLs (as some pagination links are) are used verbatim.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connection(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, TransportError> {
        let url = self.url_for(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(to_reqwest(method), &url)
            .basic_auth(&self.api_key, Some(""))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(classify)?;

        if !is_success_status(status) {
            tracing::debug!("{} {} rejected with status {}", method, url, status);
            return Err(TransportError::Rejected {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> HttpTransport {
        HttpTransport::new(HttpTransportConfig::new("token").with_base_url(&server.uri())).unwrap()
    }

    // ===========================================
    // Status Classification
    // ===========================================

    #[test]
    fn accepted_statuses() {
        for status in [200, 201, 202, 204] {
            assert!(is_success_status(status), "{} should be accepted", status);
        }
        for status in [203, 206, 301, 304, 400, 401, 404, 422, 500, 503] {
            assert!(!is_success_status(status), "{} should be rejected", status);
        }
    }

    #[tokio::test]
    async fn get_sends_basic_auth_and_returns_body() {
        let server = MockServer::start().await;
        // base64("token:")
        Mock::given(method("GET"))
            .and(path("/v2/teams"))
            .and(header("authorization", "Basic dG9rZW46"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let body = transport_for(&server)
            .send(Method::Get, "/v2/teams", None)
            .await
            .unwrap();
        assert_eq!(body, br#"{"results":[]}"#);
    }

    #[tokio::test]
    async fn post_forwards_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/teams"))
            .and(body_json(json!({"team": {"name": "ops"}})))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":1}"#))
            .expect(1)
            .mount(&server)
            .await;

        let body = transport_for(&server)
            .send(Method::Post, "/v2/teams", Some(br#"{"team":{"name":"ops"}}"#))
            .await
            .unwrap();
        assert_eq!(body, br#"{"id":1}"#);
    }

    #[tokio::test]
    async fn no_content_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v2/teams/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let body = transport_for(&server)
            .send(Method::Delete, "/v2/teams/1", None)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn error_status_is_rejected_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v2/teams/1"))
            .respond_with(ResponseTemplate::new(422).set_body_string("name is taken"))
            .mount(&server)
            .await;

        let err = transport_for(&server)
            .send(Method::Put, "/v2/teams/1", Some(b"{}"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::Rejected {
                status: 422,
                body: "name is taken".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unlisted_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams"))
            .respond_with(ResponseTemplate::new(203).set_body_string("proxy"))
            .mount(&server)
            .await;

        let err = transport_for(&server)
            .send(Method::Get, "/v2/teams", None)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Rejected { status: 203, .. }));
    }

    #[tokio::test]
    async fn absolute_link_is_used_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams/page/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("page2"))
            .expect(1)
            .mount(&server)
            .await;

        // Host points nowhere; the absolute link must win.
        let transport = HttpTransport::new(
            HttpTransportConfig::new("token").with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();
        let link = format!("{}/v2/teams/page/2", server.uri());

        let body = transport.send(Method::Get, &link, None).await.unwrap();
        assert_eq!(body, b"page2");
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_failure() {
        let transport = HttpTransport::new(
            HttpTransportConfig::new("token").with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();

        let err = transport
            .send(Method::Get, "/v2/teams", None)
            .await
            .unwrap_err();
        assert!(!matches!(err, TransportError::Rejected { .. }));
    }

    // ===========================================
    // URL Joining and Redaction
    // ===========================================

    #[test]
    fn url_for_joins_relative_paths() {
        let transport = HttpTransport::new(
            HttpTransportConfig::new("t").with_base_url("https://api.example.com/"),
        )
        .unwrap();

        assert_eq!(
            transport.url_for("/v2/teams"),
            "https://api.example.com/v2/teams"
        );
        assert_eq!(
            transport.url_for("v2/teams?page=2"),
            "https://api.example.com/v2/teams?page=2"
        );
        assert_eq!(
            transport.url_for("https://other.example.com/v2/teams"),
            "https://other.example.com/v2/teams"
        );
    }

    #[test]
    fn default_config_targets_hosted_api() {
        let config = HttpTransportConfig::default();
        assert_eq!(config.base_url, DEFAULT_HOST);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = HttpTransportConfig::new("super-secret-token");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("REDACTED"));

        let transport = HttpTransport::new(config).unwrap();
        assert!(!format!("{:?}", transport).contains("super-secret-token"));
    }
}
