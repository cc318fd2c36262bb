// # HTTP IP Source
//
// This crate discovers the caller's public IP address through plain-text
// "what is my IP" services (e.g. icanhazip.com).
//
// ## Behavior
//
// - GET the primary service; the whole body, trimmed, is the address
// - On any failure, GET the fallback service the same way
// - If both fail, report the last error
//
// A response counts as a failure when the request errors or times out, the
// status is not 2xx, or the body is blank. There are no retries beyond the
// single fallback.

use async_trait::async_trait;
use ddns_core::config::Settings;
use ddns_core::traits::{IpSource, ResolvedIp};
use ddns_core::{Error, Result};
use std::time::Duration;

/// Default timeout for each IP service request
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based IP source with one fallback service
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// Service queried first
    primary_url: String,

    /// Service queried when the primary fails
    fallback_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `primary_url`: Service queried first (e.g., "http://icanhazip.com/")
    /// - `fallback_url`: Service queried when the primary fails
    /// - `timeout`: Upper bound for each request
    pub fn new(
        primary_url: impl Into<String>,
        fallback_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            primary_url: primary_url.into(),
            fallback_url: fallback_url.into(),
            client,
        })
    }

    /// Create from the `settings` section of the configuration
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.primary_ip_url.clone(),
            settings.fallback_ip_url.clone(),
            settings.timeout(),
        )
    }

    /// Create with the default request timeout
    pub fn with_default_timeout(
        primary_url: impl Into<String>,
        fallback_url: impl Into<String>,
    ) -> Result<Self> {
        Self::new(primary_url, fallback_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Fetch the IP from one service
    async fn fetch_ip(&self, url: &str) -> Result<ResolvedIp> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ip_resolution(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::ip_resolution(format!(
                "{} answered with HTTP {}",
                url,
                response.status()
            )));
        }

        let body = response.text().await.map_err(|e| {
            Error::ip_resolution(format!("Failed to read response from {}: {}", url, e))
        })?;

        ResolvedIp::from_body(&body)
            .ok_or_else(|| Error::ip_resolution(format!("{} returned an empty body", url)))
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<ResolvedIp> {
        match self.fetch_ip(&self.primary_url).await {
            Ok(ip) => {
                tracing::debug!("Public IP {} from {}", ip, self.primary_url);
                return Ok(ip);
            }
            Err(e) => {
                tracing::warn!("Primary IP service failed, trying fallback: {}", e);
            }
        }

        match self.fetch_ip(&self.fallback_url).await {
            Ok(ip) => {
                tracing::debug!("Public IP {} from {}", ip, self.fallback_url);
                Ok(ip)
            }
            Err(e) => {
                tracing::warn!("Fallback IP service failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// URL of a local port with nothing listening on it
    fn refused_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}/", port)
    }

    async fn ip_server(status: u16, body: &str, expected_calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(expected_calls)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_primary_answer_used() {
        let primary = ip_server(200, "198.51.100.9\n", 1).await;
        let fallback = ip_server(200, "203.0.113.7\n", 0).await;

        let source =
            HttpIpSource::with_default_timeout(primary.uri() + "/", fallback.uri() + "/").unwrap();
        let ip = source.current().await.unwrap();

        assert_eq!(ip.as_str(), "198.51.100.9");
    }

    #[tokio::test]
    async fn test_refused_primary_falls_back() {
        let fallback = ip_server(200, "203.0.113.7\n", 1).await;

        let source =
            HttpIpSource::with_default_timeout(refused_url(), fallback.uri() + "/").unwrap();
        let ip = source.current().await.unwrap();

        assert_eq!(ip.as_str(), "203.0.113.7");
    }

    #[tokio::test]
    async fn test_error_status_falls_back() {
        let primary = ip_server(503, "Service Unavailable", 1).await;
        let fallback = ip_server(200, "203.0.113.7", 1).await;

        let source =
            HttpIpSource::with_default_timeout(primary.uri() + "/", fallback.uri() + "/").unwrap();

        assert_eq!(source.current().await.unwrap().as_str(), "203.0.113.7");
    }

    #[tokio::test]
    async fn test_blank_body_falls_back() {
        let primary = ip_server(200, "\n", 1).await;
        let fallback = ip_server(200, "2001:db8::7\n", 1).await;

        let source =
            HttpIpSource::with_default_timeout(primary.uri() + "/", fallback.uri() + "/").unwrap();

        assert_eq!(source.current().await.unwrap().as_str(), "2001:db8::7");
    }

    #[tokio::test]
    async fn test_slow_primary_times_out() {
        let primary = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("198.51.100.9")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&primary)
            .await;
        let fallback = ip_server(200, "203.0.113.7\n", 1).await;

        let source = HttpIpSource::new(
            primary.uri() + "/",
            fallback.uri() + "/",
            Duration::from_millis(200),
        )
        .unwrap();

        assert_eq!(source.current().await.unwrap().as_str(), "203.0.113.7");
    }

    #[tokio::test]
    async fn test_both_failing_reports_last_error() {
        let fallback = ip_server(500, "", 1).await;

        let source =
            HttpIpSource::with_default_timeout(refused_url(), fallback.uri() + "/").unwrap();
        let err = source.current().await.unwrap_err();

        match err {
            Error::IpResolution(msg) => assert!(msg.contains("500"), "message was: {}", msg),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings::default();
        let source = HttpIpSource::from_settings(&settings).unwrap();

        assert_eq!(source.primary_url, "http://icanhazip.com/");
        assert_eq!(source.fallback_url, "http://icmpzero.net/ip.php");
    }
}
