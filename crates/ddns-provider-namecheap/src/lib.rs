// # Namecheap Dynamic DNS Provider
//
// This crate pushes a new address for `host.domain` to Namecheap's dynamic
// DNS endpoint.
//
// ## Protocol
//
// ```http
// GET /update?host=home&domain=example.net&password=<secret>&ip=198.51.100.9
// Host: dynamicdns.park-your-domain.com
// ```
//
// The answer is an XML `interface-response` document. `ErrCount` of zero
// means the record was updated; otherwise `errors/Err1` describes why not.
//
// ## Rules
//
// - One request per call, no retries
// - The password NEVER appears in logs or Debug output
// - A non-2xx status or an unreadable body is a transport failure, distinct
//   from the provider rejecting the update

mod response;

pub use response::{ProviderResponse, UNDESCRIBED_ERROR};

use async_trait::async_trait;
use ddns_core::config::{Settings, UpdateTarget};
use ddns_core::traits::{DnsProvider, ResolvedIp};
use ddns_core::{Error, Result};
use reqwest::Url;
use std::time::Duration;

/// Namecheap DNS provider
///
/// # Security
///
/// The password is carried by the [`UpdateTarget`] passed to each call and
/// is only ever placed in the outgoing query string.
#[derive(Clone)]
pub struct NamecheapProvider {
    /// Update endpoint without query string
    endpoint: Url,

    /// HTTP client for update requests
    client: reqwest::Client,
}

impl std::fmt::Debug for NamecheapProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamecheapProvider")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl NamecheapProvider {
    /// Create a new Namecheap provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Update URL, e.g. "https://dynamicdns.park-your-domain.com/update"
    /// - `timeout`: Upper bound for the update request
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            Error::config(format!("Invalid provider URL {}: {}", endpoint, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { endpoint, client })
    }

    /// Create from the `settings` section of the configuration
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.provider_url, settings.timeout())
    }

    /// Build the update URL with `password` as the secret value
    fn update_url(&self, target: &UpdateTarget, new_ip: &ResolvedIp, password: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("host", target.host())
            .append_pair("domain", target.domain())
            .append_pair("password", password)
            .append_pair("ip", new_ip.as_str());
        url
    }
}

#[async_trait]
impl DnsProvider for NamecheapProvider {
    async fn push_update(&self, target: &UpdateTarget, new_ip: &ResolvedIp) -> Result<()> {
        tracing::debug!(
            "Update URL: {}",
            self.update_url(target, new_ip, "<REDACTED>")
        );

        let url = self.update_url(target, new_ip, target.password());
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors embed the URL, which carries the password
                Error::provider_failed(format!("HTTP request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::provider_failed(format!(
                "Update endpoint answered with HTTP {}",
                status
            )));
        }

        let body = response.text().await.map_err(|e| {
            Error::provider_failed(format!("Failed to read response: {}", e.without_url()))
        })?;
        tracing::debug!("Update response: {}", body.trim());

        match ProviderResponse::parse(&body) {
            Ok(ProviderResponse::Accepted) => Ok(()),
            Ok(ProviderResponse::Rejected(message)) => Err(Error::provider_rejected(message)),
            Err(e) => Err(Error::provider_failed(format!(
                "Failed to parse response: {}",
                e
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "namecheap"
    }
}
