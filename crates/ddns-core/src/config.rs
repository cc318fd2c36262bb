//! Configuration types for the DDNS updater
//!
//! The configuration file is JSON. The `updateParams` section identifies the
//! record to reconcile; the optional `settings` section overrides endpoints,
//! file locations and timeouts.
//!
//! ```json
//! {
//!   "updateParams": {
//!     "domain": "example.net",
//!     "host": "home",
//!     "password": "secret",
//!     "log": true,
//!     "debug": false
//!   },
//!   "settings": {
//!     "timeoutSecs": 10
//!   }
//! }
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Primary IP discovery service
pub const DEFAULT_PRIMARY_IP_URL: &str = "http://icanhazip.com/";

/// Alternate IP discovery service, used when the primary fails
pub const DEFAULT_FALLBACK_IP_URL: &str = "http://icmpzero.net/ip.php";

/// Namecheap dynamic DNS update endpoint
pub const DEFAULT_PROVIDER_URL: &str = "https://dynamicdns.park-your-domain.com/update";

/// Audit log written in the working directory
pub const DEFAULT_LOG_FILE: &str = "updateLog.txt";

/// Per-call timeout for outbound requests and lookups
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const MAX_TIMEOUT_SECS: u64 = 300;

/// Main configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DdnsConfig {
    /// Record to reconcile and feature flags
    pub update_params: UpdateParams,

    /// Optional overrides
    #[serde(default)]
    pub settings: Settings,
}

impl DdnsConfig {
    /// Load and validate a configuration file
    ///
    /// A path that does not exist or is a directory yields
    /// [`Error::ConfigMissing`]; unreadable or malformed content yields
    /// [`Error::ConfigParse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let is_file = std::fs::metadata(path)
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(Error::ConfigMissing(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config_parse(path, e.to_string()))?;

        let config = Self::from_json(&raw).map_err(|e| match e {
            Error::ConfigParse { message, .. } => Error::config_parse(path, message),
            other => other,
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: DdnsConfig = serde_json::from_str(raw)
            .map_err(|e| Error::config_parse(PathBuf::from("<inline>"), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let params = &self.update_params;
        if params.host.trim().is_empty() {
            return Err(Error::config("updateParams.host cannot be empty"));
        }
        if params.domain.trim().is_empty() {
            return Err(Error::config("updateParams.domain cannot be empty"));
        }
        if params.password.is_empty() {
            return Err(Error::config("updateParams.password cannot be empty"));
        }

        self.settings.validate()
    }

    /// The record this configuration points at
    pub fn target(&self) -> UpdateTarget {
        UpdateTarget::new(
            self.update_params.host.trim(),
            self.update_params.domain.trim(),
            self.update_params.password.clone(),
        )
    }

    /// Whether PASS and UPDATE lines are written to the audit log
    pub fn log_enabled(&self) -> bool {
        self.update_params.log
    }

    /// Whether verbose diagnostics were requested
    pub fn debug_enabled(&self) -> bool {
        self.update_params.debug
    }
}

/// The `updateParams` section
#[derive(Clone, Deserialize)]
pub struct UpdateParams {
    /// Zone, e.g. "example.net"
    pub domain: String,

    /// Host label inside the zone, e.g. "home"
    pub host: String,

    /// Dynamic DNS password issued by the provider
    pub password: String,

    /// Write PASS/UPDATE lines to the audit log
    #[serde(default)]
    pub log: bool,

    /// Verbose diagnostics
    #[serde(default)]
    pub debug: bool,
}

impl fmt::Debug for UpdateParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateParams")
            .field("domain", &self.domain)
            .field("host", &self.host)
            .field("password", &"<REDACTED>")
            .field("log", &self.log)
            .field("debug", &self.debug)
            .finish()
    }
}

/// The optional `settings` section
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// First IP discovery service
    #[serde(default = "default_primary_ip_url")]
    pub primary_ip_url: String,

    /// Alternate IP discovery service
    #[serde(default = "default_fallback_ip_url")]
    pub fallback_ip_url: String,

    /// Provider update endpoint (without query string)
    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    /// Audit log location
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Timeout for each outbound request or lookup
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Write a FAIL line when the provider rejects or fails an update
    #[serde(default = "default_log_update_failures")]
    pub log_update_failures: bool,
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("primaryIpUrl", &self.primary_ip_url),
            ("fallbackIpUrl", &self.fallback_ip_url),
            ("providerUrl", &self.provider_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::config(format!(
                    "settings.{name} must use HTTP or HTTPS scheme. Got: {url}"
                )));
            }
        }

        if self.log_file.as_os_str().is_empty() {
            return Err(Error::config("settings.logFile cannot be empty"));
        }

        if !(1..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(Error::config(format!(
                "settings.timeoutSecs must be between 1 and {MAX_TIMEOUT_SECS} seconds. Got: {}",
                self.timeout_secs
            )));
        }

        Ok(())
    }

    /// Per-call timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            primary_ip_url: default_primary_ip_url(),
            fallback_ip_url: default_fallback_ip_url(),
            provider_url: default_provider_url(),
            log_file: default_log_file(),
            timeout_secs: default_timeout_secs(),
            log_update_failures: default_log_update_failures(),
        }
    }
}

fn default_primary_ip_url() -> String {
    DEFAULT_PRIMARY_IP_URL.to_string()
}

fn default_fallback_ip_url() -> String {
    DEFAULT_FALLBACK_IP_URL.to_string()
}

fn default_provider_url() -> String {
    DEFAULT_PROVIDER_URL.to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_update_failures() -> bool {
    true
}

/// The DNS record one run reconciles
#[derive(Clone, PartialEq, Eq)]
pub struct UpdateTarget {
    host: String,
    domain: String,
    password: String,
}

impl UpdateTarget {
    /// Create a new target
    pub fn new(
        host: impl Into<String>,
        domain: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            domain: domain.into(),
            password: password.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Shared secret sent to the provider
    /// ⚠️ NEVER log this value
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Fully-qualified name, `host.domain`
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.host, self.domain)
    }
}

impl fmt::Debug for UpdateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateTarget")
            .field("host", &self.host)
            .field("domain", &self.domain)
            .field("password", &"<REDACTED>")
            .finish()
    }
}
