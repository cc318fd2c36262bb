//! Error types for the DDNS updater
//!
//! This module defines all error types used throughout the workspace.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file does not exist or is not a regular file
    #[error("Cannot find config file ({})", .0.display())]
    ConfigMissing(PathBuf),

    /// The configuration file could not be read or parsed
    #[error("Failed to parse config file {}: {message}", .path.display())]
    ConfigParse {
        /// Path of the offending file
        path: PathBuf,
        /// Parser or I/O message
        message: String,
    },

    /// The configuration parsed but is not usable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Neither IP discovery service produced an address
    #[error("IP resolution failed: {0}")]
    IpResolution(String),

    /// The hostname lookup failed or returned nothing
    #[error("DNS lookup failed for {fqdn}: {reason}")]
    DnsLookup {
        /// Name that was looked up
        fqdn: String,
        /// Why the lookup failed
        reason: DnsFailure,
    },

    /// The provider answered but reported an error
    #[error("Provider rejected update: {0}")]
    ProviderRejected(String),

    /// The provider could not be reached or its answer could not be read
    #[error("Provider update failed: {0}")]
    ProviderFailed(String),

    /// Appending to the audit log failed
    #[error("Could not add log entry: {0}")]
    LogWrite(String),
}

/// Reason attached to [`Error::DnsLookup`]
///
/// Lets callers tell an absent record apart from a resolver that could not
/// answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsFailure {
    /// The name has no A/AAAA records
    NoRecords,
    /// The resolver did not answer within the configured timeout
    Timeout,
    /// The resolver returned an error
    Resolver(String),
}

impl fmt::Display for DnsFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsFailure::NoRecords => write!(f, "no records found"),
            DnsFailure::Timeout => write!(f, "lookup timed out"),
            DnsFailure::Resolver(msg) => write!(f, "{msg}"),
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a configuration parse error
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an IP resolution error
    pub fn ip_resolution(msg: impl Into<String>) -> Self {
        Self::IpResolution(msg.into())
    }

    /// Create a DNS lookup error
    pub fn dns_lookup(fqdn: impl Into<String>, reason: DnsFailure) -> Self {
        Self::DnsLookup {
            fqdn: fqdn.into(),
            reason,
        }
    }

    /// Create a provider rejection error
    pub fn provider_rejected(msg: impl Into<String>) -> Self {
        Self::ProviderRejected(msg.into())
    }

    /// Create a provider transport/parse error
    pub fn provider_failed(msg: impl Into<String>) -> Self {
        Self::ProviderFailed(msg.into())
    }

    /// Create a log write error
    pub fn log_write(msg: impl Into<String>) -> Self {
        Self::LogWrite(msg.into())
    }
}
