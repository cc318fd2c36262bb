// # IP Source Trait
//
// Defines the interface for discovering the caller's public IP address.
//
// ## Implementations
//
// - HTTP "what is my IP" services: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// let source = /* IpSource implementation */;
// let ip = source.current().await?;
// println!("Public IP: {}", ip);
// ```

use async_trait::async_trait;
use std::fmt;

/// A public IP address as reported by a discovery service
///
/// The text is kept as-is apart from trimming surrounding whitespace; no
/// address parsing is performed. Comparison against DNS is exact string
/// equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedIp(String);

impl ResolvedIp {
    /// Build from a raw response body
    ///
    /// Returns `None` when nothing is left after trimming.
    pub fn from_body(body: &str) -> Option<Self> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for IP source implementations
///
/// An IP source answers one question per call: what is the caller's public
/// address right now. It does not cache, retry beyond its own configured
/// alternates, or decide whether DNS needs updating.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(ResolvedIp)`: The current IP address
    /// - `Err(Error::IpResolution)`: If no service produced an address
    async fn current(&self) -> Result<ResolvedIp, crate::Error>;
}
