// # Host Resolver Trait
//
// Defines the interface for looking up the currently published addresses of
// a hostname.
//
// ## Implementations
//
// - System resolver: `ddns-dns-system` crate

use async_trait::async_trait;

/// Addresses returned by a hostname lookup, in resolver order
///
/// Never empty. Only the first entry is treated as the published record;
/// the order of the rest is resolver-dependent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecordSet {
    addresses: Vec<String>,
}

impl DnsRecordSet {
    /// Build a record set, `None` if `addresses` is empty
    pub fn new(addresses: Vec<String>) -> Option<Self> {
        if addresses.is_empty() {
            None
        } else {
            Some(Self { addresses })
        }
    }

    /// The address compared against the public IP
    pub fn current(&self) -> &str {
        &self.addresses[0]
    }

    /// All addresses in resolver order
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }
}

/// Trait for forward DNS lookups
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve `fqdn` to its A/AAAA addresses
    ///
    /// # Returns
    ///
    /// - `Ok(DnsRecordSet)`: At least one address
    /// - `Err(Error::DnsLookup)`: No records, resolver error, or timeout
    async fn resolve(&self, fqdn: &str) -> Result<DnsRecordSet, crate::Error>;
}
