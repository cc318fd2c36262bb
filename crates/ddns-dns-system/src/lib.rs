// # System Host Resolver
//
// Looks up the A/AAAA records currently published for a hostname, using the
// nameservers and hosts file from the system resolver configuration
// (`/etc/resolv.conf` on Unix).
//
// The lookup is bounded by a timeout. Addresses are returned in the order
// the resolver produced them, de-duplicated, rendered as plain strings so
// they can be compared with the body returned by an IP service.
//
// ## Failure classes
//
// - NXDOMAIN or an answer without A/AAAA records: `DnsFailure::NoRecords`
// - Lookup exceeding the timeout: `DnsFailure::Timeout`
// - Anything else (no nameserver reachable, SERVFAIL, ...): `DnsFailure::Resolver`

use async_trait::async_trait;
use ddns_core::traits::{DnsRecordSet, HostResolver};
use ddns_core::{DnsFailure, Error, Result};
use hickory_resolver::TokioResolver;
use hickory_resolver::config::LookupIpStrategy;
use std::time::Duration;

/// Resolver backed by the system's resolver configuration
#[derive(Clone)]
pub struct SystemHostResolver {
    resolver: TokioResolver,
    timeout: Duration,
}

impl std::fmt::Debug for SystemHostResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemHostResolver")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SystemHostResolver {
    /// Create a resolver from the system configuration
    ///
    /// Fails when the system resolver configuration cannot be read.
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut builder = TokioResolver::builder_tokio().map_err(|e| {
            Error::config(format!("Failed to read system resolver configuration: {}", e))
        })?;

        let options = builder.options_mut();
        options.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
        options.timeout = timeout;

        Ok(Self {
            resolver: builder.build(),
            timeout,
        })
    }
}

#[async_trait]
impl HostResolver for SystemHostResolver {
    async fn resolve(&self, fqdn: &str) -> Result<DnsRecordSet> {
        let lookup = match tokio::time::timeout(self.timeout, self.resolver.lookup_ip(fqdn)).await {
            Ok(Ok(lookup)) => lookup,
            Ok(Err(e)) if e.is_no_records_found() => {
                tracing::debug!("No A/AAAA records for {}: {}", fqdn, e);
                return Err(Error::dns_lookup(fqdn, DnsFailure::NoRecords));
            }
            Ok(Err(e)) => {
                tracing::debug!("Resolver error for {}: {}", fqdn, e);
                return Err(Error::dns_lookup(fqdn, DnsFailure::Resolver(e.to_string())));
            }
            Err(_) => {
                tracing::debug!("Lookup of {} exceeded {:?}", fqdn, self.timeout);
                return Err(Error::dns_lookup(fqdn, DnsFailure::Timeout));
            }
        };

        let mut addresses: Vec<String> = Vec::new();
        for ip in lookup.iter() {
            let ip = ip.to_string();
            if !addresses.contains(&ip) {
                addresses.push(ip);
            }
        }

        DnsRecordSet::new(addresses).ok_or_else(|| Error::dns_lookup(fqdn, DnsFailure::NoRecords))
    }
}
