//! Core traits for the DDNS updater
//!
//! This module defines the abstract interfaces the reconciler is built from.
//!
//! - [`IpSource`]: Discover the public IP address
//! - [`HostResolver`]: Look up the published DNS record
//! - [`DnsProvider`]: Push an update to the provider
//! - [`AuditLog`]: Record the outcome of a run
//! - [`Clock`]: Timestamps for audit entries

pub mod ip_source;
pub mod host_resolver;
pub mod dns_provider;
pub mod audit_log;
pub mod clock;

pub use ip_source::{IpSource, ResolvedIp};
pub use host_resolver::{HostResolver, DnsRecordSet};
pub use dns_provider::DnsProvider;
pub use audit_log::{AuditLog, AuditEntry, Severity, UNKNOWN_IP};
pub use clock::{Clock, SystemClock};
