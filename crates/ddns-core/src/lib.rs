// # ddns-core
//
// Core library for the Namecheap dynamic-DNS updater.
//
// ## Architecture Overview
//
// This library provides the reconciliation procedure and the seams around it:
// - **IpSource**: Trait for discovering the public IP address
// - **HostResolver**: Trait for looking up the published DNS record
// - **DnsProvider**: Trait for pushing an update to the provider
// - **AuditLog**: Trait for the append-only outcome log
// - **Reconciler**: Runs IP → DNS → compare → update once per invocation
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from I/O implementations
// 2. **Injected Collaborators**: No global clients, loggers or clocks
// 3. **Library-First**: The binary only loads config and wires implementations
// 4. **Outcomes, not panics**: Operational failures become `UpdateOutcome::Failed`

pub mod traits;
pub mod engine;
pub mod config;
pub mod error;
pub mod audit;

// Re-export core types for convenience
pub use traits::{IpSource, HostResolver, DnsProvider, AuditLog, Clock};
pub use traits::{ResolvedIp, DnsRecordSet, AuditEntry, Severity, SystemClock};
pub use engine::{Reconciler, UpdateOutcome};
pub use config::{DdnsConfig, Settings, UpdateParams, UpdateTarget};
pub use error::{DnsFailure, Error, Result};
pub use audit::{FileAuditLog, MemoryAuditLog};
