//! Reconciliation engine
//!
//! The Reconciler is responsible for:
//! - Discovering the public IP via IpSource
//! - Looking up the published record via HostResolver
//! - Pushing an update via DnsProvider when the two differ
//! - Recording the outcome in the AuditLog
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌─────────────┐
//! │  IpSource   │   │ HostResolver │   │ DnsProvider │
//! └─────────────┘   └──────────────┘   └─────────────┘
//!        │                 │                  ▲
//!        │ current IP      │ record set       │ only on mismatch
//!        ▼                 ▼                  │
//!      ┌─────────────────────────────────────────┐
//!      │               Reconciler                │
//!      └─────────────────────────────────────────┘
//!                          │
//!                          ▼
//!                   ┌─────────────┐
//!                   │  AuditLog   │
//!                   └─────────────┘
//! ```
//!
//! ## Run Flow
//!
//! 1. Resolve the public IP. On failure: FAIL entry, stop.
//! 2. Resolve `host.domain`. On failure: FAIL entry, stop.
//! 3. Compare the first DNS address with the public IP (exact string match).
//! 4. Equal: PASS entry (if logging is enabled).
//! 5. Different: push the update once. UPDATE entry on success (if logging
//!    is enabled), FAIL entry on failure (if failure logging is enabled).
//!
//! A failed audit write is reported and never changes the outcome.

use tracing::{debug, error, info};

use crate::config::{DdnsConfig, UpdateTarget};
use crate::error::Error;
use crate::traits::{
    AuditEntry, AuditLog, Clock, DnsProvider, HostResolver, IpSource, Severity, SystemClock,
};

/// Message recorded when no IP discovery service answered
pub const MSG_IP_FAILED: &str = "Failed to retrieve current public IP";

/// Message recorded when the hostname lookup failed
pub const MSG_DNS_FAILED: &str = "Could not find existing DNS entry";

/// Message recorded when DNS already matches
pub const MSG_MATCHED: &str = "DNS and current IP match so no update necessary";

/// Message recorded after a successful update
pub const MSG_UPDATED: &str = "DNS record updated";

/// Result of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// DNS already pointed at the public IP
    Matched {
        ip: String,
    },

    /// The provider accepted the new address
    Updated {
        previous_ip: String,
        new_ip: String,
    },

    /// The run stopped early or the provider refused the update
    Failed {
        message: String,
    },
}

impl UpdateOutcome {
    fn failed(message: impl Into<String>) -> Self {
        UpdateOutcome::Failed {
            message: message.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, UpdateOutcome::Failed { .. })
    }
}

/// Reconciles one DNS record against the public IP
///
/// All I/O goes through injected collaborators. Steps run strictly in
/// sequence; each collaborator bounds its own calls with a timeout.
pub struct Reconciler {
    /// Public IP discovery
    ip_source: Box<dyn IpSource>,

    /// Published record lookup
    resolver: Box<dyn HostResolver>,

    /// Provider update endpoint
    provider: Box<dyn DnsProvider>,

    /// Outcome sink
    audit_log: Box<dyn AuditLog>,

    /// Timestamp source for audit entries
    clock: Box<dyn Clock>,

    /// Write PASS/UPDATE entries
    log_enabled: bool,

    /// Write FAIL entries for provider failures
    log_update_failures: bool,
}

impl Reconciler {
    /// Create a new reconciler
    ///
    /// # Parameters
    ///
    /// - `ip_source`: Public IP discovery
    /// - `resolver`: Hostname lookup
    /// - `provider`: Provider update client
    /// - `audit_log`: Audit log sink
    /// - `config`: Supplies the audit gating flags
    pub fn new(
        ip_source: Box<dyn IpSource>,
        resolver: Box<dyn HostResolver>,
        provider: Box<dyn DnsProvider>,
        audit_log: Box<dyn AuditLog>,
        config: &DdnsConfig,
    ) -> Self {
        Self {
            ip_source,
            resolver,
            provider,
            audit_log,
            clock: Box::new(SystemClock),
            log_enabled: config.log_enabled(),
            log_update_failures: config.settings.log_update_failures,
        }
    }

    /// Replace the system clock
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run one reconciliation for `target`
    ///
    /// Never returns an error: every failure is folded into
    /// [`UpdateOutcome::Failed`].
    pub async fn reconcile(&self, target: &UpdateTarget) -> UpdateOutcome {
        let fqdn = target.fqdn();
        debug!("Updating {} Dyn DNS for: {}", self.provider.provider_name(), fqdn);

        // Step 1: public IP
        let current_ip = match self.ip_source.current().await {
            Ok(ip) => ip,
            Err(e) => {
                error!("{}: {}", MSG_IP_FAILED, e);
                self.record(Severity::Fail, &fqdn, None, None, MSG_IP_FAILED)
                    .await;
                return UpdateOutcome::failed(MSG_IP_FAILED);
            }
        };
        debug!("Current IP is {}", current_ip);

        // Step 2: published record
        let records = match self.resolver.resolve(&fqdn).await {
            Ok(records) => records,
            Err(e) => {
                error!("{}: {}", MSG_DNS_FAILED, e);
                self.record(
                    Severity::Fail,
                    &fqdn,
                    None,
                    Some(current_ip.as_str()),
                    MSG_DNS_FAILED,
                )
                .await;
                return UpdateOutcome::failed(MSG_DNS_FAILED);
            }
        };
        debug!("Current DNS entry is {:?}", records.addresses());

        // Step 3: compare against the first address only
        let published = records.current();
        if published == current_ip.as_str() {
            info!("{}", MSG_MATCHED);
            if self.log_enabled {
                self.record(
                    Severity::Pass,
                    &fqdn,
                    Some(published),
                    Some(current_ip.as_str()),
                    MSG_MATCHED,
                )
                .await;
            }
            return UpdateOutcome::Matched {
                ip: current_ip.to_string(),
            };
        }

        // Step 4: push the update
        info!(
            "DNS entry for {} is {}, current IP is {}; updating",
            fqdn, published, current_ip
        );
        match self.provider.push_update(target, &current_ip).await {
            Ok(()) => {
                info!("Update Successful: {} -> {}", fqdn, current_ip);
                if self.log_enabled {
                    self.record(
                        Severity::Update,
                        &fqdn,
                        Some(published),
                        Some(current_ip.as_str()),
                        MSG_UPDATED,
                    )
                    .await;
                }
                UpdateOutcome::Updated {
                    previous_ip: published.to_string(),
                    new_ip: current_ip.to_string(),
                }
            }
            Err(e) => {
                error!(
                    "Update of {} via {} failed: {}",
                    fqdn,
                    self.provider.provider_name(),
                    e
                );
                let message = match e {
                    Error::ProviderRejected(message) => message,
                    other => other.to_string(),
                };
                if self.log_update_failures {
                    self.record(
                        Severity::Fail,
                        &fqdn,
                        Some(published),
                        Some(current_ip.as_str()),
                        &message,
                    )
                    .await;
                }
                UpdateOutcome::Failed { message }
            }
        }
    }

    /// Append an audit entry, reporting but swallowing write failures
    async fn record(
        &self,
        severity: Severity,
        fqdn: &str,
        old_ip: Option<&str>,
        new_ip: Option<&str>,
        message: &str,
    ) {
        let entry = AuditEntry {
            severity,
            timestamp: self.clock.now(),
            fqdn: fqdn.to_string(),
            old_ip: old_ip.map(str::to_string),
            new_ip: new_ip.map(str::to_string),
            message: message.to_string(),
        };

        if let Err(e) = self.audit_log.append(&entry).await {
            error!("could not add log entry: {}", e);
        }
    }
}
