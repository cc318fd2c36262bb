// # DNS Provider Trait
//
// Defines the interface for pushing a new address to a dynamic-DNS provider.
//
// ## Implementations
//
// - Namecheap: `ddns-provider-namecheap` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{DnsProvider, UpdateTarget};
//
// let provider = /* DnsProvider implementation */;
// provider.push_update(&target, &new_ip).await?;
// ```

use async_trait::async_trait;

use crate::config::UpdateTarget;
use crate::traits::ip_source::ResolvedIp;

/// Trait for DNS provider implementations
///
/// # Rules
///
/// Providers are single-shot: one outbound request per call, no retries, no
/// audit writes, and no decision about whether an update is needed. That is
/// owned by the `Reconciler`.
///
/// The shared secret in the target must never be logged.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Point the target's record at `new_ip`
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The provider accepted the update
    /// - `Err(Error::ProviderRejected)`: The provider answered with an error
    /// - `Err(Error::ProviderFailed)`: Transport failure or unreadable answer
    async fn push_update(
        &self,
        target: &UpdateTarget,
        new_ip: &ResolvedIp,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
