//! Test doubles and common utilities for reconciliation contract tests
//!
//! Every double counts its calls so tests can assert which steps ran.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use ddns_core::error::{DnsFailure, Error, Result};
use ddns_core::traits::{
    AuditEntry, AuditLog, Clock, DnsProvider, DnsRecordSet, HostResolver, IpSource, ResolvedIp,
};
use ddns_core::{DdnsConfig, UpdateTarget};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IpSource returning a fixed answer
#[derive(Clone)]
pub struct FakeIpSource {
    answer: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl FakeIpSource {
    pub fn returning(ip: &str) -> Self {
        Self {
            answer: Some(ip.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Both discovery services unreachable
    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for FakeIpSource {
    async fn current(&self) -> Result<ResolvedIp> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .as_deref()
            .and_then(ResolvedIp::from_body)
            .ok_or_else(|| Error::ip_resolution("connection refused"))
    }
}

/// A HostResolver returning fixed addresses
#[derive(Clone)]
pub struct FakeHostResolver {
    addresses: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl FakeHostResolver {
    pub fn returning(addresses: &[&str]) -> Self {
        Self {
            addresses: addresses.iter().map(|a| a.to_string()).collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Name without any A/AAAA record
    pub fn no_records() -> Self {
        Self::returning(&[])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HostResolver for FakeHostResolver {
    async fn resolve(&self, fqdn: &str) -> Result<DnsRecordSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DnsRecordSet::new(self.addresses.clone())
            .ok_or_else(|| Error::dns_lookup(fqdn, DnsFailure::NoRecords))
    }
}

/// Arguments of one push_update call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpdate {
    pub host: String,
    pub domain: String,
    pub password: String,
    pub ip: String,
}

#[derive(Clone)]
enum ProviderReply {
    Accept,
    Reject(String),
    Unreachable,
}

/// A DnsProvider that records every call
///
/// Clones share the recorded calls, so a test keeps one clone and hands
/// the other to the Reconciler.
#[derive(Clone)]
pub struct RecordingProvider {
    reply: ProviderReply,
    updates: Arc<Mutex<Vec<RecordedUpdate>>>,
}

impl RecordingProvider {
    pub fn accepting() -> Self {
        Self::with_reply(ProviderReply::Accept)
    }

    pub fn rejecting(message: &str) -> Self {
        Self::with_reply(ProviderReply::Reject(message.to_string()))
    }

    pub fn unreachable() -> Self {
        Self::with_reply(ProviderReply::Unreachable)
    }

    fn with_reply(reply: ProviderReply) -> Self {
        Self {
            reply,
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn updates(&self) -> Vec<RecordedUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl DnsProvider for RecordingProvider {
    async fn push_update(&self, target: &UpdateTarget, new_ip: &ResolvedIp) -> Result<()> {
        self.updates.lock().unwrap().push(RecordedUpdate {
            host: target.host().to_string(),
            domain: target.domain().to_string(),
            password: target.password().to_string(),
            ip: new_ip.to_string(),
        });

        match &self.reply {
            ProviderReply::Accept => Ok(()),
            ProviderReply::Reject(message) => Err(Error::provider_rejected(message.clone())),
            ProviderReply::Unreachable => {
                Err(Error::provider_failed("HTTP request failed: connection refused"))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// An AuditLog whose every write fails
#[derive(Clone, Default)]
pub struct FailingAuditLog {
    attempts: Arc<AtomicUsize>,
}

impl FailingAuditLog {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AuditLog for FailingAuditLog {
    async fn append(&self, _entry: &AuditEntry) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::log_write("No space left on device"))
    }
}

/// A Clock stuck at one instant
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// 2026/03/14 09:26:53
pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 14)
        .unwrap()
        .and_hms_opt(9, 26, 53)
        .unwrap()
}

/// Configuration for home.example.net with the given audit flags
pub fn config_with(log: bool, log_update_failures: bool) -> DdnsConfig {
    DdnsConfig::from_json(&format!(
        r#"{{
            "updateParams": {{
                "domain": "example.net",
                "host": "home",
                "password": "secret",
                "log": {log}
            }},
            "settings": {{
                "logUpdateFailures": {log_update_failures}
            }}
        }}"#
    ))
    .unwrap()
}

/// Configuration with default failure logging
pub fn minimal_config(log: bool) -> DdnsConfig {
    config_with(log, true)
}
