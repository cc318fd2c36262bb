// # Audit Log Trait
//
// Defines the interface for recording the outcome of each run.
//
// ## Purpose
//
// The audit log is the only thing that outlives a run. Operators read it to
// see when the address changed and when updates failed. It is append-only
// and line oriented:
//
// ```text
// PASS: 2026/10/18 21:04:05 home.example.net,198.51.100.9,198.51.100.9,DNS and current IP match so no update necessary
// UPDATE: 2026/10/18 22:04:05 home.example.net,198.51.100.9,198.51.100.12,DNS record updated
// FAIL: 2026/10/18 23:04:05 home.example.net,-,-,Failed to retrieve current public IP
// ```
//
// ## Implementations
//
// - File-based: [`crate::audit::FileAuditLog`]
// - In-memory: [`crate::audit::MemoryAuditLog`]

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::fmt;

/// Placeholder written for an address that is not known
pub const UNKNOWN_IP: &str = "-";

/// Timestamp layout of an audit line
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Line prefix of an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// DNS already matched the public IP
    Pass,
    /// DNS was updated
    Update,
    /// The run could not complete
    Fail,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Update => "UPDATE",
            Severity::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub severity: Severity,
    /// Local wall-clock time of the run
    pub timestamp: NaiveDateTime,
    pub fqdn: String,
    /// Address published in DNS before the run
    pub old_ip: Option<String>,
    /// Public address discovered by the run
    pub new_ip: Option<String>,
    pub message: String,
}

impl AuditEntry {
    /// Render the entry as a single log line (without the newline)
    ///
    /// Fields are flattened with [`field`] so every entry stays one line
    /// of exactly four comma-separated columns after the timestamp.
    pub fn to_line(&self) -> String {
        format!(
            "{}: {} {},{},{},{}",
            self.severity,
            self.timestamp.format(TIMESTAMP_FORMAT),
            field(&self.fqdn),
            field(self.old_ip.as_deref().unwrap_or(UNKNOWN_IP)),
            field(self.new_ip.as_deref().unwrap_or(UNKNOWN_IP)),
            field(&self.message)
        )
    }
}

/// Line breaks become spaces and commas become semicolons
fn field(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '\r' | '\n' => ' ',
            ',' => ';',
            c => c,
        })
        .collect()
}

/// Trait for audit log implementations
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append one entry
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The entry was recorded
    /// - `Err(Error::LogWrite)`: The entry could not be recorded
    async fn append(&self, entry: &AuditEntry) -> Result<(), crate::Error>;
}
