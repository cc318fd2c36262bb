// # Memory Audit Log
//
// In-memory implementation of AuditLog.
//
// Entries are lost when the process exits. Useful for tests and for
// embedding the reconciler where the caller inspects the entries itself.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::audit_log::{AuditEntry, AuditLog};

/// In-memory audit log
///
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLog {
    inner: Arc<RwLock<Vec<AuditEntry>>>,
}

impl MemoryAuditLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in append order
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.inner.read().await.clone()
    }

    /// Entries rendered as log lines
    pub async fn lines(&self) -> Vec<String> {
        self.inner
            .read()
            .await
            .iter()
            .map(AuditEntry::to_line)
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn append(&self, entry: &AuditEntry) -> Result<(), Error> {
        self.inner.write().await.push(entry.clone());
        Ok(())
    }
}
