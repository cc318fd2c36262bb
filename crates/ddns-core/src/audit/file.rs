// # File Audit Log
//
// Append-only, line-oriented implementation of AuditLog.
//
// ## Durability
//
// - The file is opened in append/create mode for every entry and closed
//   before `append` returns, on success and on error alike
// - Nothing is buffered between runs
// - Parent directories are not created; a missing directory is a write error
//
// ## File Format
//
// ```text
// <SEVERITY>: <YYYY/MM/DD HH:MM:SS> <fqdn>,<old ip>,<new ip>,<message>
// ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::traits::audit_log::{AuditEntry, AuditLog};

/// File-based audit log
///
/// # Example
///
/// ```rust,no_run
/// use ddns_core::audit::FileAuditLog;
///
/// let log = FileAuditLog::new("updateLog.txt");
/// assert_eq!(log.path().to_str(), Some("updateLog.txt"));
/// ```
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    /// Create an audit log writing to `path`
    ///
    /// The file is not touched until the first entry is appended.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditLog for FileAuditLog {
    async fn append(&self, entry: &AuditEntry) -> Result<(), Error> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        options.mode(0o644);

        let mut file = options.open(&self.path).await.map_err(|e| {
            Error::log_write(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let mut line = entry.to_line();
        line.push('\n');

        file.write_all(line.as_bytes()).await.map_err(|e| {
            Error::log_write(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        file.flush().await.map_err(|e| {
            Error::log_write(format!("Failed to flush {}: {}", self.path.display(), e))
        })?;

        tracing::trace!("Audit entry written to {}", self.path.display());
        Ok(())
    }
}
