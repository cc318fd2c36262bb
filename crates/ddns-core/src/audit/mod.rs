// # Audit Log Implementations
//
// This module provides implementations of the AuditLog trait.

pub mod file;
pub mod memory;

pub use file::FileAuditLog;
pub use memory::MemoryAuditLog;
