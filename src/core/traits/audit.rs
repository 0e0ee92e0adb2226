use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditEntry;

/// Port for recording and reading audit events.
pub trait AuditLog: Send + Sync {
    /// Append one entry. Concurrent callers, including other processes,
    /// never interleave their lines.
    fn append(&self, entry: &AuditEntry) -> Result<()>;

    /// Read every entry in append order, keeping only those whose
    /// `activity` equals `filter` when one is given.
    fn read_all(&self, filter: Option<&str>) -> Result<Vec<AuditEntry>>;
}
