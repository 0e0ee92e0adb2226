use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::errors::{GateError, Result};
use crate::core::models::audit_entry::{Activity, AuditEntry};
use crate::core::traits::audit::AuditLog;
use crate::core::traits::identity::HostIdentity;

/// Content written by `create` when the caller supplies none.
pub const DEFAULT_CREATE_CONTENT: &str = "Default content";

/// Content written by `update` when the caller supplies none.
pub const DEFAULT_UPDATE_CONTENT: &str = "Updated content";

/// Creates, overwrites and deletes files, auditing each performed change.
///
/// The audit entry is appended only after the filesystem operation
/// succeeded; rejected requests leave the log untouched.
pub struct FileMediator {
    audit: Arc<dyn AuditLog>,
    identity: Arc<dyn HostIdentity>,
}

impl FileMediator {
    pub fn new(audit: Arc<dyn AuditLog>, identity: Arc<dyn HostIdentity>) -> Self {
        Self { audit, identity }
    }

    /// Create `path` or truncate and overwrite it.
    pub fn create(&self, path: &str, content: Option<&str>) -> Result<()> {
        require_path(path)?;
        let content = content.unwrap_or(DEFAULT_CREATE_CONTENT);

        std::fs::write(path, content).map_err(|source| GateError::FileOperation {
            action: "create",
            source,
        })?;

        self.record(Activity::Create, path)
    }

    /// Overwrite an existing file. Fails with `NotFound` if it does not exist.
    pub fn update(&self, path: &str, content: Option<&str>) -> Result<()> {
        require_path(path)?;
        require_existing(path)?;
        let content = content.unwrap_or(DEFAULT_UPDATE_CONTENT);

        std::fs::write(path, content).map_err(|source| GateError::FileOperation {
            action: "update",
            source,
        })?;

        self.record(Activity::Update, path)
    }

    /// Remove an existing file. Fails with `NotFound` if it does not exist.
    pub fn delete(&self, path: &str) -> Result<()> {
        require_path(path)?;
        require_existing(path)?;

        std::fs::remove_file(path).map_err(|source| GateError::FileOperation {
            action: "delete",
            source,
        })?;

        self.record(Activity::Delete, path)
    }

    fn record(&self, activity: Activity, path: &str) -> Result<()> {
        debug!(%activity, path, "file operation performed");
        let entry = AuditEntry::file(activity, path, self.identity.as_ref());
        self.audit.append(&entry)
    }
}

fn require_path(path: &str) -> Result<()> {
    if path.is_empty() {
        warn!("file request rejected: empty path");
        return Err(GateError::MissingField {
            message: "File path is missing".into(),
        });
    }
    Ok(())
}

fn require_existing(path: &str) -> Result<()> {
    if !Path::new(path).exists() {
        warn!(path, "file request rejected: not found");
        return Err(GateError::file_not_found(path));
    }
    Ok(())
}
