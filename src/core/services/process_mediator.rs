use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::errors::{GateError, Result};
use crate::core::models::audit_entry::AuditEntry;
use crate::core::models::platform::Platform;
use crate::core::services::policy_engine::PolicyEngine;
use crate::core::traits::audit::AuditLog;
use crate::core::traits::identity::HostIdentity;

/// Starts allow-listed executables as detached children.
///
/// The mediator's job ends once the child is launched: it keeps nothing
/// but the pid, never collects output, and never reports an exit status.
pub struct ProcessMediator {
    platform: Platform,
    policy: Arc<PolicyEngine>,
    audit: Arc<dyn AuditLog>,
    identity: Arc<dyn HostIdentity>,
}

impl ProcessMediator {
    pub fn new(
        platform: Platform,
        policy: Arc<PolicyEngine>,
        audit: Arc<dyn AuditLog>,
        identity: Arc<dyn HostIdentity>,
    ) -> Self {
        Self {
            platform,
            policy,
            audit,
            identity,
        }
    }

    /// Validate `executable` against the platform allowlist and launch it.
    ///
    /// Returns the child's pid.
    pub fn spawn(&self, executable: &str, args: &[String]) -> Result<u32> {
        if self.platform == Platform::Unknown {
            warn!(executable, "process request rejected: unsupported platform");
            return Err(GateError::UnsupportedPlatform);
        }

        if !self.policy.is_allowed(self.platform, executable) {
            warn!(executable, platform = %self.platform, "process request rejected: not allowed");
            return Err(GateError::Forbidden);
        }

        let pid = launch_detached(executable, args)?;
        debug!(executable, pid, "process started");

        let entry = AuditEntry::process_start(executable, args, pid, self.identity.as_ref());
        self.audit.append(&entry)?;

        Ok(pid)
    }
}

/// Spawn with all standard streams on the null device, as the leader of a
/// new session so the child has no controlling terminal.
///
/// The `Child` handle is dropped without waiting; once the caller exits,
/// init adopts and reaps the child.
fn launch_detached(executable: &str, args: &[String]) -> Result<u32> {
    let mut cmd = Command::new(executable);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        // SAFETY: pre_exec runs in the forked child before exec. setsid is
        // async-signal-safe and touches no memory shared with the parent.
        unsafe {
            cmd.pre_exec(|| {
                if libc::setsid() == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
    }

    let child = cmd
        .spawn()
        .map_err(|source| GateError::SpawnFailed { source })?;
    Ok(child.id())
}
