use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::core::traits::identity::HostIdentity;

/// Kinds of privileged operation recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Create,
    Update,
    Delete,
    ProcessStart,
    NetworkSend,
}

impl Activity {
    /// The wire name, as stored in the `activity` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Create => "create",
            Activity::Update => "update",
            Activity::Delete => "delete",
            Activity::ProcessStart => "process_start",
            Activity::NetworkSend => "network_send",
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields carried by network entries only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDetails {
    pub destination_address: String,
    pub destination_port: String,
    pub source_address: String,
    pub source_port: String,
    pub data_sent: u64,
    pub protocol: String,
}

/// Operation-specific fields, flattened next to the common ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityDetails {
    File { full_path: String },
    Network(NetworkDetails),
    Process {},
}

/// A single entry in the audit log (JSON lines format).
///
/// Field names are part of the on-disk format and are read by external
/// tooling; do not rename them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub activity: Activity,
    pub username: String,
    pub process_name: String,
    pub command_line: String,
    pub process_id: u32,
    #[serde(flatten)]
    pub details: ActivityDetails,
}

/// Current time at the precision the log stores (whole seconds).
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

impl AuditEntry {
    /// Entry for a create/update/delete on `full_path`, attributed to the caller.
    pub fn file(activity: Activity, full_path: &str, identity: &dyn HostIdentity) -> Self {
        Self {
            timestamp: now(),
            activity,
            username: identity.username(),
            process_name: identity.process_name(),
            command_line: identity.command_line(),
            process_id: identity.process_id(),
            details: ActivityDetails::File {
                full_path: full_path.to_string(),
            },
        }
    }

    /// Entry for a spawned child. `process_id` is the child's pid.
    pub fn process_start(
        executable: &str,
        args: &[String],
        child_pid: u32,
        identity: &dyn HostIdentity,
    ) -> Self {
        let process_name = std::path::Path::new(executable)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| executable.to_string());

        let command_line = std::iter::once(executable)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            timestamp: now(),
            activity: Activity::ProcessStart,
            username: identity.username(),
            process_name,
            command_line,
            process_id: child_pid,
            details: ActivityDetails::Process {},
        }
    }

    /// Entry for a completed TCP send.
    pub fn network_send(details: NetworkDetails, identity: &dyn HostIdentity) -> Self {
        Self {
            timestamp: now(),
            activity: Activity::NetworkSend,
            username: identity.username(),
            process_name: identity.process_name(),
            command_line: identity.command_line(),
            process_id: identity.process_id(),
            details: ActivityDetails::Network(details),
        }
    }

    /// Whether the operation-specific fields are the ones `activity` carries.
    ///
    /// Decoding alone cannot tell: a file line missing `full_path` still
    /// parses, as process details.
    pub fn details_match_activity(&self) -> bool {
        matches!(
            (self.activity, &self.details),
            (
                Activity::Create | Activity::Update | Activity::Delete,
                ActivityDetails::File { .. }
            ) | (Activity::ProcessStart, ActivityDetails::Process {})
                | (Activity::NetworkSend, ActivityDetails::Network(_))
        )
    }
}
