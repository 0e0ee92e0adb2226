use std::ffi::OsString;

use crate::core::traits::identity::HostIdentity;

/// Identity of the current OS process, read from the environment and argv.
#[derive(Debug, Clone, Default)]
pub struct ProcessIdentity;

impl ProcessIdentity {
    pub fn new() -> Self {
        Self
    }
}

impl HostIdentity for ProcessIdentity {
    /// `$USER`, then `$LOGNAME`, then the numeric uid.
    fn username(&self) -> String {
        std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(fallback_username)
    }

    fn process_name(&self) -> String {
        std::env::args_os()
            .next()
            .and_then(|arg0| {
                std::path::Path::new(&arg0)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    }

    fn command_line(&self) -> String {
        join_args(std::env::args_os())
    }

    fn process_id(&self) -> u32 {
        std::process::id()
    }
}

/// Space-joined argv. Arguments that are not valid UTF-8 are rendered
/// lossily instead of failing.
fn join_args(args: impl IntoIterator<Item = OsString>) -> String {
    args.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(unix)]
fn fallback_username() -> String {
    // SAFETY: getuid() has no preconditions and cannot fail.
    let uid = unsafe { libc::getuid() };
    format!("uid:{uid}")
}

#[cfg(not(unix))]
fn fallback_username() -> String {
    "unknown".to_string()
}
