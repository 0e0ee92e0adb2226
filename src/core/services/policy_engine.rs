use std::collections::{BTreeSet, HashMap};

use crate::core::models::platform::Platform;

/// Executables allowed on macOS when no configuration overrides them.
pub const DEFAULT_MACOS_ALLOWLIST: &[&str] =
    &["/bin/ls", "/bin/bash", "/usr/bin/python3", "/bin/sleep"];

/// Executables allowed on Linux when no configuration overrides them.
pub const DEFAULT_LINUX_ALLOWLIST: &[&str] =
    &["/bin/ls", "/usr/bin/echo", "/usr/bin/python3", "/bin/sleep"];

/// Per-platform allowlists of executable paths.
///
/// Built once at startup and never mutated. Matching is exact string
/// equality: no normalization, no symlink resolution, no wildcards.
/// Widening the match would change the policy, so keep it exact.
#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    allowlists: HashMap<Platform, BTreeSet<String>>,
}

impl PolicyEngine {
    /// Create an engine with no allowlists (every check denies).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: set the allowlist for one platform.
    pub fn with_allowlist<I, S>(mut self, platform: Platform, executables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowlists
            .insert(platform, executables.into_iter().map(Into::into).collect());
        self
    }

    /// The built-in macOS and Linux allowlists.
    pub fn builtin() -> Self {
        Self::new()
            .with_allowlist(Platform::Macos, DEFAULT_MACOS_ALLOWLIST.iter().copied())
            .with_allowlist(Platform::Linux, DEFAULT_LINUX_ALLOWLIST.iter().copied())
    }

    /// Whether `executable` may run on `platform`.
    ///
    /// Callers must reject `Platform::Unknown` before asking; it has no
    /// allowlist and always answers `false` here.
    pub fn is_allowed(&self, platform: Platform, executable: &str) -> bool {
        self.allowlists
            .get(&platform)
            .is_some_and(|set| set.contains(executable))
    }

    /// The allowlist for `platform`, in sorted order.
    pub fn allowlist(&self, platform: Platform) -> Vec<&str> {
        self.allowlists
            .get(&platform)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
