use serde::Serialize;

/// Host platform tag used to select an allowlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Macos,
    Linux,
    Unknown,
}

impl Platform {
    /// Classify a host OS identity string (e.g. `darwin23`, `x86_64-linux-gnu`).
    pub fn classify(os_identity: &str) -> Self {
        let os = os_identity.to_ascii_lowercase();
        if os.contains("darwin") || os.contains("macos") {
            Platform::Macos
        } else if os.contains("linux") {
            Platform::Linux
        } else {
            Platform::Unknown
        }
    }

    /// Platform of the running host.
    pub fn current() -> Self {
        Self::classify(std::env::consts::OS)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Macos => "macos",
            Platform::Linux => "linux",
            Platform::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
