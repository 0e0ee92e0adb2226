use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::core::errors::{GateError, Result};
use crate::core::models::platform::Platform;
use crate::core::services::network_mediator::DEFAULT_TIMEOUT;
use crate::core::services::policy_engine::PolicyEngine;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "hostgate.toml";

/// Audit log location when `[audit]` is absent.
pub const DEFAULT_LOG_FILE: &str = "log/activity_log.json";

/// Top-level hostgate configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub audit: Option<AuditSection>,
    pub network: Option<NetworkSection>,
    pub policy: Option<PolicySection>,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit `path` must exist. Without one, `hostgate.toml` in the
    /// working directory is used if present, otherwise the built-in
    /// defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => {
                return Err(GateError::InvalidConfig {
                    detail: format!("config file not found: {}", p.display()),
                });
            }
            Some(p) => p,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(config_path)?;
        Self::parse(&content).map_err(|e| match e {
            GateError::InvalidConfig { detail } => GateError::InvalidConfig {
                detail: format!("{}: {detail}", config_path.display()),
            },
            other => other,
        })
    }

    /// Parse and validate TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| GateError::InvalidConfig {
            detail: format!("Failed to parse config: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(audit) = &self.audit
            && audit.log_file.trim().is_empty()
        {
            return Err(GateError::InvalidConfig {
                detail: "audit.log_file must not be empty".into(),
            });
        }

        if let Some(network) = &self.network
            && network.timeout_secs == 0
        {
            return Err(GateError::InvalidConfig {
                detail: "network.timeout_secs must be greater than zero".into(),
            });
        }

        if let Some(policy) = &self.policy {
            let lists = [("macos", &policy.macos), ("linux", &policy.linux)];
            for (platform, list) in lists {
                for exe in list.iter().flatten() {
                    if !Path::new(exe).is_absolute() {
                        return Err(GateError::InvalidConfig {
                            detail: format!(
                                "policy.{platform} entry '{exe}' must be an absolute path"
                            ),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Time budget for a network send.
    pub fn network_timeout(&self) -> Duration {
        self.network
            .as_ref()
            .map(|n| Duration::from_secs(n.timeout_secs))
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Build the immutable policy engine, using built-in allowlists for any
    /// platform the config does not list.
    pub fn policy_engine(&self) -> PolicyEngine {
        let mut engine = PolicyEngine::builtin();
        if let Some(policy) = &self.policy {
            if let Some(macos) = &policy.macos {
                engine = engine.with_allowlist(Platform::Macos, macos.iter().cloned());
            }
            if let Some(linux) = &policy.linux {
                engine = engine.with_allowlist(Platform::Linux, linux.iter().cloned());
            }
        }
        engine
    }
}

/// The `[audit]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSection {
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

/// The `[network]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSection {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// The `[policy]` section: per-platform executable allowlists.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicySection {
    pub macos: Option<Vec<String>>,
    pub linux: Option<Vec<String>>,
}
