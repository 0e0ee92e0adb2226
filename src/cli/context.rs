use std::path::Path;
use std::sync::Arc;

use crate::adapters::audit::ndjson_audit_log::NdjsonAuditLog;
use crate::adapters::identity::process_identity::ProcessIdentity;
use crate::adapters::net::system_resolver::SystemResolver;
use crate::adapters::net::tcp_dialer::TcpDialer;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::platform::Platform;
use crate::core::services::file_mediator::FileMediator;
use crate::core::services::network_mediator::NetworkMediator;
use crate::core::services::policy_engine::PolicyEngine;
use crate::core::services::process_mediator::ProcessMediator;

/// Everything a command needs, built once from the configuration.
pub struct Context {
    pub config: AppConfig,
    pub platform: Platform,
    pub policy: Arc<PolicyEngine>,
    pub audit: Arc<NdjsonAuditLog>,
    pub identity: Arc<ProcessIdentity>,
}

impl Context {
    /// Load the configuration and wire up the shared collaborators.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config = AppConfig::load(config_path.map(Path::new))?;
        let policy = Arc::new(config.policy_engine());
        let audit = Arc::new(NdjsonAuditLog::from_config(config.audit.as_ref()));

        Ok(Self {
            config,
            platform: Platform::current(),
            policy,
            audit,
            identity: Arc::new(ProcessIdentity::new()),
        })
    }

    pub fn file_mediator(&self) -> FileMediator {
        FileMediator::new(self.audit.clone(), self.identity.clone())
    }

    pub fn process_mediator(&self) -> ProcessMediator {
        ProcessMediator::new(
            self.platform,
            self.policy.clone(),
            self.audit.clone(),
            self.identity.clone(),
        )
    }

    pub fn network_mediator(&self) -> NetworkMediator {
        NetworkMediator::new(
            Arc::new(SystemResolver),
            Arc::new(TcpDialer),
            self.config.network_timeout(),
            self.audit.clone(),
            self.identity.clone(),
        )
    }
}
