use crate::core::traits::identity::HostIdentity;

/// A host identity with fixed values, for tests.
#[derive(Debug, Clone)]
pub struct FixedIdentity {
    pub username: String,
    pub process_name: String,
    pub command_line: String,
    pub process_id: u32,
}

impl Default for FixedIdentity {
    fn default() -> Self {
        Self {
            username: "test_user".into(),
            process_name: "hostgate".into(),
            command_line: "hostgate file create".into(),
            process_id: 4242,
        }
    }
}

impl HostIdentity for FixedIdentity {
    fn username(&self) -> String {
        self.username.clone()
    }

    fn process_name(&self) -> String {
        self.process_name.clone()
    }

    fn command_line(&self) -> String {
        self.command_line.clone()
    }

    fn process_id(&self) -> u32 {
        self.process_id
    }
}
