/// Port for the identity of the process performing privileged operations.
///
/// Injected into mediators so tests can supply a fixed identity.
pub trait HostIdentity: Send + Sync {
    /// Login name of the user running this process.
    fn username(&self) -> String;

    /// Base name of the running program.
    fn process_name(&self) -> String;

    /// Full invocation of the running program.
    fn command_line(&self) -> String;

    /// Id of the running process.
    fn process_id(&self) -> u32;
}
