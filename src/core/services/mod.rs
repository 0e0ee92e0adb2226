pub mod file_mediator;
pub mod network_mediator;
pub mod policy_engine;
pub mod process_mediator;
