pub mod file;
pub mod log;
pub mod net;
pub mod policy;
pub mod process;
