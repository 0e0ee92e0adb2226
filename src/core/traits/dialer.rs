use std::io::{self, Write};
use std::net::SocketAddr;
use std::time::Duration;

/// An established outbound connection.
pub trait Connection: Write + Send {
    /// Local address the OS bound for this connection.
    fn local_addr(&self) -> io::Result<SocketAddr>;

    /// Bound subsequent writes by `timeout`.
    fn set_write_timeout(&self, timeout: Option<Duration>) -> io::Result<()>;
}

/// Port for opening TCP connections within a time budget.
///
/// A connect that exceeds `timeout` must fail with
/// `io::ErrorKind::TimedOut`.
pub trait Dialer: Send + Sync {
    fn connect(&self, addr: &SocketAddr, timeout: Duration) -> io::Result<Box<dyn Connection>>;
}
