use std::io;
use std::net::SocketAddr;

/// Port for turning a host name and port into candidate socket addresses.
///
/// Implementations may block for as long as the underlying lookup takes;
/// callers that need a deadline enforce it themselves.
pub trait Resolver: Send + Sync {
    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>>;
}
