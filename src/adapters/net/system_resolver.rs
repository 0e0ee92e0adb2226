use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use crate::core::traits::resolver::Resolver;

/// Resolver backed by the platform's `getaddrinfo`.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
        Ok((host, port).to_socket_addrs()?.collect())
    }
}
