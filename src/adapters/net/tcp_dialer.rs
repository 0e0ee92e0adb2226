use std::io;
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use crate::core::traits::dialer::{Connection, Dialer};

/// Dialer backed by `std::net::TcpStream`.
#[derive(Debug, Clone, Default)]
pub struct TcpDialer;

impl Dialer for TcpDialer {
    fn connect(&self, addr: &SocketAddr, timeout: Duration) -> io::Result<Box<dyn Connection>> {
        let stream = TcpStream::connect_timeout(addr, timeout)?;
        Ok(Box::new(stream))
    }
}

impl Connection for TcpStream {
    fn local_addr(&self) -> io::Result<SocketAddr> {
        TcpStream::local_addr(self)
    }

    fn set_write_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_write_timeout(self, timeout)
    }
}
