use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::core::errors::{GateError, Result};
use crate::core::models::audit_entry::{AuditEntry, NetworkDetails};
use crate::core::traits::audit::AuditLog;
use crate::core::traits::dialer::{Connection, Dialer};
use crate::core::traits::identity::HostIdentity;
use crate::core::traits::resolver::Resolver;

/// Budget for connecting and sending, unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Payload sent when the caller supplies none.
pub const DEFAULT_PAYLOAD: &str = "Hello, World!";

const PROTOCOL: &str = "TCP";

/// Sends a payload over a fresh TCP connection within a fixed time budget.
///
/// The budget covers name resolution, connect and write. The connection is
/// closed on every path. The audit entry is appended only when the send
/// completed.
pub struct NetworkMediator {
    resolver: Arc<dyn Resolver>,
    dialer: Arc<dyn Dialer>,
    timeout: Duration,
    audit: Arc<dyn AuditLog>,
    identity: Arc<dyn HostIdentity>,
}

impl NetworkMediator {
    pub fn new(
        resolver: Arc<dyn Resolver>,
        dialer: Arc<dyn Dialer>,
        timeout: Duration,
        audit: Arc<dyn AuditLog>,
        identity: Arc<dyn HostIdentity>,
    ) -> Self {
        Self {
            resolver,
            dialer,
            timeout,
            audit,
            identity,
        }
    }

    /// Connect to `address:port`, write `payload` in full, and return the
    /// number of bytes sent.
    pub fn send_tcp(
        &self,
        address: Option<&str>,
        port: Option<&str>,
        payload: Option<&str>,
    ) -> Result<u64> {
        let (address, port_text) = match (
            address.filter(|a| !a.is_empty()),
            port.filter(|p| !p.is_empty()),
        ) {
            (Some(address), Some(port)) => (address, port),
            _ => {
                warn!("network request rejected: missing destination");
                return Err(GateError::MissingField {
                    message: "Destination address and port are required".into(),
                });
            }
        };
        let port = parse_port(port_text)?;
        let payload = payload.unwrap_or(DEFAULT_PAYLOAD).as_bytes();

        let deadline = Instant::now() + self.timeout;

        let result = self.transmit(address, port, payload, deadline);
        let (conn, local) = match result {
            Ok(sent) => sent,
            Err(e) if is_timeout(&e) || Instant::now() >= deadline => {
                error!("Connection timed out to {address}:{port_text}");
                return Err(GateError::Timeout);
            }
            Err(e) => {
                error!("Failed to establish connection: {e}");
                return Err(GateError::ConnectionFailed {
                    reason: e.to_string(),
                });
            }
        };

        let data_sent = payload.len() as u64;
        debug!(address, port, data_sent, %local, "payload sent");

        let entry = AuditEntry::network_send(
            NetworkDetails {
                destination_address: address.to_string(),
                destination_port: port_text.to_string(),
                source_address: local.ip().to_string(),
                source_port: local.port().to_string(),
                data_sent,
                protocol: PROTOCOL.to_string(),
            },
            self.identity.as_ref(),
        );
        let logged = self.audit.append(&entry);
        drop(conn);
        logged?;

        Ok(data_sent)
    }

    /// Resolve, connect and write. On error any opened connection has
    /// already been dropped; on success the caller owns it.
    fn transmit(
        &self,
        address: &str,
        port: u16,
        payload: &[u8],
        deadline: Instant,
    ) -> io::Result<(Box<dyn Connection>, SocketAddr)> {
        let mut conn = self.connect(address, port, deadline)?;

        // A blocked write returns a partial count at its timeout, so the
        // timeout is re-armed with what is left of the budget each round.
        let mut written = 0;
        while written < payload.len() {
            conn.set_write_timeout(Some(remaining(deadline)?))?;
            match conn.write(&payload[written..]) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        conn.flush()?;

        let local = conn.local_addr()?;
        Ok((conn, local))
    }

    /// Try each resolved address in turn until one connects or the budget
    /// runs out.
    fn connect(
        &self,
        address: &str,
        port: u16,
        deadline: Instant,
    ) -> io::Result<Box<dyn Connection>> {
        let mut last_err = None;
        for addr in self.resolve(address, port, deadline)? {
            let budget = remaining(deadline)?;
            match self.dialer.connect(&addr, budget) {
                Ok(conn) => return Ok(conn),
                Err(e) => {
                    debug!(%addr, error = %e, "connect attempt failed");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses found for {address}"),
            )
        }))
    }

    /// Resolve on a helper thread and stop waiting at the deadline. A lookup
    /// still running then is abandoned; its thread exits when it returns.
    fn resolve(
        &self,
        address: &str,
        port: u16,
        deadline: Instant,
    ) -> io::Result<Vec<SocketAddr>> {
        let (tx, rx) = mpsc::channel();
        let resolver = Arc::clone(&self.resolver);
        let host = address.to_string();
        thread::Builder::new()
            .name("hostgate-resolve".into())
            .spawn(move || {
                // The receiver is gone if the caller already timed out.
                let _ = tx.send(resolver.resolve(&host, port));
            })?;

        match rx.recv_timeout(remaining(deadline)?) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "name resolution timed out",
            )),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::other("name resolution aborted")),
        }
    }
}

fn parse_port(port: &str) -> Result<u16> {
    let invalid = || {
        warn!(port, "network request rejected: invalid port");
        GateError::InvalidField {
            message: "Invalid destination port".into(),
        }
    };
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    port.parse().map_err(|_| invalid())
}

fn remaining(deadline: Instant) -> io::Result<Duration> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        return Err(io::Error::new(io::ErrorKind::TimedOut, "time budget exhausted"));
    }
    Ok(left)
}

/// Write timeouts surface as `WouldBlock` on Unix and `TimedOut` elsewhere.
fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
