//! Best-effort datagram transport for control commands.
//!
//! Connectionless, unordered, no retry and no acknowledgement: a successful
//! [`DatagramSender::send`] only guarantees the payload left the local stack.
//! Reliability, if ever needed, is layered above this crate; the control
//! protocol deliberately tolerates dropped commands (the operator presses
//! the key again).

use std::{io, net::SocketAddr, time::Duration};

use async_trait::async_trait;
use thiserror::Error;
use tokio::net::{lookup_host, UdpSocket};
use tracing::debug;

/// Control datagrams are tiny; anything larger than this is a caller bug and
/// is rejected before touching the socket.
pub const MAX_DATAGRAM_BYTES: usize = 512;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("endpoint unreachable: {0}")]
    Unreachable(#[source] io::Error),
    #[error("payload of {len} bytes exceeds the {max} byte datagram limit")]
    PayloadTooLarge { len: usize, max: usize },
    #[error("local resource exhaustion: {0}")]
    LocalResourceExhausted(#[source] io::Error),
}

fn classify(error: io::Error) -> TransportError {
    match error.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable
        | io::ErrorKind::AddrNotAvailable => TransportError::Unreachable(error),
        _ => TransportError::LocalResourceExhausted(error),
    }
}

/// Fire-and-forget sender bound to one endpoint.
#[async_trait]
pub trait DatagramSender: Send + Sync {
    async fn send(&self, payload: &[u8]) -> Result<(), TransportError>;
}

/// Receiving side of the channel. `Ok(None)` means the timeout elapsed with
/// nothing to read; `timeout == None` blocks until a datagram arrives.
#[async_trait]
pub trait DatagramReceiver: Send + Sync {
    async fn receive(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Option<(SocketAddr, Vec<u8>)>, TransportError>;
}

/// UDP sender with an ephemeral local port and a fixed target.
pub struct UdpSender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSender {
    pub async fn connect(target: &str) -> Result<Self, TransportError> {
        let target = lookup_host(target)
            .await
            .map_err(classify)?
            .next()
            .ok_or_else(|| {
                TransportError::Unreachable(io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    "target resolved to no addresses",
                ))
            })?;
        let bind_addr = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr).await.map_err(classify)?;
        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

#[async_trait]
impl DatagramSender for UdpSender {
    async fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        if payload.len() > MAX_DATAGRAM_BYTES {
            return Err(TransportError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_DATAGRAM_BYTES,
            });
        }
        let sent = self
            .socket
            .send_to(payload, self.target)
            .await
            .map_err(classify)?;
        debug!(bytes = sent, target = %self.target, "datagram sent");
        Ok(())
    }
}

/// UDP receiver bound to a fixed local address.
pub struct UdpReceiver {
    socket: UdpSocket,
}

impl UdpReceiver {
    /// Bind the receive endpoint. Failure here is a startup-time error the
    /// caller treats as fatal.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(addr).await.map_err(classify)?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        self.socket.local_addr().map_err(classify)
    }
}

#[async_trait]
impl DatagramReceiver for UdpReceiver {
    async fn receive(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Option<(SocketAddr, Vec<u8>)>, TransportError> {
        let mut buf = [0u8; MAX_DATAGRAM_BYTES];
        let received = match timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.socket.recv_from(&mut buf)).await {
                    Ok(result) => result.map_err(classify)?,
                    Err(_elapsed) => return Ok(None),
                }
            }
            None => self.socket.recv_from(&mut buf).await.map_err(classify)?,
        };
        let (len, peer) = received;
        Ok(Some((peer, buf[..len].to_vec())))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
