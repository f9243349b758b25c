//! UDP transport.

use super::{MAX_DATAGRAM, Transport};
use crate::error::{Error, Result};
use crate::util::bind_ephemeral_udp_socket;
use bytes::Bytes;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout_at};

/// Connected UDP socket to one agent.
#[derive(Clone)]
pub struct UdpTransport {
    inner: Arc<UdpTransportInner>,
}

struct UdpTransportInner {
    socket: UdpSocket,
    target: SocketAddr,
    local_addr: SocketAddr,
}

impl UdpTransport {
    /// Bind an ephemeral port in the target's address family and connect it.
    pub async fn connect(target: SocketAddr) -> Result<Self> {
        tracing::debug!(target: "snmp_adapter::transport", { snmp.target = %target }, "connecting UDP transport");

        let network = |source| Error::Network { target, source }.boxed();

        let socket = bind_ephemeral_udp_socket(target).map_err(network)?;
        socket.connect(target).await.map_err(network)?;
        let local_addr = socket.local_addr().map_err(network)?;

        tracing::debug!(target: "snmp_adapter::transport", { snmp.target = %target, snmp.local_addr = %local_addr }, "UDP transport connected");

        Ok(Self {
            inner: Arc::new(UdpTransportInner {
                socket,
                target,
                local_addr,
            }),
        })
    }
}

impl Transport for UdpTransport {
    async fn send(&self, data: &[u8]) -> Result<()> {
        tracing::trace!(target: "snmp_adapter::transport", { snmp.target = %self.inner.target, snmp.bytes = data.len() }, "UDP send");
        match self.inner.socket.send(data).await {
            Ok(_) => Ok(()),
            // A pending ICMP port-unreachable from an earlier attempt
            Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
                tracing::trace!(target: "snmp_adapter::transport", { snmp.target = %self.inner.target }, "UDP send after port unreachable");
                Ok(())
            }
            Err(source) => Err(Error::Network {
                target: self.inner.target,
                source,
            }
            .boxed()),
        }
    }

    async fn recv(&self, request_id: i32, recv_timeout: Duration) -> Result<(Bytes, SocketAddr)> {
        let mut buf = vec![0u8; MAX_DATAGRAM];
        let deadline = Instant::now() + recv_timeout;

        loop {
            match timeout_at(deadline, self.inner.socket.recv(&mut buf)).await {
                Ok(Ok(len)) => {
                    buf.truncate(len);
                    tracing::trace!(target: "snmp_adapter::transport", { snmp.target = %self.inner.target, snmp.bytes = len }, "UDP recv complete");
                    return Ok((Bytes::from(buf), self.inner.target));
                }
                // Nothing listens on the peer port; same as no answer.
                Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => {
                    tracing::trace!(target: "snmp_adapter::transport", { snmp.target = %self.inner.target, snmp.request_id = request_id }, "UDP port unreachable");
                }
                Ok(Err(source)) => {
                    return Err(Error::Network {
                        target: self.inner.target,
                        source,
                    }
                    .boxed());
                }
                Err(_) => {
                    tracing::trace!(target: "snmp_adapter::transport", { snmp.target = %self.inner.target, snmp.request_id = request_id }, "UDP recv timeout");
                    return Err(Error::Timeout {
                        target: self.inner.target,
                        elapsed: recv_timeout,
                        retries: 0,
                    }
                    .boxed());
                }
            }
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.inner.target
    }

    fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }
}
