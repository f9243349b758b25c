//! Transport layer abstraction.
//!
//! The client talks to one agent through a [`Transport`]. [`UdpTransport`] is
//! the production implementation; unit tests script responses with the mock.

mod udp;

#[cfg(test)]
mod mock;

pub use udp::UdpTransport;

#[cfg(test)]
pub(crate) use mock::{MockTransport, ResponseBuilder};

use crate::error::Result;
use bytes::Bytes;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

/// Largest datagram accepted from the network.
pub const MAX_DATAGRAM: usize = 65535;

/// Client-side transport to a single peer.
///
/// Implementations keep their state behind an `Arc`, so cloning is cheap and
/// clones share the same socket.
pub trait Transport: Send + Sync + Clone {
    /// Send one encoded message to the peer.
    fn send(&self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Wait up to `timeout` for the next datagram from the peer.
    ///
    /// `request_id` is only used for diagnostics; the client checks correlation.
    fn recv(
        &self,
        request_id: i32,
        timeout: Duration,
    ) -> impl Future<Output = Result<(Bytes, SocketAddr)>> + Send;

    fn peer_addr(&self) -> SocketAddr;

    fn local_addr(&self) -> SocketAddr;
}
