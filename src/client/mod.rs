//! SNMP manager-side client (GET only).

mod auth;
mod builder;
mod retry;

pub use auth::Auth;
pub use builder::ClientBuilder;
pub use retry::{Backoff, Retry};

pub(crate) use builder::resolve_target;

use crate::error::{DecodeErrorKind, Error, Result};
use crate::message::CommunityMessage;
use crate::oid::Oid;
use crate::pdu::{Pdu, PduType};
use crate::transport::{Transport, UdpTransport};
use crate::varbind::VarBind;
use crate::version::Version;
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::{Duration, Instant};
use tracing::{Span, instrument};

/// Agent port used when a target names none.
pub const DEFAULT_PORT: u16 = 161;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_OIDS_PER_REQUEST: usize = 10;

/// SNMP client bound to one agent.
///
/// Cloning is cheap; clones share the socket and request-id counter.
#[derive(Clone)]
pub struct Client<T: Transport = UdpTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T: Transport> {
    transport: T,
    config: ClientConfig,
    request_id: AtomicI32,
}

/// Client configuration. Usually built through [`ClientBuilder`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub version: Version,
    pub community: Bytes,
    pub timeout: Duration,
    pub retry: Retry,
    pub max_oids_per_request: usize,
}

impl Default for ClientConfig {
    /// SNMPv2c, community "public", 5s timeout, 3 retries, 10 OIDs per request.
    fn default() -> Self {
        Self {
            version: Version::V2c,
            community: Bytes::from_static(b"public"),
            timeout: DEFAULT_TIMEOUT,
            retry: Retry::default(),
            max_oids_per_request: DEFAULT_MAX_OIDS_PER_REQUEST,
        }
    }
}

impl Client<UdpTransport> {
    /// Start building a UDP client for `target`.
    ///
    /// ```rust,no_run
    /// use snmp_adapter::{Auth, Client, oid};
    ///
    /// # async fn example() -> snmp_adapter::Result<()> {
    /// let client = Client::builder("192.168.0.59:161", Auth::v2c("public"))
    ///     .connect()
    ///     .await?;
    /// let sys_descr = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await?;
    /// println!("{sys_descr}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(target: impl Into<String>, auth: impl Into<Auth>) -> ClientBuilder {
        ClientBuilder::new(target, auth)
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        // Start somewhere unpredictable so restarts don't reuse ids.
        let seed = i32::from_be_bytes(crate::util::random_bytes::<4>()) & 0x3FFF_FFFF;
        Self {
            inner: Arc::new(ClientInner {
                transport,
                config,
                request_id: AtomicI32::new(seed),
            }),
        }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.inner.transport.peer_addr()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Next positive request id, wrapping before `i32::MAX`.
    fn next_request_id(&self) -> i32 {
        let id = self.inner.request_id.fetch_add(1, Ordering::Relaxed);
        (id & 0x7FFF_FFFF).max(1)
    }

    #[instrument(
        level = "debug",
        skip(self, data),
        fields(
            snmp.target = %self.peer_addr(),
            snmp.request_id = request_id,
            snmp.attempt = tracing::field::Empty,
            snmp.elapsed_ms = tracing::field::Empty,
        )
    )]
    async fn send_and_recv(&self, request_id: i32, data: &[u8]) -> Result<Pdu> {
        let start = Instant::now();
        let config = &self.inner.config;
        let max_attempts = config.retry.max_attempts;

        for attempt in 0..=max_attempts {
            Span::current().record("snmp.attempt", attempt);
            if attempt > 0 {
                tracing::debug!(target: "snmp_adapter::client", "retrying request");
            }

            tracing::trace!(target: "snmp_adapter::client", { snmp.bytes = data.len() }, "sending request");
            self.inner.transport.send(data).await?;

            match self.inner.transport.recv(request_id, config.timeout).await {
                Ok((response_data, _source)) => {
                    tracing::trace!(target: "snmp_adapter::client", { snmp.bytes = response_data.len() }, "received response");
                    Span::current().record("snmp.elapsed_ms", start.elapsed().as_millis() as u64);
                    return self.check_response(request_id, response_data);
                }
                Err(e) if matches!(*e, Error::Timeout { .. }) => {
                    if attempt < max_attempts {
                        let delay = config.retry.compute_delay(attempt);
                        if !delay.is_zero() {
                            tracing::debug!(target: "snmp_adapter::client", { delay_ms = delay.as_millis() as u64 }, "backing off");
                            tokio::time::sleep(delay).await;
                        }
                    }
                }
                Err(e) => {
                    Span::current().record("snmp.elapsed_ms", start.elapsed().as_millis() as u64);
                    return Err(e);
                }
            }
        }

        let elapsed = start.elapsed();
        Span::current().record("snmp.elapsed_ms", elapsed.as_millis() as u64);
        tracing::debug!(target: "snmp_adapter::client", { snmp.request_id = request_id, snmp.target = %self.peer_addr(), ?elapsed, retries = max_attempts }, "request timed out");
        Err(Error::Timeout {
            target: self.peer_addr(),
            elapsed,
            retries: max_attempts,
        }
        .boxed())
    }

    /// Decode a response datagram and turn protocol failures into errors.
    fn check_response(&self, request_id: i32, data: Bytes) -> Result<Pdu> {
        let target = self.peer_addr();
        let malformed = || Error::MalformedResponse { target }.boxed();

        let response = CommunityMessage::decode(data).map_err(|_| malformed())?;

        let expected_version = self.inner.config.version;
        if response.version != expected_version {
            tracing::warn!(target: "snmp_adapter::client", { ?expected_version, response_version = ?response.version, snmp.target = %target }, "version mismatch in response");
            return Err(malformed());
        }

        let pdu = response.into_pdu();
        if pdu.pdu_type != PduType::Response {
            tracing::warn!(target: "snmp_adapter::client", { snmp.pdu_type = %pdu.pdu_type, snmp.target = %target }, "unexpected PDU type in response");
            return Err(malformed());
        }
        if pdu.request_id != request_id {
            tracing::warn!(target: "snmp_adapter::client", { expected_request_id = request_id, actual_request_id = pdu.request_id, snmp.target = %target }, "request ID mismatch in response");
            return Err(malformed());
        }

        if pdu.is_error() {
            let status = pdu.error_status_enum();
            // error_index is 1-based; 0 means the whole PDU
            let oid = (pdu.error_index as usize)
                .checked_sub(1)
                .and_then(|idx| pdu.varbinds.get(idx))
                .map(|vb| vb.oid.clone());
            return Err(Error::Snmp {
                target,
                status,
                index: pdu.error_index.max(0) as u32,
                oid,
            }
            .boxed());
        }

        Ok(pdu)
    }

    async fn send_request(&self, pdu: Pdu) -> Result<Pdu> {
        tracing::debug!(target: "snmp_adapter::client", { snmp.pdu_type = %pdu.pdu_type, snmp.varbind_count = pdu.varbinds.len() }, "sending {} request", pdu.pdu_type);

        let request_id = pdu.request_id;
        let message = CommunityMessage::new(
            self.inner.config.version,
            self.inner.config.community.clone(),
            pdu,
        );
        let response = self.send_and_recv(request_id, &message.encode()).await?;

        tracing::debug!(target: "snmp_adapter::client", { snmp.varbind_count = response.varbinds.len() }, "received {} response", response.pdu_type);
        Ok(response)
    }

    /// GET a single OID.
    #[instrument(skip(self), err, fields(snmp.target = %self.peer_addr(), snmp.oid = %oid))]
    pub async fn get(&self, oid: &Oid) -> Result<VarBind> {
        let pdu = Pdu::get_request(self.next_request_id(), std::slice::from_ref(oid));
        let response = self.send_request(pdu).await?;

        response.varbinds.into_iter().next().ok_or_else(|| {
            tracing::debug!(target: "snmp_adapter::client", { snmp.target = %self.peer_addr(), kind = %DecodeErrorKind::EmptyResponse }, "empty GET response");
            Error::MalformedResponse {
                target: self.peer_addr(),
            }
            .boxed()
        })
    }

    /// GET several OIDs, in batches of at most `max_oids_per_request`.
    ///
    /// Results keep the input order. The first failing batch aborts the call;
    /// an `Error::Snmp` index then counts from the start of `oids`.
    #[instrument(skip(self, oids), err, fields(snmp.target = %self.peer_addr(), snmp.oid_count = oids.len()))]
    pub async fn get_many(&self, oids: &[Oid]) -> Result<Vec<VarBind>> {
        if oids.is_empty() {
            return Ok(Vec::new());
        }

        let max_per_request = self.inner.config.max_oids_per_request.max(1);
        let batch_total = oids.len().div_ceil(max_per_request);
        if batch_total > 1 {
            tracing::debug!(target: "snmp_adapter::client", { snmp.oid_count = oids.len(), snmp.max_per_request = max_per_request, snmp.batch_count = batch_total }, "splitting GET request into batches");
        }

        let mut results = Vec::with_capacity(oids.len());
        for (batch, chunk) in oids.chunks(max_per_request).enumerate() {
            if batch_total > 1 {
                tracing::debug!(target: "snmp_adapter::client", { snmp.batch = batch + 1, snmp.batch_total = batch_total, snmp.batch_oid_count = chunk.len() }, "sending GET batch");
            }
            let pdu = Pdu::get_request(self.next_request_id(), chunk);
            let response = self
                .send_request(pdu)
                .await
                .map_err(|e| offset_error_index(e, batch * max_per_request))?;
            results.extend(response.varbinds);
        }
        Ok(results)
    }
}

/// Shift a batch-relative error index by the batch's position in the request.
fn offset_error_index(mut error: Box<Error>, offset: usize) -> Box<Error> {
    if let Error::Snmp { index, .. } = error.as_mut() {
        if *index > 0 {
            *index += offset as u32;
        }
    }
    error
}
