//! In-process SNMP agent for testing.
//!
//! Answers v1/v2c GET requests from a fixed data set. Agents bind to
//! ephemeral localhost ports and stop when dropped.

use crate::common::fixtures;

use bytes::Bytes;
use snmp_adapter::message::{CommunityMessage, Message};
use snmp_adapter::{ErrorStatus, Oid, Pdu, PduType, Value, VarBind, Version};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// An in-process SNMP agent for testing.
///
/// ```ignore
/// let agent = TestAgent::new().await;
/// let client = Client::builder(agent.addr().to_string(), Auth::v2c("public"))
///     .connect().await?;
/// let vb = client.get(&oid!(1,3,6,1,2,1,1,1,0)).await?;
/// ```
pub struct TestAgent {
    addr: SocketAddr,
    requests: Arc<AtomicUsize>,
    silent: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl TestAgent {
    /// Agent with the system group fixture and community `public`.
    pub async fn new() -> Self {
        Self::builder().build().await
    }

    pub async fn with_data(data: BTreeMap<Oid, Value>) -> Self {
        Self::builder().data(data).build().await
    }

    pub fn builder() -> TestAgentBuilder {
        TestAgentBuilder {
            data: fixtures::system_mib(),
            community: Bytes::from_static(b"public"),
            drop_first: 0,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Datagrams received so far, including dropped and rejected ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Stop answering. The port stays bound until drop, so clients time out.
    pub fn stop(&self) {
        self.silent.store(true, Ordering::SeqCst);
    }
}

impl Drop for TestAgent {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct TestAgentBuilder {
    data: BTreeMap<Oid, Value>,
    community: Bytes,
    drop_first: usize,
}

impl TestAgentBuilder {
    pub fn data(mut self, data: BTreeMap<Oid, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn insert(mut self, oid: Oid, value: impl Into<Value>) -> Self {
        self.data.insert(oid, value.into());
        self
    }

    pub fn community(mut self, community: &'static str) -> Self {
        self.community = Bytes::from_static(community.as_bytes());
        self
    }

    /// Ignore the first `n` datagrams, to exercise client retries.
    pub fn drop_first(mut self, n: usize) -> Self {
        self.drop_first = n;
        self
    }

    pub async fn build(self) -> TestAgent {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test agent");
        let addr = socket.local_addr().expect("test agent address");
        let requests = Arc::new(AtomicUsize::new(0));

        let TestAgentBuilder {
            data,
            community,
            drop_first,
        } = self;
        let silent = Arc::new(AtomicBool::new(false));
        let muted = silent.clone();
        let counter = requests.clone();
        let task = tokio::spawn(async move {
            let mut buf = vec![0u8; 65535];
            loop {
                let Ok((len, source)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if seen <= drop_first || muted.load(Ordering::SeqCst) {
                    continue;
                }

                let datagram = Bytes::copy_from_slice(&buf[..len]);
                let Ok(Message::Community(request)) = Message::decode(datagram, source) else {
                    continue;
                };
                if request.community != community || request.pdu.pdu_type != PduType::GetRequest {
                    continue;
                }

                let response = respond(&data, request.version, &request.pdu);
                let reply =
                    CommunityMessage::new(request.version, request.community.clone(), response);
                let _ = socket.send_to(&reply.encode(), source).await;
            }
        });

        TestAgent {
            addr,
            requests,
            silent,
            task,
        }
    }
}

/// v2c reports missing objects per varbind; v1 fails the whole request
/// with noSuchName at the first missing one.
fn respond(data: &BTreeMap<Oid, Value>, version: Version, request: &Pdu) -> Pdu {
    let mut response = request.to_response();
    for (i, vb) in request.varbinds.iter().enumerate() {
        match data.get(&vb.oid) {
            Some(value) => response.varbinds[i] = VarBind::new(vb.oid.clone(), value.clone()),
            None if version == Version::V1 => {
                return request.to_error_response(ErrorStatus::NoSuchName, i as i32 + 1);
            }
            None => response.varbinds[i] = VarBind::new(vb.oid.clone(), Value::NoSuchInstance),
        }
    }
    response
}
