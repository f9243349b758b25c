//! Scripted transport for client unit tests.

use super::Transport;
use crate::error::{Error, Result};
use crate::message::CommunityMessage;
use crate::oid::Oid;
use crate::pdu::{Pdu, PduType};
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;
use bytes::Bytes;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) enum MockResponse {
    /// Response whose request-id is rewritten to match the last request.
    Data(Bytes),
    /// Returned verbatim.
    RawData(Bytes),
    Timeout,
    IoError(String),
}

struct MockTransportInner {
    target: SocketAddr,
    responses: VecDeque<MockResponse>,
    requests: Vec<Bytes>,
    last_request_id: Option<i32>,
}

#[derive(Clone)]
pub(crate) struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

impl MockTransport {
    pub(crate) fn new(target: SocketAddr) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTransportInner {
                target,
                responses: VecDeque::new(),
                requests: Vec::new(),
                last_request_id: None,
            })),
        }
    }

    pub(crate) fn queue_response(&self, data: impl Into<Bytes>) {
        self.push(MockResponse::Data(data.into()));
    }

    pub(crate) fn queue_raw_response(&self, data: impl Into<Bytes>) {
        self.push(MockResponse::RawData(data.into()));
    }

    pub(crate) fn queue_timeout(&self) {
        self.push(MockResponse::Timeout);
    }

    pub(crate) fn queue_io_error(&self, msg: impl Into<String>) {
        self.push(MockResponse::IoError(msg.into()));
    }

    /// Requests sent so far, decoded.
    pub(crate) fn requests(&self) -> Vec<CommunityMessage> {
        let inner = self.inner.lock().unwrap();
        inner
            .requests
            .iter()
            .filter_map(|data| CommunityMessage::decode(data.clone()).ok())
            .collect()
    }

    fn push(&self, response: MockResponse) {
        self.inner.lock().unwrap().responses.push_back(response);
    }
}

impl Transport for MockTransport {
    async fn send(&self, data: &[u8]) -> Result<()> {
        let data = Bytes::copy_from_slice(data);
        let request_id = CommunityMessage::decode(data.clone())
            .ok()
            .map(|msg| msg.pdu.request_id);
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(data);
        inner.last_request_id = request_id;
        Ok(())
    }

    async fn recv(&self, _request_id: i32, timeout: Duration) -> Result<(Bytes, SocketAddr)> {
        let (response, target, last_request_id) = {
            let mut inner = self.inner.lock().unwrap();
            (
                inner.responses.pop_front(),
                inner.target,
                inner.last_request_id,
            )
        };

        match response {
            Some(MockResponse::Data(data)) => {
                match (CommunityMessage::decode(data.clone()), last_request_id) {
                    (Ok(mut msg), Some(id)) => {
                        msg.pdu.request_id = id;
                        Ok((msg.encode(), target))
                    }
                    _ => Ok((data, target)),
                }
            }
            Some(MockResponse::RawData(data)) => Ok((data, target)),
            Some(MockResponse::IoError(msg)) => Err(Error::Network {
                target,
                source: std::io::Error::other(msg),
            }
            .boxed()),
            Some(MockResponse::Timeout) | None => Err(Error::Timeout {
                target,
                elapsed: timeout,
                retries: 0,
            }
            .boxed()),
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.inner.lock().unwrap().target
    }

    fn local_addr(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }
}

/// Builds encoded Response messages.
pub(crate) struct ResponseBuilder {
    request_id: i32,
    varbinds: Vec<VarBind>,
    error_status: i32,
    error_index: i32,
}

impl ResponseBuilder {
    pub(crate) fn new(request_id: i32) -> Self {
        Self {
            request_id,
            varbinds: Vec::new(),
            error_status: 0,
            error_index: 0,
        }
    }

    pub(crate) fn varbind(mut self, oid: Oid, value: impl Into<Value>) -> Self {
        self.varbinds.push(VarBind::new(oid, value.into()));
        self
    }

    pub(crate) fn error(mut self, status: i32, index: i32) -> Self {
        self.error_status = status;
        self.error_index = index;
        self
    }

    pub(crate) fn build(self, version: Version, community: &str) -> Bytes {
        let pdu = Pdu {
            pdu_type: PduType::Response,
            request_id: self.request_id,
            error_status: self.error_status,
            error_index: self.error_index,
            varbinds: self.varbinds,
        };
        CommunityMessage::new(version, Bytes::copy_from_slice(community.as_bytes()), pdu).encode()
    }
}
