//! Sends traps and informs the way a managed device would.

use bytes::Bytes;
use snmp_adapter::message::{CommunityMessage, TrapV1Message};
use snmp_adapter::{Oid, Pdu, PduType, TrapV1Pdu, VarBind};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

pub struct TrapSender {
    socket: UdpSocket,
    community: Bytes,
    target: SocketAddr,
}

impl TrapSender {
    pub async fn new(target: SocketAddr, community: &'static str) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("failed to bind trap sender");
        Self {
            socket,
            community: Bytes::from_static(community.as_bytes()),
            target,
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.socket.local_addr().expect("trap sender address")
    }

    pub async fn trap_v1(&self, trap: TrapV1Pdu) {
        let message = TrapV1Message::new(self.community.clone(), trap);
        self.send(&message.encode()).await;
    }

    pub async fn trap_v2c(&self, uptime: u32, trap_oid: Oid, payload: Vec<VarBind>) {
        let pdu = Pdu::notification(PduType::TrapV2, 1, uptime, trap_oid, payload);
        let message = CommunityMessage::v2c(self.community.clone(), pdu);
        self.send(&message.encode()).await;
    }

    /// Send an inform and wait up to `wait` for the acknowledgement.
    pub async fn inform(
        &self,
        request_id: i32,
        uptime: u32,
        trap_oid: Oid,
        payload: Vec<VarBind>,
        wait: Duration,
    ) -> Option<Pdu> {
        let pdu = Pdu::notification(PduType::InformRequest, request_id, uptime, trap_oid, payload);
        let message = CommunityMessage::v2c(self.community.clone(), pdu);
        self.send(&message.encode()).await;

        let mut buf = vec![0u8; 65535];
        let (len, _) = tokio::time::timeout(wait, self.socket.recv_from(&mut buf))
            .await
            .ok()?
            .ok()?;
        CommunityMessage::decode(Bytes::copy_from_slice(&buf[..len]))
            .ok()
            .map(CommunityMessage::into_pdu)
    }

    async fn send(&self, data: &[u8]) {
        self.socket
            .send_to(data, self.target)
            .await
            .expect("failed to send trap");
    }
}
