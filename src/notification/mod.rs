//! SNMP notification receiver (RFC 3413 §3.4).
//!
//! Receives SNMPv1 Traps, SNMPv2c Traps and InformRequests on a UDP socket.
//! InformRequests are acknowledged with a Response carrying the same
//! request-id and varbinds.
//!
//! ```rust,no_run
//! use snmp_adapter::notification::NotificationReceiver;
//!
//! # async fn example() -> snmp_adapter::Result<()> {
//! let receiver = NotificationReceiver::builder()
//!     .bind("0.0.0.0:1162")
//!     .community("public")
//!     .build()
//!     .await?;
//!
//! loop {
//!     let (notification, source) = receiver.recv().await?;
//!     println!("{source}: {}", notification.trap_oid());
//! }
//! # }
//! ```

mod engine;
mod varbind;

pub use engine::LocalEngineId;

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use tokio::net::UdpSocket;
use tracing::instrument;

use crate::client::resolve_target;
use crate::error::{Error, Result};
use crate::message::{CommunityMessage, Message};
use crate::oid::Oid;
use crate::pdu::{PduType, TrapV1Pdu};
use crate::transport::MAX_DATAGRAM;
use crate::util::bind_udp_socket;
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;

use varbind::extract_notification_varbinds;

/// Standard port for notification receivers.
pub const DEFAULT_TRAP_PORT: u16 = 162;

/// Well-known OIDs used in notifications.
pub mod oids {
    use crate::oid;
    use crate::oid::Oid;

    /// sysUpTime.0, first varbind of every v2c notification.
    pub fn sys_uptime() -> Oid {
        oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
    }

    /// snmpTrapOID.0, second varbind of every v2c notification.
    pub fn snmp_trap_oid() -> Oid {
        oid!(1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0)
    }

    pub fn snmp_trap_enterprise() -> Oid {
        oid!(1, 3, 6, 1, 6, 3, 1, 1, 4, 3, 0)
    }

    /// snmpTrapAddress.0 (SNMP-COMMUNITY-MIB).
    pub fn snmp_trap_address() -> Oid {
        oid!(1, 3, 6, 1, 6, 3, 18, 1, 3, 0)
    }

    /// snmpTrapCommunity.0 (SNMP-COMMUNITY-MIB).
    pub fn snmp_trap_community() -> Oid {
        oid!(1, 3, 6, 1, 6, 3, 18, 1, 4, 0)
    }

    /// snmpTraps, parent of the generic trap OIDs.
    pub fn snmp_traps() -> Oid {
        oid!(1, 3, 6, 1, 6, 3, 1, 1, 5)
    }

    pub fn cold_start() -> Oid {
        oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 1)
    }

    pub fn link_down() -> Oid {
        oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 3)
    }

    pub fn link_up() -> Oid {
        oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 4)
    }
}

/// A received notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// SNMPv1 Trap-PDU.
    TrapV1 { community: Bytes, trap: TrapV1Pdu },

    /// SNMPv2c Trap (unconfirmed).
    TrapV2c {
        community: Bytes,
        /// sysUpTime.0, hundredths of a second.
        uptime: u32,
        trap_oid: Oid,
        /// Payload after sysUpTime.0 and snmpTrapOID.0.
        varbinds: Vec<VarBind>,
        request_id: i32,
    },

    /// SNMPv2c InformRequest. Already acknowledged when returned.
    InformV2c {
        community: Bytes,
        uptime: u32,
        trap_oid: Oid,
        varbinds: Vec<VarBind>,
        request_id: i32,
    },
}

impl Notification {
    /// snmpTrapOID.0, translated per RFC 3584 for v1 traps.
    pub fn trap_oid(&self) -> Oid {
        match self {
            Notification::TrapV1 { trap, .. } => trap.v2_trap_oid(),
            Notification::TrapV2c { trap_oid, .. } | Notification::InformV2c { trap_oid, .. } => {
                trap_oid.clone()
            }
        }
    }

    /// sysUpTime.0, or the v1 time-stamp.
    pub fn uptime(&self) -> u32 {
        match self {
            Notification::TrapV1 { trap, .. } => trap.time_stamp,
            Notification::TrapV2c { uptime, .. } | Notification::InformV2c { uptime, .. } => {
                *uptime
            }
        }
    }

    /// Payload varbinds only.
    pub fn varbinds(&self) -> &[VarBind] {
        match self {
            Notification::TrapV1 { trap, .. } => &trap.varbinds,
            Notification::TrapV2c { varbinds, .. } | Notification::InformV2c { varbinds, .. } => {
                varbinds
            }
        }
    }

    pub fn community(&self) -> &[u8] {
        match self {
            Notification::TrapV1 { community, .. }
            | Notification::TrapV2c { community, .. }
            | Notification::InformV2c { community, .. } => community,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Notification::InformV2c { .. })
    }

    pub fn version(&self) -> Version {
        match self {
            Notification::TrapV1 { .. } => Version::V1,
            Notification::TrapV2c { .. } | Notification::InformV2c { .. } => Version::V2c,
        }
    }

    /// The complete SNMPv2 varbind list (RFC 3584 §3.1).
    ///
    /// `sysUpTime.0`, `snmpTrapOID.0`, the payload, and for v1 traps also
    /// `snmpTrapAddress.0`, `snmpTrapCommunity.0` and `snmpTrapEnterprise.0`.
    pub fn full_varbinds(&self) -> Vec<VarBind> {
        let mut out = Vec::with_capacity(self.varbinds().len() + 5);
        out.push(VarBind::new(oids::sys_uptime(), Value::TimeTicks(self.uptime())));
        out.push(VarBind::new(
            oids::snmp_trap_oid(),
            Value::ObjectIdentifier(self.trap_oid()),
        ));
        out.extend_from_slice(self.varbinds());

        if let Notification::TrapV1 { community, trap } = self {
            out.push(VarBind::new(
                oids::snmp_trap_address(),
                Value::IpAddress(trap.agent_addr),
            ));
            out.push(VarBind::new(
                oids::snmp_trap_community(),
                Value::OctetString(community.clone()),
            ));
            out.push(VarBind::new(
                oids::snmp_trap_enterprise(),
                Value::ObjectIdentifier(trap.enterprise.clone()),
            ));
        }
        out
    }
}

/// Builder for [`NotificationReceiver`].
pub struct NotificationReceiverBuilder {
    bind_addr: String,
    community: Option<Bytes>,
    engine_id: Option<LocalEngineId>,
}

impl NotificationReceiverBuilder {
    /// Defaults: `0.0.0.0:162`, any community, a generated engine ID.
    pub fn new() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{DEFAULT_TRAP_PORT}"),
            community: None,
            engine_id: None,
        }
    }

    /// Local UDP address; a bare IP gets port 162.
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Only accept notifications carrying this community.
    pub fn community(mut self, community: impl Into<Bytes>) -> Self {
        self.community = Some(community.into());
        self
    }

    pub fn engine_id(mut self, engine_id: LocalEngineId) -> Self {
        self.engine_id = Some(engine_id);
        self
    }

    pub async fn build(self) -> Result<NotificationReceiver> {
        let bind_addr = resolve_target(&self.bind_addr, DEFAULT_TRAP_PORT)?;
        let network = |source| Error::Network {
            target: bind_addr,
            source,
        }
        .boxed();

        let socket = bind_udp_socket(bind_addr).map_err(network)?;
        let local_addr = socket.local_addr().map_err(network)?;

        tracing::debug!(target: "snmp_adapter::notification", { snmp.local_addr = %local_addr }, "notification receiver bound");

        Ok(NotificationReceiver {
            inner: Arc::new(ReceiverInner {
                socket,
                local_addr,
                community: self.community,
                engine_id: self.engine_id.unwrap_or_else(LocalEngineId::generate),
            }),
        })
    }
}

impl Default for NotificationReceiverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Listens for traps and informs on a UDP socket.
#[derive(Clone)]
pub struct NotificationReceiver {
    inner: Arc<ReceiverInner>,
}

struct ReceiverInner {
    socket: UdpSocket,
    local_addr: SocketAddr,
    community: Option<Bytes>,
    engine_id: LocalEngineId,
}

impl NotificationReceiver {
    pub fn builder() -> NotificationReceiverBuilder {
        NotificationReceiverBuilder::new()
    }

    /// Bind with default settings, accepting any community.
    pub async fn bind(addr: impl Into<String>) -> Result<Self> {
        Self::builder().bind(addr).build().await
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }

    /// SNMP engine ID this receiver reports for incoming notifications.
    pub fn engine_id(&self) -> &LocalEngineId {
        &self.inner.engine_id
    }

    /// Context name of received notifications; always empty for v1/v2c.
    pub fn context_name(&self) -> &str {
        ""
    }

    /// Wait for the next notification.
    ///
    /// Undecodable datagrams, non-notification PDUs and foreign communities
    /// are logged and skipped. Informs are acknowledged before returning.
    #[instrument(skip(self), err, fields(snmp.local_addr = %self.local_addr()))]
    pub async fn recv(&self) -> Result<(Notification, SocketAddr)> {
        let mut buf = vec![0u8; MAX_DATAGRAM];

        loop {
            let (len, source) = self
                .inner
                .socket
                .recv_from(&mut buf)
                .await
                .map_err(|source| Error::Network {
                    target: self.inner.local_addr,
                    source,
                })?;
            let data = Bytes::copy_from_slice(&buf[..len]);

            match self.handle(data, source).await {
                Ok(Some(notification)) => return Ok((notification, source)),
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(target: "snmp_adapter::notification", { snmp.source = %source, error = %e }, "failed to parse notification");
                }
            }
        }
    }

    /// Decode one datagram; `None` when it is not a notification for us.
    async fn handle(&self, data: Bytes, source: SocketAddr) -> Result<Option<Notification>> {
        let message = Message::decode(data, source)?;

        if let Some(expected) = &self.inner.community
            && message.community() != expected.as_ref()
        {
            tracing::debug!(target: "snmp_adapter::notification", { snmp.source = %source, community = %String::from_utf8_lossy(message.community()) }, "ignoring notification with unknown community");
            return Ok(None);
        }

        let msg = match message {
            Message::TrapV1(msg) => {
                tracing::debug!(target: "snmp_adapter::notification", { snmp.source = %source, snmp.generic_trap = msg.trap.generic_trap, snmp.specific_trap = msg.trap.specific_trap }, "received SNMPv1 trap");
                return Ok(Some(Notification::TrapV1 {
                    community: msg.community,
                    trap: msg.trap,
                }));
            }
            Message::Community(msg) => msg,
        };

        match msg.pdu.pdu_type {
            PduType::TrapV2 if msg.version == Version::V2c => {
                let (uptime, trap_oid, varbinds) = extract_notification_varbinds(&msg.pdu, source)?;
                tracing::debug!(target: "snmp_adapter::notification", { snmp.source = %source, snmp.trap_oid = %trap_oid }, "received SNMPv2c trap");
                Ok(Some(Notification::TrapV2c {
                    community: msg.community,
                    uptime,
                    trap_oid,
                    varbinds,
                    request_id: msg.pdu.request_id,
                }))
            }
            PduType::InformRequest if msg.version == Version::V2c => {
                let (uptime, trap_oid, varbinds) = extract_notification_varbinds(&msg.pdu, source)?;
                self.acknowledge(&msg, source).await?;
                tracing::debug!(target: "snmp_adapter::notification", { snmp.source = %source, snmp.trap_oid = %trap_oid, snmp.request_id = msg.pdu.request_id }, "received SNMPv2c inform");
                Ok(Some(Notification::InformV2c {
                    community: msg.community,
                    uptime,
                    trap_oid,
                    varbinds,
                    request_id: msg.pdu.request_id,
                }))
            }
            other => {
                tracing::debug!(target: "snmp_adapter::notification", { snmp.source = %source, snmp.pdu_type = %other, snmp.version = %msg.version }, "ignoring non-notification PDU");
                Ok(None)
            }
        }
    }

    async fn acknowledge(&self, inform: &CommunityMessage, source: SocketAddr) -> Result<()> {
        let response = CommunityMessage::new(
            inform.version,
            inform.community.clone(),
            inform.pdu.to_response(),
        );
        self.inner
            .socket
            .send_to(&response.encode(), source)
            .await
            .map_err(|e| Error::Network {
                target: source,
                source: e,
            })?;
        tracing::trace!(target: "snmp_adapter::notification", { snmp.source = %source, snmp.request_id = inform.pdu.request_id }, "sent inform response");
        Ok(())
    }
}
