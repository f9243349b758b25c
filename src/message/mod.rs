//! SNMP message wrappers.
//!
//! Messages pair a PDU with the protocol version and community string.
//!
//! - [`CommunityMessage`]: v1/v2c requests, responses and v2c notifications
//! - [`TrapV1Message`]: the SNMPv1 Trap-PDU
//! - [`Message`]: what a notification receiver may see on the wire

mod community;

pub use community::{CommunityMessage, TrapV1Message};

use std::net::SocketAddr;

use crate::ber::{Decoder, tag};
use crate::error::{DecodeErrorKind, Result};
use crate::version::Version;
use bytes::Bytes;

/// Any decoded community-based message.
#[derive(Debug, Clone)]
pub enum Message {
    Community(CommunityMessage),
    TrapV1(TrapV1Message),
}

impl Message {
    /// Decode a datagram received from `source`, dispatching on version and PDU tag.
    pub fn decode(data: Bytes, source: SocketAddr) -> Result<Self> {
        let mut decoder = Decoder::with_target(data, source);
        let mut seq = decoder.read_sequence()?;
        let version = read_version(&mut seq)?;

        // The Trap-PDU follows the community string; peek past it.
        let mut probe = seq.clone();
        probe.read_octet_string()?;
        let is_v1_trap = probe.peek_tag() == Some(tag::pdu::TRAP_V1);

        match (version, is_v1_trap) {
            (Version::V1, true) => Ok(Message::TrapV1(TrapV1Message::decode_body(&mut seq)?)),
            (Version::V2c, true) => Err(seq.malformed(DecodeErrorKind::UnknownPduType(
                tag::pdu::TRAP_V1,
            ))),
            _ => Ok(Message::Community(CommunityMessage::decode_body(&mut seq, version)?)),
        }
    }

    pub fn version(&self) -> Version {
        match self {
            Message::Community(m) => m.version,
            Message::TrapV1(_) => Version::V1,
        }
    }

    pub fn community(&self) -> &[u8] {
        match self {
            Message::Community(m) => &m.community,
            Message::TrapV1(m) => &m.community,
        }
    }
}

impl From<CommunityMessage> for Message {
    fn from(msg: CommunityMessage) -> Self {
        Message::Community(msg)
    }
}

impl From<TrapV1Message> for Message {
    fn from(msg: TrapV1Message) -> Self {
        Message::TrapV1(msg)
    }
}

pub(crate) fn read_version(seq: &mut Decoder) -> Result<Version> {
    let version_num = seq.read_integer()?;
    Version::from_i32(version_num)
        .ok_or_else(|| seq.malformed(DecodeErrorKind::UnknownVersion(version_num)))
}
