//! Community-based message formats (v1/v2c).
//!
//! Both versions share `SEQUENCE { version INTEGER, community OCTET STRING, pdu }`
//! and differ only in the version number (0 for v1, 1 for v2c). SNMPv1 traps
//! carry the dedicated Trap-PDU layout instead of a request/response PDU.

use crate::ber::{Decoder, EncodeBuf};
use crate::pdu::{Pdu, TrapV1Pdu};
use crate::version::Version;
use crate::error::Result;
use bytes::Bytes;

/// Request, response or v2c notification with its community string.
#[derive(Debug, Clone)]
pub struct CommunityMessage {
    pub version: Version,
    pub community: Bytes,
    pub pdu: Pdu,
}

impl CommunityMessage {
    pub fn new(version: Version, community: impl Into<Bytes>, pdu: Pdu) -> Self {
        Self {
            version,
            community: community.into(),
            pdu,
        }
    }

    pub fn v1(community: impl Into<Bytes>, pdu: Pdu) -> Self {
        Self::new(Version::V1, community, pdu)
    }

    pub fn v2c(community: impl Into<Bytes>, pdu: Pdu) -> Self {
        Self::new(Version::V2c, community, pdu)
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = EncodeBuf::new();
        buf.push_sequence(|buf| {
            self.pdu.encode(buf);
            buf.push_octet_string(&self.community);
            buf.push_integer(self.version.as_i32());
        });
        buf.finish()
    }

    pub fn decode(data: Bytes) -> Result<Self> {
        let mut decoder = Decoder::new(data);
        let mut seq = decoder.read_sequence()?;
        let version = super::read_version(&mut seq)?;
        Self::decode_body(&mut seq, version)
    }

    /// Decode community and PDU once the version has been read.
    pub(crate) fn decode_body(seq: &mut Decoder, version: Version) -> Result<Self> {
        let community = seq.read_octet_string()?;
        let pdu = Pdu::decode(seq)?;
        Ok(Self {
            version,
            community,
            pdu,
        })
    }

    pub fn into_pdu(self) -> Pdu {
        self.pdu
    }
}

/// SNMPv1 Trap message.
#[derive(Debug, Clone)]
pub struct TrapV1Message {
    pub community: Bytes,
    pub trap: TrapV1Pdu,
}

impl TrapV1Message {
    pub fn new(community: impl Into<Bytes>, trap: TrapV1Pdu) -> Self {
        Self {
            community: community.into(),
            trap,
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = EncodeBuf::new();
        buf.push_sequence(|buf| {
            self.trap.encode(buf);
            buf.push_octet_string(&self.community);
            buf.push_integer(Version::V1.as_i32());
        });
        buf.finish()
    }

    pub(crate) fn decode_body(seq: &mut Decoder) -> Result<Self> {
        let community = seq.read_octet_string()?;
        let trap = TrapV1Pdu::decode(seq)?;
        Ok(Self { community, trap })
    }
}
