//! SNMP Protocol Data Units (PDUs).

use crate::ber::{Decoder, EncodeBuf, tag};
use crate::error::{DecodeErrorKind, ErrorStatus, Result};
use crate::notification::oids;
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::{VarBind, decode_varbind_list, encode_varbind_list};

/// PDU type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PduType {
    GetRequest = tag::pdu::GET_REQUEST,
    GetNextRequest = tag::pdu::GET_NEXT_REQUEST,
    Response = tag::pdu::RESPONSE,
    SetRequest = tag::pdu::SET_REQUEST,
    InformRequest = tag::pdu::INFORM_REQUEST,
    TrapV2 = tag::pdu::TRAP_V2,
    Report = tag::pdu::REPORT,
}

impl PduType {
    /// Map a tag byte to a request/response PDU type.
    ///
    /// The v1 Trap-PDU (0xA4) and GetBulk (0xA5) have their own layouts and
    /// are not covered here.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            tag::pdu::GET_REQUEST => Some(Self::GetRequest),
            tag::pdu::GET_NEXT_REQUEST => Some(Self::GetNextRequest),
            tag::pdu::RESPONSE => Some(Self::Response),
            tag::pdu::SET_REQUEST => Some(Self::SetRequest),
            tag::pdu::INFORM_REQUEST => Some(Self::InformRequest),
            tag::pdu::TRAP_V2 => Some(Self::TrapV2),
            tag::pdu::REPORT => Some(Self::Report),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for PduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::GetRequest => "GetRequest",
            Self::GetNextRequest => "GetNextRequest",
            Self::Response => "Response",
            Self::SetRequest => "SetRequest",
            Self::InformRequest => "InformRequest",
            Self::TrapV2 => "SNMPv2-Trap",
            Self::Report => "Report",
        };
        f.write_str(name)
    }
}

/// Request/response PDU (RFC 3416 §3).
#[derive(Debug, Clone, PartialEq)]
pub struct Pdu {
    pub pdu_type: PduType,
    pub request_id: i32,
    /// 0 in requests, an [`ErrorStatus`] code in responses.
    pub error_status: i32,
    /// 1-based index of the offending varbind, 0 when none.
    pub error_index: i32,
    pub varbinds: Vec<VarBind>,
}

impl Pdu {
    pub fn get_request(request_id: i32, oids: &[Oid]) -> Self {
        Self {
            pdu_type: PduType::GetRequest,
            request_id,
            error_status: 0,
            error_index: 0,
            varbinds: oids.iter().cloned().map(VarBind::null).collect(),
        }
    }

    /// SNMPv2-Trap or InformRequest with the mandatory leading varbinds
    /// `sysUpTime.0` and `snmpTrapOID.0` (RFC 3416 §4.2.6).
    pub fn notification(
        pdu_type: PduType,
        request_id: i32,
        uptime: u32,
        trap_oid: Oid,
        payload: Vec<VarBind>,
    ) -> Self {
        let mut varbinds = Vec::with_capacity(payload.len() + 2);
        varbinds.push(VarBind::new(oids::sys_uptime(), Value::TimeTicks(uptime)));
        varbinds.push(VarBind::new(
            oids::snmp_trap_oid(),
            Value::ObjectIdentifier(trap_oid),
        ));
        varbinds.extend(payload);
        Self {
            pdu_type,
            request_id,
            error_status: 0,
            error_index: 0,
            varbinds,
        }
    }

    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_constructed(self.pdu_type.tag(), |buf| {
            encode_varbind_list(buf, &self.varbinds);
            buf.push_integer(self.error_index);
            buf.push_integer(self.error_status);
            buf.push_integer(self.request_id);
        });
    }

    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let tag = decoder.read_tag()?;
        let pdu_type = PduType::from_tag(tag)
            .ok_or_else(|| decoder.malformed(DecodeErrorKind::UnknownPduType(tag)))?;

        let len = decoder.read_length()?;
        let mut pdu = decoder.sub_decoder(len)?;

        let request_id = pdu.read_integer()?;
        let error_status = pdu.read_integer()?;
        let error_index = pdu.read_integer()?;
        let varbinds = decode_varbind_list(&mut pdu)?;

        Ok(Pdu {
            pdu_type,
            request_id,
            error_status,
            error_index,
            varbinds,
        })
    }

    pub fn is_error(&self) -> bool {
        self.error_status != 0
    }

    pub fn error_status_enum(&self) -> ErrorStatus {
        ErrorStatus::from_i32(self.error_status)
    }

    /// Response acknowledging this PDU: same request-id and varbinds, no error.
    pub fn to_response(&self) -> Self {
        Self {
            pdu_type: PduType::Response,
            request_id: self.request_id,
            error_status: 0,
            error_index: 0,
            varbinds: self.varbinds.clone(),
        }
    }

    /// Response reporting `status` at `error_index`.
    pub fn to_error_response(&self, status: ErrorStatus, error_index: i32) -> Self {
        Self {
            error_status: status.as_i32(),
            error_index,
            ..self.to_response()
        }
    }
}

/// SNMPv1 generic trap types (RFC 1157 §4.1.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum GenericTrap {
    ColdStart = 0,
    WarmStart = 1,
    LinkDown = 2,
    LinkUp = 3,
    AuthenticationFailure = 4,
    EgpNeighborLoss = 5,
    /// See `specific_trap`.
    EnterpriseSpecific = 6,
}

impl GenericTrap {
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::ColdStart),
            1 => Some(Self::WarmStart),
            2 => Some(Self::LinkDown),
            3 => Some(Self::LinkUp),
            4 => Some(Self::AuthenticationFailure),
            5 => Some(Self::EgpNeighborLoss),
            6 => Some(Self::EnterpriseSpecific),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// SNMPv1 Trap-PDU (RFC 1157 §4.1.6).
#[derive(Debug, Clone, PartialEq)]
pub struct TrapV1Pdu {
    /// sysObjectID of the sender.
    pub enterprise: Oid,
    pub agent_addr: [u8; 4],
    pub generic_trap: i32,
    pub specific_trap: i32,
    /// sysUpTime of the sender, in hundredths of a second.
    pub time_stamp: u32,
    pub varbinds: Vec<VarBind>,
}

impl TrapV1Pdu {
    pub fn new(
        enterprise: Oid,
        agent_addr: [u8; 4],
        generic_trap: GenericTrap,
        specific_trap: i32,
        time_stamp: u32,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self {
            enterprise,
            agent_addr,
            generic_trap: generic_trap.as_i32(),
            specific_trap,
            time_stamp,
            varbinds,
        }
    }

    pub fn is_enterprise_specific(&self) -> bool {
        self.generic_trap == GenericTrap::EnterpriseSpecific.as_i32()
    }

    /// The equivalent SNMPv2 snmpTrapOID.0 value (RFC 3584 §3.1).
    ///
    /// ```rust
    /// use snmp_adapter::pdu::{GenericTrap, TrapV1Pdu};
    /// use snmp_adapter::oid;
    ///
    /// let trap = TrapV1Pdu::new(oid!(1, 3, 6, 1, 4, 1, 9999), [192, 168, 1, 1],
    ///     GenericTrap::LinkDown, 0, 12345, vec![]);
    /// assert_eq!(trap.v2_trap_oid(), oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 3));
    ///
    /// let trap = TrapV1Pdu::new(oid!(1, 3, 6, 1, 4, 1, 9999), [192, 168, 1, 1],
    ///     GenericTrap::EnterpriseSpecific, 42, 12345, vec![]);
    /// assert_eq!(trap.v2_trap_oid(), oid!(1, 3, 6, 1, 4, 1, 9999, 0, 42));
    /// ```
    pub fn v2_trap_oid(&self) -> Oid {
        if self.is_enterprise_specific() {
            self.enterprise.extend(&[0, self.specific_trap as u32])
        } else {
            oids::snmp_traps().child((self.generic_trap + 1) as u32)
        }
    }

    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_constructed(tag::pdu::TRAP_V1, |buf| {
            encode_varbind_list(buf, &self.varbinds);
            buf.push_unsigned32(tag::application::TIMETICKS, self.time_stamp);
            buf.push_integer(self.specific_trap);
            buf.push_integer(self.generic_trap);
            buf.push_ip_address(self.agent_addr);
            buf.push_oid(&self.enterprise);
        });
    }

    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let mut pdu = decoder.read_constructed(tag::pdu::TRAP_V1)?;

        let enterprise = pdu.read_oid()?;
        let agent_addr = pdu.read_ip_address()?;
        let generic_trap = pdu.read_integer()?;
        let specific_trap = pdu.read_integer()?;
        let time_stamp = pdu.read_unsigned32(tag::application::TIMETICKS)?;
        let varbinds = decode_varbind_list(&mut pdu)?;

        Ok(TrapV1Pdu {
            enterprise,
            agent_addr,
            generic_trap,
            specific_trap,
            time_stamp,
            varbinds,
        })
    }
}
