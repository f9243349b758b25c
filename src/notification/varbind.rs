//! Notification varbind layout.
//!
//! SNMPv2 notifications start with `sysUpTime.0` (TimeTicks) and
//! `snmpTrapOID.0` (OBJECT IDENTIFIER); the payload follows.

use std::net::SocketAddr;

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::pdu::Pdu;
use crate::value::Value;
use crate::varbind::VarBind;

/// Split a v2c notification PDU into uptime, trap OID and payload.
pub(crate) fn extract_notification_varbinds(
    pdu: &Pdu,
    source: SocketAddr,
) -> Result<(u32, Oid, Vec<VarBind>)> {
    let malformed = |reason: &str| {
        tracing::debug!(target: "snmp_adapter::notification", { snmp.source = %source }, "{}", reason);
        Error::MalformedResponse { target: source }.boxed()
    };

    let [first, second, payload @ ..] = pdu.varbinds.as_slice() else {
        return Err(malformed("notification has fewer than 2 varbinds"));
    };

    let Value::TimeTicks(uptime) = first.value else {
        return Err(malformed("first varbind is not TimeTicks"));
    };
    let Value::ObjectIdentifier(trap_oid) = &second.value else {
        return Err(malformed("second varbind is not an OBJECT IDENTIFIER"));
    };

    Ok((uptime, trap_oid.clone(), payload.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::oids;
    use crate::oid;
    use crate::pdu::PduType;

    fn source() -> SocketAddr {
        "10.0.0.1:40000".parse().unwrap()
    }

    #[test]
    fn splits_header_from_payload() {
        let payload = vec![VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 3), Value::Integer(3))];
        let pdu = Pdu::notification(PduType::TrapV2, 1, 4200, oids::link_down(), payload.clone());

        let (uptime, trap_oid, rest) = extract_notification_varbinds(&pdu, source()).unwrap();
        assert_eq!(uptime, 4200);
        assert_eq!(trap_oid, oids::link_down());
        assert_eq!(rest, payload);
    }

    #[test]
    fn rejects_short_or_mistyped_headers() {
        let mut pdu = Pdu::notification(PduType::TrapV2, 1, 1, oids::cold_start(), vec![]);
        pdu.varbinds[0].value = Value::Integer(1);
        assert!(extract_notification_varbinds(&pdu, source()).is_err());

        pdu.varbinds.truncate(1);
        assert!(extract_notification_varbinds(&pdu, source()).is_err());
    }
}
