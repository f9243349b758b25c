//! SNMP value types.

use crate::ber::{Decoder, EncodeBuf, tag};
use crate::error::{DecodeErrorKind, Result};
use crate::oid::Oid;
use crate::util::encode_hex;
use bytes::Bytes;

/// SNMP value, including the SMIv2 application types and the v2c exceptions.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    Integer(i32),
    OctetString(Bytes),
    Null,
    ObjectIdentifier(Oid),
    /// IpAddress (4 bytes, network order)
    IpAddress([u8; 4]),
    Counter32(u32),
    /// Gauge32 / Unsigned32
    Gauge32(u32),
    /// Hundredths of a second.
    TimeTicks(u32),
    Opaque(Bytes),
    /// SNMPv2c only.
    Counter64(u64),
    /// The agent does not implement this object.
    NoSuchObject,
    /// The object exists but this instance does not.
    NoSuchInstance,
    EndOfMibView,
    /// Unrecognized tag, kept verbatim.
    Unknown { tag: u8, data: Bytes },
}

impl Value {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Any of the unsigned 32-bit types.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v),
            Value::Integer(v) if *v >= 0 => Some(*v as u32),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Counter64(v) => Some(*v),
            other => other.as_u32().map(u64::from),
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(data) | Value::Opaque(data) => Some(data),
            _ => None,
        }
    }

    /// OctetString contents when they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::OctetString(data) => std::str::from_utf8(data).ok(),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Value::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    pub fn as_ip(&self) -> Option<std::net::Ipv4Addr> {
        match self {
            Value::IpAddress(addr) => Some(std::net::Ipv4Addr::from(*addr)),
            _ => None,
        }
    }

    /// noSuchObject, noSuchInstance or endOfMibView.
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView
        )
    }

    pub fn encode(&self, buf: &mut EncodeBuf) {
        match self {
            Value::Integer(v) => buf.push_integer(*v),
            Value::OctetString(data) => buf.push_octet_string(data),
            Value::Null => buf.push_null(),
            Value::ObjectIdentifier(oid) => buf.push_oid(oid),
            Value::IpAddress(addr) => buf.push_ip_address(*addr),
            Value::Counter32(v) => buf.push_unsigned32(tag::application::COUNTER32, *v),
            Value::Gauge32(v) => buf.push_unsigned32(tag::application::GAUGE32, *v),
            Value::TimeTicks(v) => buf.push_unsigned32(tag::application::TIMETICKS, *v),
            Value::Opaque(data) => push_raw(buf, tag::application::OPAQUE, data),
            Value::Counter64(v) => buf.push_integer64(*v),
            Value::NoSuchObject => push_raw(buf, tag::context::NO_SUCH_OBJECT, &[]),
            Value::NoSuchInstance => push_raw(buf, tag::context::NO_SUCH_INSTANCE, &[]),
            Value::EndOfMibView => push_raw(buf, tag::context::END_OF_MIB_VIEW, &[]),
            Value::Unknown { tag, data } => push_raw(buf, *tag, data),
        }
    }

    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let tag = decoder.read_tag()?;
        let len = decoder.read_length()?;

        let value = match tag {
            tag::universal::INTEGER => Value::Integer(decoder.read_integer_value(len)?),
            tag::universal::OCTET_STRING => Value::OctetString(decoder.read_bytes(len)?),
            tag::universal::NULL => {
                if len != 0 {
                    return Err(decoder.malformed(DecodeErrorKind::InvalidNull));
                }
                Value::Null
            }
            tag::universal::OBJECT_IDENTIFIER => {
                Value::ObjectIdentifier(decoder.read_oid_value(len)?)
            }
            tag::application::IP_ADDRESS => Value::IpAddress(decoder.read_ip_address_value(len)?),
            tag::application::COUNTER32 => Value::Counter32(decoder.read_unsigned32_value(len)?),
            tag::application::GAUGE32 => Value::Gauge32(decoder.read_unsigned32_value(len)?),
            tag::application::TIMETICKS => Value::TimeTicks(decoder.read_unsigned32_value(len)?),
            tag::application::OPAQUE => Value::Opaque(decoder.read_bytes(len)?),
            tag::application::COUNTER64 => Value::Counter64(decoder.read_integer64_value(len)?),
            tag::context::NO_SUCH_OBJECT
            | tag::context::NO_SUCH_INSTANCE
            | tag::context::END_OF_MIB_VIEW => {
                // tolerate agents that pad the exception with content
                decoder.read_bytes(len)?;
                match tag {
                    tag::context::NO_SUCH_OBJECT => Value::NoSuchObject,
                    tag::context::NO_SUCH_INSTANCE => Value::NoSuchInstance,
                    _ => Value::EndOfMibView,
                }
            }
            _ => Value::Unknown {
                tag,
                data: decoder.read_bytes(len)?,
            },
        };
        Ok(value)
    }
}

fn push_raw(buf: &mut EncodeBuf, tag: u8, data: &[u8]) {
    buf.push_bytes(data);
    buf.push_length(data.len());
    buf.push_tag(tag);
}

/// True when every character is printable or common whitespace.
fn is_printable(s: &str) -> bool {
    s.chars()
        .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::OctetString(data) => match std::str::from_utf8(data) {
                Ok(s) if is_printable(s) => f.write_str(s),
                _ => write!(f, "0x{}", encode_hex(data)),
            },
            Value::Null => f.write_str(""),
            Value::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Value::IpAddress(addr) => {
                write!(f, "{}", std::net::Ipv4Addr::from(*addr))
            }
            // TimeTicks print as raw hundredths of a second.
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => write!(f, "{}", v),
            Value::Opaque(data) => write!(f, "0x{}", encode_hex(data)),
            Value::Counter64(v) => write!(f, "{}", v),
            Value::NoSuchObject => {
                f.write_str("No Such Object currently exists at this OID")
            }
            Value::NoSuchInstance => {
                f.write_str("No Such Instance currently exists at this OID")
            }
            Value::EndOfMibView => f.write_str("No more variables left in this MIB View"),
            Value::Unknown { tag, data } => {
                write!(f, "Unknown(tag=0x{:02X}, data=0x{})", tag, encode_hex(data))
            }
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::OctetString(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::OctetString(Bytes::from(s))
    }
}

impl From<Bytes> for Value {
    fn from(data: Bytes) -> Self {
        Value::OctetString(data)
    }
}

impl From<Oid> for Value {
    fn from(oid: Oid) -> Self {
        Value::ObjectIdentifier(oid)
    }
}

impl From<std::net::Ipv4Addr> for Value {
    fn from(addr: std::net::Ipv4Addr) -> Self {
        Value::IpAddress(addr.octets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    fn decode(bytes: &'static [u8]) -> Value {
        Value::decode(&mut Decoder::new(Bytes::from_static(bytes))).unwrap()
    }

    #[test]
    fn decodes_application_types() {
        assert_eq!(decode(&[0x41, 0x01, 0x2A]), Value::Counter32(42));
        assert_eq!(decode(&[0x42, 0x02, 0x00, 0xFF]), Value::Gauge32(255));
        assert_eq!(decode(&[0x43, 0x02, 0x01, 0x00]), Value::TimeTicks(256));
        assert_eq!(
            decode(&[0x40, 0x04, 10, 0, 0, 1]),
            Value::IpAddress([10, 0, 0, 1])
        );
        assert_eq!(
            decode(&[0x46, 0x05, 0x01, 0x00, 0x00, 0x00, 0x00]),
            Value::Counter64(1 << 32)
        );
    }

    #[test]
    fn decodes_exceptions_and_unknown_tags() {
        assert_eq!(decode(&[0x80, 0x00]), Value::NoSuchObject);
        assert_eq!(decode(&[0x81, 0x00]), Value::NoSuchInstance);
        assert_eq!(decode(&[0x82, 0x00]), Value::EndOfMibView);
        assert_eq!(
            decode(&[0x47, 0x01, 0x07]),
            Value::Unknown {
                tag: 0x47,
                data: Bytes::from_static(&[0x07])
            }
        );
    }

    #[test]
    fn encode_then_decode_keeps_value() {
        for value in [
            Value::Integer(-5),
            Value::from("Linux router 5.15"),
            Value::ObjectIdentifier(oid!(1, 3, 6, 1, 4, 1, 8072)),
            Value::Counter64(u64::MAX),
            Value::NoSuchInstance,
        ] {
            let mut buf = EncodeBuf::new();
            value.encode(&mut buf);
            let mut dec = Decoder::new(buf.finish());
            assert_eq!(Value::decode(&mut dec).unwrap(), value);
        }
    }

    #[test]
    fn display_matches_printed_output() {
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(
            Value::OctetString(Bytes::from_static(&[0x00, 0x1A, 0xFF])).to_string(),
            "0x001aff"
        );
        assert_eq!(Value::TimeTicks(8_640_123).to_string(), "8640123");
        assert_eq!(Value::IpAddress([192, 168, 0, 59]).to_string(), "192.168.0.59");
        assert_eq!(
            Value::NoSuchObject.to_string(),
            "No Such Object currently exists at this OID"
        );
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Counter32(7).as_u64(), Some(7));
        assert_eq!(Value::Integer(-1).as_u32(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert!(Value::EndOfMibView.is_exception());
        assert!(!Value::Null.is_exception());
    }
}
