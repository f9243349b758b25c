//! BER (Basic Encoding Rules) codec for the SNMP subset of ASN.1.
//!
//! Encoding fills an [`EncodeBuf`] back to front so that constructed types
//! can write their length after their contents are known. Decoding reads
//! zero-copy from `Bytes` through [`Decoder`].

mod decode;
mod length;

pub use decode::Decoder;
pub use length::{MAX_LENGTH, decode_length, encode_length};

use crate::oid::Oid;
use bytes::Bytes;

/// Tag constants.
pub mod tag {
    /// Universal class tags.
    pub mod universal {
        pub const INTEGER: u8 = 0x02;
        pub const OCTET_STRING: u8 = 0x04;
        pub const NULL: u8 = 0x05;
        pub const OBJECT_IDENTIFIER: u8 = 0x06;
        pub const SEQUENCE: u8 = 0x30;
    }

    /// SNMP application tags (RFC 2578).
    pub mod application {
        pub const IP_ADDRESS: u8 = 0x40;
        pub const COUNTER32: u8 = 0x41;
        pub const GAUGE32: u8 = 0x42;
        pub const TIMETICKS: u8 = 0x43;
        pub const OPAQUE: u8 = 0x44;
        pub const COUNTER64: u8 = 0x46;
    }

    /// Context-specific exception values (RFC 3416).
    pub mod context {
        pub const NO_SUCH_OBJECT: u8 = 0x80;
        pub const NO_SUCH_INSTANCE: u8 = 0x81;
        pub const END_OF_MIB_VIEW: u8 = 0x82;
    }

    /// PDU tags.
    pub mod pdu {
        pub const GET_REQUEST: u8 = 0xA0;
        pub const GET_NEXT_REQUEST: u8 = 0xA1;
        pub const RESPONSE: u8 = 0xA2;
        pub const SET_REQUEST: u8 = 0xA3;
        pub const TRAP_V1: u8 = 0xA4;
        pub const GET_BULK_REQUEST: u8 = 0xA5;
        pub const INFORM_REQUEST: u8 = 0xA6;
        pub const TRAP_V2: u8 = 0xA7;
        pub const REPORT: u8 = 0xA8;
    }
}

/// Reverse-filled encode buffer.
///
/// Every `push_*` prepends. Callers therefore push the fields of a
/// structure last-to-first, and [`finish`](Self::finish) returns the bytes
/// in wire order.
#[derive(Debug, Default)]
pub struct EncodeBuf {
    buf: Vec<u8>,
}

impl EncodeBuf {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(256),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Prepend raw bytes (given in wire order).
    pub fn push_bytes(&mut self, data: &[u8]) {
        self.buf.extend(data.iter().rev());
    }

    pub fn push_tag(&mut self, tag: u8) {
        self.buf.push(tag);
    }

    pub fn push_length(&mut self, len: usize) {
        let (bytes, count) = encode_length(len);
        self.buf.extend_from_slice(&bytes[..count]);
    }

    /// Prepend a constructed TLV whose contents are written by `f`.
    pub fn push_constructed(&mut self, tag: u8, f: impl FnOnce(&mut Self)) {
        let before = self.buf.len();
        f(self);
        let content_len = self.buf.len() - before;
        self.push_length(content_len);
        self.push_tag(tag);
    }

    pub fn push_sequence(&mut self, f: impl FnOnce(&mut Self)) {
        self.push_constructed(tag::universal::SEQUENCE, f);
    }

    /// INTEGER in minimal two's complement form.
    pub fn push_integer(&mut self, value: i32) {
        let bytes = value.to_be_bytes();
        let mut start = 0;
        while start < 3 {
            let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
                || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
            if !redundant {
                break;
            }
            start += 1;
        }
        self.push_bytes(&bytes[start..]);
        self.push_length(4 - start);
        self.push_tag(tag::universal::INTEGER);
    }

    /// Unsigned 32-bit application type (Counter32, Gauge32, TimeTicks).
    pub fn push_unsigned32(&mut self, tag: u8, value: u32) {
        self.push_unsigned(tag, u64::from(value));
    }

    /// Counter64.
    pub fn push_integer64(&mut self, value: u64) {
        self.push_unsigned(tag::application::COUNTER64, value);
    }

    fn push_unsigned(&mut self, tag: u8, value: u64) {
        let bytes = value.to_be_bytes();
        let first = bytes.iter().position(|&b| b != 0).unwrap_or(7);
        let content = &bytes[first..];
        let pad = content[0] & 0x80 != 0;
        self.push_bytes(content);
        if pad {
            self.buf.push(0x00);
        }
        self.push_length(content.len() + usize::from(pad));
        self.push_tag(tag);
    }

    pub fn push_octet_string(&mut self, data: &[u8]) {
        self.push_bytes(data);
        self.push_length(data.len());
        self.push_tag(tag::universal::OCTET_STRING);
    }

    pub fn push_null(&mut self) {
        self.push_length(0);
        self.push_tag(tag::universal::NULL);
    }

    pub fn push_oid(&mut self, oid: &Oid) {
        let ber = oid.to_ber_smallvec();
        self.push_bytes(&ber);
        self.push_length(ber.len());
        self.push_tag(tag::universal::OBJECT_IDENTIFIER);
    }

    pub fn push_ip_address(&mut self, addr: [u8; 4]) {
        self.push_bytes(&addr);
        self.push_length(4);
        self.push_tag(tag::application::IP_ADDRESS);
    }

    /// Consume the buffer, returning the encoding in wire order.
    pub fn finish(mut self) -> Bytes {
        self.buf.reverse();
        Bytes::from(self.buf)
    }
}
