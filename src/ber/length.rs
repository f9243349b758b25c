//! BER length octets (X.690 §8.1.3).
//!
//! Short form for lengths up to 127, long form with up to four length
//! octets otherwise. The indefinite form is rejected.

use std::net::SocketAddr;

use crate::error::{DecodeErrorKind, Error, Result, UNKNOWN_TARGET};

/// Largest length accepted when decoding (2 MiB).
pub const MAX_LENGTH: usize = 0x200000;

/// Encode a length, returning the octets in reverse order plus their count.
pub fn encode_length(len: usize) -> ([u8; 5], usize) {
    let mut buf = [0u8; 5];
    if len <= 127 {
        buf[0] = len as u8;
        return (buf, 1);
    }

    let mut count = 0;
    let mut rest = len;
    while rest > 0 && count < 4 {
        buf[count] = rest as u8;
        rest >>= 8;
        count += 1;
    }
    buf[count] = 0x80 | count as u8;
    (buf, count + 1)
}

/// Decode a length from the front of `data`, returning (length, octets consumed).
///
/// `offset` and `target` only feed the debug log on failure.
pub fn decode_length(
    data: &[u8],
    offset: usize,
    target: Option<SocketAddr>,
) -> Result<(usize, usize)> {
    let fail = |kind: DecodeErrorKind| {
        tracing::debug!(target: "snmp_adapter::ber", { snmp.offset = offset, kind = %kind }, "invalid length");
        Error::MalformedResponse {
            target: target.unwrap_or(UNKNOWN_TARGET),
        }
        .boxed()
    };

    let Some(&first) = data.first() else {
        return Err(fail(DecodeErrorKind::TruncatedData));
    };

    if first == 0x80 {
        return Err(fail(DecodeErrorKind::IndefiniteLength));
    }
    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }

    let octets = (first & 0x7F) as usize;
    if octets > 4 {
        return Err(fail(DecodeErrorKind::LengthTooLong { octets }));
    }
    if data.len() < 1 + octets {
        return Err(fail(DecodeErrorKind::TruncatedData));
    }

    let len = data[1..=octets]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    if len > MAX_LENGTH {
        return Err(fail(DecodeErrorKind::LengthExceedsMax {
            length: len,
            max: MAX_LENGTH,
        }));
    }
    Ok((len, 1 + octets))
}
