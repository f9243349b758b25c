//! Local SNMP engine identity.

use std::fmt;

use bytes::Bytes;

use crate::util::{encode_hex, random_bytes};

/// SnmpEngineID of this process (RFC 3411 §5).
///
/// Format 5 ("octets, administratively assigned"): the enterprise number 0
/// with the high bit set, the format octet, then random octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEngineId(Bytes);

impl LocalEngineId {
    const PREFIX: [u8; 5] = [0x80, 0x00, 0x00, 0x00, 0x05];

    pub fn generate() -> Self {
        let mut id = Vec::with_capacity(13);
        id.extend_from_slice(&Self::PREFIX);
        id.extend_from_slice(&random_bytes::<8>());
        Self(Bytes::from(id))
    }

    /// Wrap an existing identifier. RFC 3411 allows 5 to 32 octets.
    pub fn from_bytes(id: impl Into<Bytes>) -> Option<Self> {
        let id = id.into();
        (5..=32).contains(&id.len()).then_some(Self(id))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for LocalEngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", encode_hex(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_uses_format_five() {
        let id = LocalEngineId::generate();
        assert_eq!(id.as_bytes().len(), 13);
        assert_eq!(&id.as_bytes()[..5], &LocalEngineId::PREFIX);
        assert!(id.to_string().starts_with("0x8000000005"));
        assert_eq!(id.to_string().len(), 2 + 26);
    }

    #[test]
    fn length_is_checked() {
        assert!(LocalEngineId::from_bytes(vec![0x80; 4]).is_none());
        let id = LocalEngineId::from_bytes(vec![0x80, 0, 0x4f, 0xb8, 0x05]).unwrap();
        assert_eq!(id.to_string(), "0x80004fb805");
    }
}
