//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>`, so the OIDs the experiments
//! deal with (system group, interface table columns) never hit the heap.

use crate::error::{DecodeErrorKind, Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Maximum number of arcs in an OID (RFC 2578 §3.5).
pub const MAX_OID_LEN: usize = 128;

/// Object Identifier.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// ```
    /// use snmp_adapter::oid::Oid;
    ///
    /// let oid = Oid::new([1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse dotted notation. A leading dot is accepted (`.1.3.6.1`).
    ///
    /// Arc constraints are not checked here; see [`validate`](Self::validate).
    ///
    /// ```
    /// use snmp_adapter::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.2.1.1.1.0").unwrap();
    /// assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
    /// assert!(Oid::parse("1.3.x").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }

        let arcs = trimmed
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<std::result::Result<SmallVec<_>, _>>()
            .map_err(|_| {
                tracing::debug!(target: "snmp_adapter::oid", { snmp.oid = s, kind = %OidErrorKind::InvalidArc }, "OID parse error");
                Error::InvalidOid(s.into()).boxed()
            })?;

        Ok(Self { arcs })
    }

    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID is `other` or lies beneath it.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.starts_with(&other.arcs)
    }

    /// The OID with its last arc removed, or `None` for an empty OID.
    pub fn parent(&self) -> Option<Oid> {
        let (_, rest) = self.arcs.split_last()?;
        Some(Self::from_slice(rest))
    }

    /// Append one arc.
    pub fn child(&self, arc: u32) -> Oid {
        self.extend(&[arc])
    }

    /// Append several arcs (table indices, instance suffixes).
    pub fn extend(&self, suffix: &[u32]) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.extend_from_slice(suffix);
        Self { arcs }
    }

    /// Check arc constraints (X.690 §8.19.4) and the arc count limit.
    ///
    /// ```
    /// use snmp_adapter::oid::Oid;
    ///
    /// assert!(Oid::from_slice(&[1, 3, 6, 1]).validate().is_ok());
    /// assert!(Oid::from_slice(&[3, 0]).validate().is_err());
    /// assert!(Oid::from_slice(&[0, 40]).validate().is_err());
    /// assert!(Oid::from_slice(&[2, 999]).validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let fail = |kind: OidErrorKind| {
            tracing::debug!(target: "snmp_adapter::oid", { snmp.oid = %self, kind = %kind }, "OID validation error");
            Error::InvalidOid(kind.to_string().into()).boxed()
        };

        if self.arcs.len() > MAX_OID_LEN {
            return Err(fail(OidErrorKind::TooManyArcs {
                count: self.arcs.len(),
                max: MAX_OID_LEN,
            }));
        }
        match self.arcs.as_slice() {
            [first, ..] if *first > 2 => Err(fail(OidErrorKind::InvalidFirstArc(*first))),
            [first, second, ..] if *first < 2 && *second >= 40 => {
                Err(fail(OidErrorKind::InvalidSecondArc {
                    first: *first,
                    second: *second,
                }))
            }
            _ => Ok(()),
        }
    }

    /// BER content octets (X.690 §8.19): the first two arcs share one
    /// subidentifier, every subidentifier is base-128.
    pub fn to_ber_smallvec(&self) -> SmallVec<[u8; 64]> {
        let mut bytes = SmallVec::new();
        match self.arcs.as_slice() {
            [] => {}
            [first] => encode_subidentifier(&mut bytes, first * 40),
            [first, second, rest @ ..] => {
                encode_subidentifier(&mut bytes, first * 40 + second);
                for &arc in rest {
                    encode_subidentifier(&mut bytes, arc);
                }
            }
        }
        bytes
    }

    pub fn to_ber(&self) -> Vec<u8> {
        self.to_ber_smallvec().to_vec()
    }

    /// Decode BER content octets, enforcing [`MAX_OID_LEN`].
    pub fn from_ber(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::empty());
        }

        let (first_subid, mut i) = decode_subidentifier(data)?;
        let mut arcs: SmallVec<[u32; 16]> = match first_subid {
            0..40 => smallvec::smallvec![0, first_subid],
            40..80 => smallvec::smallvec![1, first_subid - 40],
            _ => smallvec::smallvec![2, first_subid - 80],
        };

        while i < data.len() {
            let (arc, consumed) = decode_subidentifier(&data[i..])?;
            arcs.push(arc);
            i += consumed;
            if arcs.len() > MAX_OID_LEN {
                tracing::debug!(target: "snmp_adapter::oid", { snmp.offset = i, kind = %OidErrorKind::TooManyArcs { count: arcs.len(), max: MAX_OID_LEN } }, "OID too long");
                return Err(Error::InvalidOid("too many arcs".into()).boxed());
            }
        }

        Ok(Self { arcs })
    }
}

fn encode_subidentifier(bytes: &mut SmallVec<[u8; 64]>, value: u32) {
    let groups = (32 - value.leading_zeros()).div_ceil(7).max(1);
    for i in (0..groups).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7F) as u8;
        if i > 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
    }
}

/// Decode one base-128 subidentifier, returning (value, bytes consumed).
fn decode_subidentifier(data: &[u8]) -> Result<(u32, usize)> {
    let mut value: u32 = 0;
    for (i, &byte) in data.iter().enumerate() {
        if value > (u32::MAX >> 7) {
            break;
        }
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    tracing::debug!(target: "snmp_adapter::oid", { kind = %DecodeErrorKind::InvalidOidEncoding }, "bad subidentifier");
    Err(Error::InvalidOid("invalid subidentifier encoding".into()).boxed())
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.arcs.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{}", first)?;
            for arc in arcs {
                write!(f, ".{}", arc)?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Build an OID from literal arcs.
///
/// ```
/// use snmp_adapter::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), "1.3.6.1.2.1.1.1.0");
/// assert!(sys_descr.starts_with(&oid!(1, 3, 6, 1, 2, 1, 1)));
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}
