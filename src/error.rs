//! Error types for snmp-adapter.
//!
//! - [`Error`] is the single error type used by the SNMP layer and the experiments
//! - [`ErrorStatus`] holds the protocol error codes agents return (RFC 3416)
//!
//! Errors are boxed: `Result<T> = Result<T, Box<Error>>`.
//!
//! ```rust
//! use snmp_adapter::{Error, Result};
//!
//! fn describe(result: Result<()>) -> String {
//!     match result {
//!         Ok(()) => "ok".into(),
//!         Err(e) => match &*e {
//!             Error::Timeout { target, retries, .. } => {
//!                 format!("{} unreachable after {} retries", target, retries)
//!             }
//!             other => other.to_string(),
//!         },
//!     }
//! }
//! # assert_eq!(describe(Ok(())), "ok");
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use crate::oid::Oid;

/// Placeholder target address used when no peer is known (0.0.0.0:0).
pub(crate) const UNKNOWN_TARGET: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)), 0);

/// Result type alias using the crate's boxed [`Error`].
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The main error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Network failure (connection refused, unreachable, bind failure).
    #[error("network error communicating with {target}: {source}")]
    Network {
        target: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Request timed out after retries.
    #[error("No SNMP response received before timeout ({elapsed:?} waiting for {target}, {retries} retries)")]
    Timeout {
        target: SocketAddr,
        elapsed: Duration,
        retries: u32,
    },

    /// SNMP protocol error reported by the agent.
    #[error("SNMP error from {target}: {status} at index {index}")]
    Snmp {
        target: SocketAddr,
        status: ErrorStatus,
        index: u32,
        oid: Option<Oid>,
    },

    /// Undecodable or inconsistent message.
    #[error("malformed response from {target}")]
    MalformedResponse { target: SocketAddr },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(Box<str>),

    /// Invalid OID format.
    #[error("invalid OID: {0}")]
    InvalidOid(Box<str>),

    /// A symbolic name that no loaded MIB module defines.
    #[error("unknown object {module}::{symbol}")]
    UnknownObject { module: Box<str>, symbol: Box<str> },

    /// A MIB module could not be found or parsed.
    #[error("MIB module {module}: {reason}")]
    Mib { module: Box<str>, reason: Box<str> },

    /// SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// XML serialization failure.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Local I/O failure (terminal output, MIB files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Box this error (convenience for constructing boxed errors).
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Shorthand for a boxed [`Error::Config`].
    pub(crate) fn config(msg: impl Into<String>) -> Box<Self> {
        Self::Config(msg.into().into_boxed_str()).boxed()
    }
}

impl From<rusqlite::Error> for Box<Error> {
    fn from(e: rusqlite::Error) -> Self {
        Error::Database(e).boxed()
    }
}

impl From<quick_xml::Error> for Box<Error> {
    fn from(e: quick_xml::Error) -> Self {
        Error::Xml(e).boxed()
    }
}

impl From<std::io::Error> for Box<Error> {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e).boxed()
    }
}

/// Detail for BER decode failures. Logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecodeErrorKind {
    UnexpectedTag { expected: u8, actual: u8 },
    TruncatedData,
    IndefiniteLength,
    ZeroLengthInteger,
    InvalidOidEncoding,
    UnknownVersion(i32),
    UnknownPduType(u8),
    InvalidNull,
    InvalidIpAddressLength { length: usize },
    LengthTooLong { octets: usize },
    LengthExceedsMax { length: usize, max: usize },
    Integer64TooLong { length: usize },
    EmptyResponse,
    InsufficientData { needed: usize, available: usize },
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedTag { expected, actual } => {
                write!(f, "expected tag 0x{:02X}, got 0x{:02X}", expected, actual)
            }
            Self::TruncatedData => write!(f, "unexpected end of data"),
            Self::IndefiniteLength => write!(f, "indefinite length encoding not supported"),
            Self::ZeroLengthInteger => write!(f, "zero-length integer"),
            Self::InvalidOidEncoding => write!(f, "invalid OID encoding"),
            Self::UnknownVersion(v) => write!(f, "unknown SNMP version: {}", v),
            Self::UnknownPduType(t) => write!(f, "unknown PDU type: 0x{:02X}", t),
            Self::InvalidNull => write!(f, "NULL with non-zero length"),
            Self::InvalidIpAddressLength { length } => {
                write!(f, "IP address must be 4 bytes, got {}", length)
            }
            Self::LengthTooLong { octets } => {
                write!(f, "length encoding too long ({} octets)", octets)
            }
            Self::LengthExceedsMax { length, max } => {
                write!(f, "length {} exceeds maximum {}", length, max)
            }
            Self::Integer64TooLong { length } => write!(f, "integer64 too long: {} bytes", length),
            Self::EmptyResponse => write!(f, "empty response"),
            Self::InsufficientData { needed, available } => {
                write!(f, "need {} bytes but only {} remaining", needed, available)
            }
        }
    }
}

/// Detail for OID validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OidErrorKind {
    InvalidArc,
    InvalidFirstArc(u32),
    InvalidSecondArc { first: u32, second: u32 },
    TooManyArcs { count: usize, max: usize },
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArc => write!(f, "invalid arc value"),
            Self::InvalidFirstArc(v) => write!(f, "first arc must be 0, 1, or 2, got {}", v),
            Self::InvalidSecondArc { first, second } => {
                write!(f, "second arc {} too large for first arc {}", second, first)
            }
            Self::TooManyArcs { count, max } => {
                write!(f, "OID has {} arcs, exceeds maximum {}", count, max)
            }
        }
    }
}

/// SNMP protocol error status codes (RFC 3416).
///
/// `Display` renders the protocol name (`noSuchName`), which is what the
/// experiments print as `{status} at {oid}`.
///
/// ```
/// use snmp_adapter::ErrorStatus;
///
/// let status = ErrorStatus::from_i32(2);
/// assert_eq!(status, ErrorStatus::NoSuchName);
/// assert_eq!(status.to_string(), "noSuchName");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorStatus {
    NoError,
    TooBig,
    /// SNMPv1 only; v2c agents answer with exception values instead.
    NoSuchName,
    BadValue,
    ReadOnly,
    GenErr,
    NoAccess,
    WrongType,
    WrongLength,
    WrongEncoding,
    WrongValue,
    NoCreation,
    InconsistentValue,
    ResourceUnavailable,
    CommitFailed,
    UndoFailed,
    AuthorizationError,
    NotWritable,
    InconsistentName,
    /// Unknown or future error status code.
    Unknown(i32),
}

impl ErrorStatus {
    /// Create from raw status code.
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::AuthorizationError,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            other => {
                tracing::warn!(target: "snmp_adapter::error", { snmp.error_status = other }, "unknown SNMP error status");
                Self::Unknown(other)
            }
        }
    }

    /// Convert to raw status code.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::NoError => 0,
            Self::TooBig => 1,
            Self::NoSuchName => 2,
            Self::BadValue => 3,
            Self::ReadOnly => 4,
            Self::GenErr => 5,
            Self::NoAccess => 6,
            Self::WrongType => 7,
            Self::WrongLength => 8,
            Self::WrongEncoding => 9,
            Self::WrongValue => 10,
            Self::NoCreation => 11,
            Self::InconsistentValue => 12,
            Self::ResourceUnavailable => 13,
            Self::CommitFailed => 14,
            Self::UndoFailed => 15,
            Self::AuthorizationError => 16,
            Self::NotWritable => 17,
            Self::InconsistentName => 18,
            Self::Unknown(code) => *code,
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NoError => "noError",
            Self::TooBig => "tooBig",
            Self::NoSuchName => "noSuchName",
            Self::BadValue => "badValue",
            Self::ReadOnly => "readOnly",
            Self::GenErr => "genErr",
            Self::NoAccess => "noAccess",
            Self::WrongType => "wrongType",
            Self::WrongLength => "wrongLength",
            Self::WrongEncoding => "wrongEncoding",
            Self::WrongValue => "wrongValue",
            Self::NoCreation => "noCreation",
            Self::InconsistentValue => "inconsistentValue",
            Self::ResourceUnavailable => "resourceUnavailable",
            Self::CommitFailed => "commitFailed",
            Self::UndoFailed => "undoFailed",
            Self::AuthorizationError => "authorizationError",
            Self::NotWritable => "notWritable",
            Self::InconsistentName => "inconsistentName",
            Self::Unknown(code) => return write!(f, "unknown({})", code),
        };
        f.write_str(name)
    }
}
