//! # snmp-adapter
//!
//! SNMP, XML and SQLite experiments, and the small SNMPv1/v2c layer they
//! run on.
//!
//! ## Layout
//!
//! - [`client`], [`notification`] and [`mib`] form the SNMP layer: GET
//!   requests, trap/inform reception and MIB name resolution, over the
//!   [`ber`], [`pdu`] and [`message`] codecs
//! - [`experiments`] holds the runnable examples: `snmp`, `xml` and `db`
//! - [`cli`] (feature `cli`) is the `snmp-adapter` command-line front end
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snmp_adapter::{Auth, Client, oid};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> snmp_adapter::Result<()> {
//!     let client = Client::builder("192.168.0.59", Auth::v1("public"))
//!         .timeout(Duration::from_secs(2))
//!         .connect()
//!         .await?;
//!
//!     let sys_descr = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await?;
//!     println!("{sys_descr}");
//!     Ok(())
//! }
//! ```
//!
//! ## Experiments
//!
//! ```rust,no_run
//! use snmp_adapter::experiments::{snmp, xml};
//! use snmp_adapter::mib::MibConfig;
//!
//! # async fn example() -> snmp_adapter::Result<()> {
//! let mut out = std::io::stdout();
//! xml::words(&mut out, xml::DEFAULT_TEXT)?;
//! snmp::rewrite(&mut out, &snmp::ExperimentTargets::default(), &MibConfig::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod ber;
pub mod client;
pub mod error;
pub mod experiments;
pub mod message;
pub mod mib;
pub mod notification;
pub mod oid;
pub mod pdu;
pub mod transport;
pub mod value;
pub mod varbind;
pub mod version;

pub(crate) mod util;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use client::{Auth, Backoff, Client, ClientBuilder, ClientConfig, Retry};
pub use error::{Error, ErrorStatus, Result};
pub use mib::{MibConfig, MibView, ObjectIdentity};
pub use notification::{
    LocalEngineId, Notification, NotificationReceiver, NotificationReceiverBuilder,
};
pub use oid::Oid;
pub use pdu::{GenericTrap, Pdu, PduType, TrapV1Pdu};
pub use transport::{Transport, UdpTransport};
pub use value::Value;
pub use varbind::VarBind;
pub use version::Version;

/// A client over a dedicated UDP socket.
pub type UdpClient = Client<UdpTransport>;
