//! Small runnable examples built on the SNMP layer, XML and SQLite.
//!
//! Each experiment is a plain function writing to a [`std::io::Write`]; the
//! command-line front end passes stdout.

pub mod db;
pub mod snmp;
pub mod xml;

/// Separator printed between sections of output.
pub const RULE: &str = "-------------------------------------------------------------------------------";
