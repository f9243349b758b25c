//! Shared test infrastructure for snmp-adapter.
//!
//! Provides TestAgent (in-process SNMP agent), TrapSender, and fixtures.

// Not every test file uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod agent;
pub mod fixtures;
pub mod sender;

pub use fixtures::{relay_mib, system_mib};

pub use fixtures::{
    if_in_octets_1, nonexistent_oid, relay_temp, sys_contact, sys_descr, sys_location, sys_name,
    sys_object_id, sys_services, sys_uptime,
};

pub use agent::{TestAgent, TestAgentBuilder};
pub use sender::TrapSender;

use std::net::{SocketAddr, UdpSocket};

/// A localhost port that was free a moment ago.
pub fn free_udp_port() -> u16 {
    UdpSocket::bind("127.0.0.1:0")
        .and_then(|s| s.local_addr())
        .map(|addr: SocketAddr| addr.port())
        .expect("no free UDP port")
}
