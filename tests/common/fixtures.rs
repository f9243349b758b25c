//! Standard test fixtures with realistic MIB data.

use snmp_adapter::{Oid, Value, oid};
use std::collections::BTreeMap;

// =============================================================================
// MIB data fixtures (for TestAgent)
// =============================================================================

/// System group entries (1.3.6.1.2.1.1) plus ifInOctets.1.
pub fn system_mib() -> BTreeMap<Oid, Value> {
    let mut data = BTreeMap::new();

    data.insert(sys_descr(), Value::OctetString("Test SNMP Agent".into()));
    data.insert(
        sys_object_id(),
        Value::ObjectIdentifier(oid!(1, 3, 6, 1, 4, 1, 99999)),
    );
    data.insert(sys_uptime(), Value::TimeTicks(123456));
    data.insert(sys_contact(), Value::OctetString("admin@test.local".into()));
    data.insert(sys_name(), Value::OctetString("test-agent".into()));
    data.insert(sys_location(), Value::OctetString("Test Lab".into()));
    data.insert(sys_services(), Value::Integer(72));
    data.insert(if_in_octets_1(), Value::Counter32(1_234_567));

    data
}

/// What the X-410 relay answers: a temperature reading as text.
pub fn relay_mib() -> BTreeMap<Oid, Value> {
    let mut data = BTreeMap::new();
    data.insert(relay_temp(), Value::OctetString("72.5".into()));
    data
}

// =============================================================================
// OID helpers
// =============================================================================

pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
}

pub fn sys_object_id() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 2, 0)
}

pub fn sys_uptime() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
}

pub fn sys_contact() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 4, 0)
}

pub fn sys_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)
}

pub fn sys_location() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 6, 0)
}

pub fn sys_services() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 7, 0)
}

pub fn if_in_octets_1() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 10, 1)
}

/// XYTRONIX-MIB::temp.0
pub fn relay_temp() -> Oid {
    oid!(1, 3, 6, 1, 4, 1, 19865, 2, 1, 0)
}

/// An OID no fixture defines.
pub fn nonexistent_oid() -> Oid {
    oid!(1, 3, 6, 1, 99, 99, 99)
}
