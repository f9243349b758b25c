//! MIB modules compiled into the binary.
//!
//! Trimmed copies of the standard modules: OID assignments only, enough to
//! resolve the objects the experiments query and to name received traps.

/// `(module name, SMI text)`.
pub(crate) const MODULES: &[(&str, &str)] = &[
    ("SNMPv2-SMI", SNMPV2_SMI),
    ("SNMPv2-MIB", SNMPV2_MIB),
    ("SNMP-COMMUNITY-MIB", SNMP_COMMUNITY_MIB),
    ("IF-MIB", IF_MIB),
    ("XYTRONIX-MIB", XYTRONIX_MIB),
];

pub(crate) fn find(module: &str) -> Option<&'static str> {
    MODULES
        .iter()
        .find(|(name, _)| *name == module)
        .map(|(_, text)| *text)
}

const SNMPV2_SMI: &str = r#"
SNMPv2-SMI DEFINITIONS ::= BEGIN

iso          OBJECT IDENTIFIER ::= { 1 }
org          OBJECT IDENTIFIER ::= { iso 3 }
dod          OBJECT IDENTIFIER ::= { org 6 }
internet     OBJECT IDENTIFIER ::= { dod 1 }
directory    OBJECT IDENTIFIER ::= { internet 1 }
mgmt         OBJECT IDENTIFIER ::= { internet 2 }
mib-2        OBJECT IDENTIFIER ::= { mgmt 1 }
transmission OBJECT IDENTIFIER ::= { mib-2 10 }
experimental OBJECT IDENTIFIER ::= { internet 3 }
private      OBJECT IDENTIFIER ::= { internet 4 }
enterprises  OBJECT IDENTIFIER ::= { private 1 }
security     OBJECT IDENTIFIER ::= { internet 5 }
snmpV2       OBJECT IDENTIFIER ::= { internet 6 }
snmpDomains  OBJECT IDENTIFIER ::= { snmpV2 1 }
snmpProxys   OBJECT IDENTIFIER ::= { snmpV2 2 }
snmpModules  OBJECT IDENTIFIER ::= { snmpV2 3 }

zeroDotZero OBJECT-IDENTITY
    STATUS  current
    DESCRIPTION "A value used for null identifiers."
    ::= { 0 0 }

END
"#;

const SNMPV2_MIB: &str = r#"
SNMPv2-MIB DEFINITIONS ::= BEGIN

IMPORTS
    MODULE-IDENTITY, OBJECT-TYPE, NOTIFICATION-TYPE,
    TimeTicks, Counter32, snmpModules, mib-2
        FROM SNMPv2-SMI
    DisplayString, TestAndIncr, TimeStamp
        FROM SNMPv2-TC;

snmpMIB MODULE-IDENTITY
    LAST-UPDATED "200210160000Z"
    ORGANIZATION "IETF SNMPv3 Working Group"
    DESCRIPTION  "The MIB module for SNMP entities."
    ::= { snmpModules 1 }

snmpMIBObjects OBJECT IDENTIFIER ::= { snmpMIB 1 }

system   OBJECT IDENTIFIER ::= { mib-2 1 }

sysDescr OBJECT-TYPE
    SYNTAX      DisplayString (SIZE (0..255))
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "A textual description of the entity."
    ::= { system 1 }

sysObjectID OBJECT-TYPE
    SYNTAX      OBJECT IDENTIFIER
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "The vendor's authoritative identification."
    ::= { system 2 }

sysUpTime OBJECT-TYPE
    SYNTAX      TimeTicks
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "Time since the network management portion was re-initialized."
    ::= { system 3 }

sysContact OBJECT-TYPE
    SYNTAX      DisplayString (SIZE (0..255))
    MAX-ACCESS  read-write
    STATUS      current
    DESCRIPTION "The contact person for this managed node."
    ::= { system 4 }

sysName OBJECT-TYPE
    SYNTAX      DisplayString (SIZE (0..255))
    MAX-ACCESS  read-write
    STATUS      current
    DESCRIPTION "An administratively-assigned name."
    ::= { system 5 }

sysLocation OBJECT-TYPE
    SYNTAX      DisplayString (SIZE (0..255))
    MAX-ACCESS  read-write
    STATUS      current
    DESCRIPTION "The physical location of this node."
    ::= { system 6 }

sysServices OBJECT-TYPE
    SYNTAX      INTEGER (0..127)
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "The set of services this entity may offer."
    ::= { system 7 }

sysORLastChange OBJECT-TYPE
    SYNTAX      TimeStamp
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "The value of sysUpTime at the last sysORID change."
    ::= { system 8 }

snmp     OBJECT IDENTIFIER ::= { mib-2 11 }

snmpInPkts OBJECT-TYPE
    SYNTAX      Counter32
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "Messages delivered to the SNMP entity."
    ::= { snmp 1 }

snmpTrap OBJECT IDENTIFIER ::= { snmpMIBObjects 4 }

snmpTrapOID OBJECT-TYPE
    SYNTAX      OBJECT IDENTIFIER
    MAX-ACCESS  accessible-for-notify
    STATUS      current
    DESCRIPTION "The authoritative identification of the notification."
    ::= { snmpTrap 1 }

snmpTrapEnterprise OBJECT-TYPE
    SYNTAX      OBJECT IDENTIFIER
    MAX-ACCESS  accessible-for-notify
    STATUS      current
    DESCRIPTION "The enterprise associated with the trap."
    ::= { snmpTrap 3 }

snmpTraps OBJECT IDENTIFIER ::= { snmpMIBObjects 5 }

coldStart NOTIFICATION-TYPE
    STATUS  current
    DESCRIPTION "The entity is reinitializing and its configuration may have changed."
    ::= { snmpTraps 1 }

warmStart NOTIFICATION-TYPE
    STATUS  current
    DESCRIPTION "The entity is reinitializing and its configuration is unaltered."
    ::= { snmpTraps 2 }

authenticationFailure NOTIFICATION-TYPE
    STATUS  current
    DESCRIPTION "A message was not properly authenticated."
    ::= { snmpTraps 5 }

END
"#;

const SNMP_COMMUNITY_MIB: &str = r#"
SNMP-COMMUNITY-MIB DEFINITIONS ::= BEGIN

IMPORTS
    IpAddress, MODULE-IDENTITY, OBJECT-TYPE, snmpModules
        FROM SNMPv2-SMI;

snmpCommunityMIB MODULE-IDENTITY
    LAST-UPDATED "200308060000Z"
    ORGANIZATION "SNMPv3 Working Group"
    DESCRIPTION  "Coexistence of SNMPv1, SNMPv2c and SNMPv3."
    ::= { snmpModules 18 }

snmpCommunityMIBObjects OBJECT IDENTIFIER ::= { snmpCommunityMIB 1 }

snmpTrapAddress OBJECT-TYPE
    SYNTAX      IpAddress
    MAX-ACCESS  accessible-for-notify
    STATUS      current
    DESCRIPTION "The agent-addr of a translated SNMPv1 trap."
    ::= { snmpCommunityMIBObjects 3 }

snmpTrapCommunity OBJECT-TYPE
    SYNTAX      OCTET STRING
    MAX-ACCESS  accessible-for-notify
    STATUS      current
    DESCRIPTION "The community of a translated SNMPv1 trap."
    ::= { snmpCommunityMIBObjects 4 }

END
"#;

const IF_MIB: &str = r#"
IF-MIB DEFINITIONS ::= BEGIN

IMPORTS
    MODULE-IDENTITY, OBJECT-TYPE, Counter32, Gauge32, Counter64,
    Integer32, TimeTicks, mib-2, NOTIFICATION-TYPE
        FROM SNMPv2-SMI
    snmpTraps
        FROM SNMPv2-MIB;

ifMIB MODULE-IDENTITY
    LAST-UPDATED "200006140000Z"
    ORGANIZATION "IETF Interfaces MIB Working Group"
    DESCRIPTION  "The MIB module to describe generic objects for network interface sub-layers."
    ::= { mib-2 31 }

ifMIBObjects OBJECT IDENTIFIER ::= { ifMIB 1 }

interfaces   OBJECT IDENTIFIER ::= { mib-2 2 }

ifNumber OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "The number of network interfaces."
    ::= { interfaces 1 }

ifTable OBJECT-TYPE
    SYNTAX      SEQUENCE OF IfEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION "A list of interface entries."
    ::= { interfaces 2 }

ifEntry OBJECT-TYPE
    SYNTAX      IfEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION "An entry containing management information for one interface."
    INDEX       { ifIndex }
    ::= { ifTable 1 }

IfEntry ::= SEQUENCE {
    ifIndex            InterfaceIndex,
    ifDescr            DisplayString,
    ifType             IANAifType,
    ifSpecific         OBJECT IDENTIFIER
}

ifIndex            OBJECT-TYPE SYNTAX InterfaceIndex MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 1 }
ifDescr            OBJECT-TYPE SYNTAX DisplayString  MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 2 }
ifType             OBJECT-TYPE SYNTAX IANAifType     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 3 }
ifMtu              OBJECT-TYPE SYNTAX Integer32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 4 }
ifSpeed            OBJECT-TYPE SYNTAX Gauge32        MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 5 }
ifPhysAddress      OBJECT-TYPE SYNTAX PhysAddress    MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 6 }
ifAdminStatus      OBJECT-TYPE SYNTAX INTEGER { up(1), down(2), testing(3) } MAX-ACCESS read-write STATUS current DESCRIPTION "" ::= { ifEntry 7 }
ifOperStatus       OBJECT-TYPE SYNTAX INTEGER { up(1), down(2), testing(3), unknown(4), dormant(5), notPresent(6), lowerLayerDown(7) } MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 8 }
ifLastChange       OBJECT-TYPE SYNTAX TimeTicks      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 9 }
ifInOctets         OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 10 }
ifInUcastPkts      OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 11 }
ifInNUcastPkts     OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS deprecated DESCRIPTION "" ::= { ifEntry 12 }
ifInDiscards       OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 13 }
ifInErrors         OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 14 }
ifInUnknownProtos  OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 15 }
ifOutOctets        OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 16 }
ifOutUcastPkts     OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 17 }
ifOutNUcastPkts    OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS deprecated DESCRIPTION "" ::= { ifEntry 18 }
ifOutDiscards      OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 19 }
ifOutErrors        OBJECT-TYPE SYNTAX Counter32      MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifEntry 20 }
ifOutQLen          OBJECT-TYPE SYNTAX Gauge32        MAX-ACCESS read-only STATUS deprecated DESCRIPTION "" ::= { ifEntry 21 }
ifSpecific         OBJECT-TYPE SYNTAX OBJECT IDENTIFIER MAX-ACCESS read-only STATUS deprecated DESCRIPTION "" ::= { ifEntry 22 }

ifXTable OBJECT-TYPE
    SYNTAX      SEQUENCE OF IfXEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION "A list of interface entries, extending ifTable."
    ::= { ifMIBObjects 1 }

ifXEntry OBJECT-TYPE
    SYNTAX      IfXEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION "Additional management information for one interface."
    AUGMENTS    { ifEntry }
    ::= { ifXTable 1 }

ifName                     OBJECT-TYPE SYNTAX DisplayString MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 1 }
ifInMulticastPkts          OBJECT-TYPE SYNTAX Counter32     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 2 }
ifInBroadcastPkts          OBJECT-TYPE SYNTAX Counter32     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 3 }
ifOutMulticastPkts         OBJECT-TYPE SYNTAX Counter32     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 4 }
ifOutBroadcastPkts         OBJECT-TYPE SYNTAX Counter32     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 5 }
ifHCInOctets               OBJECT-TYPE SYNTAX Counter64     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 6 }
ifHCInUcastPkts            OBJECT-TYPE SYNTAX Counter64     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 7 }
ifHCInMulticastPkts        OBJECT-TYPE SYNTAX Counter64     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 8 }
ifHCInBroadcastPkts        OBJECT-TYPE SYNTAX Counter64     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 9 }
ifHCOutOctets              OBJECT-TYPE SYNTAX Counter64     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 10 }
ifHCOutUcastPkts           OBJECT-TYPE SYNTAX Counter64     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 11 }
ifHCOutMulticastPkts       OBJECT-TYPE SYNTAX Counter64     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 12 }
ifHCOutBroadcastPkts       OBJECT-TYPE SYNTAX Counter64     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 13 }
ifLinkUpDownTrapEnable     OBJECT-TYPE SYNTAX INTEGER { enabled(1), disabled(2) } MAX-ACCESS read-write STATUS current DESCRIPTION "" ::= { ifXEntry 14 }
ifHighSpeed                OBJECT-TYPE SYNTAX Gauge32       MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 15 }
ifPromiscuousMode          OBJECT-TYPE SYNTAX TruthValue    MAX-ACCESS read-write STATUS current DESCRIPTION "" ::= { ifXEntry 16 }
ifConnectorPresent         OBJECT-TYPE SYNTAX TruthValue    MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 17 }
ifAlias                    OBJECT-TYPE SYNTAX DisplayString MAX-ACCESS read-write STATUS current DESCRIPTION "" ::= { ifXEntry 18 }
ifCounterDiscontinuityTime OBJECT-TYPE SYNTAX TimeStamp     MAX-ACCESS read-only STATUS current DESCRIPTION "" ::= { ifXEntry 19 }

linkDown NOTIFICATION-TYPE
    OBJECTS { ifIndex, ifAdminStatus, ifOperStatus }
    STATUS  current
    DESCRIPTION "A communication link is about to enter the down state."
    ::= { snmpTraps 3 }

linkUp NOTIFICATION-TYPE
    OBJECTS { ifIndex, ifAdminStatus, ifOperStatus }
    STATUS  current
    DESCRIPTION "A communication link left the down state."
    ::= { snmpTraps 4 }

END
"#;

const XYTRONIX_MIB: &str = r#"
XYTRONIX-MIB DEFINITIONS ::= BEGIN

-- ControlByWeb X-410 four-relay module with one-wire temperature sensors.

IMPORTS
    enterprises, OBJECT-TYPE, Integer32
        FROM SNMPv2-SMI
    DisplayString
        FROM SNMPv2-TC;

xytronix  OBJECT IDENTIFIER ::= { enterprises 19865 }
x410      OBJECT IDENTIFIER ::= { xytronix 2 }

temp OBJECT-TYPE
    SYNTAX      DisplayString
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "Temperature sensor 1, tenths of a degree."
    ::= { x410 1 }

temp2 OBJECT-TYPE SYNTAX DisplayString MAX-ACCESS read-only STATUS current DESCRIPTION "Temperature sensor 2." ::= { x410 2 }
temp3 OBJECT-TYPE SYNTAX DisplayString MAX-ACCESS read-only STATUS current DESCRIPTION "Temperature sensor 3." ::= { x410 3 }
temp4 OBJECT-TYPE SYNTAX DisplayString MAX-ACCESS read-only STATUS current DESCRIPTION "Temperature sensor 4." ::= { x410 4 }

vin OBJECT-TYPE
    SYNTAX      DisplayString
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "Supply voltage."
    ::= { x410 5 }

relay1State OBJECT-TYPE SYNTAX Integer32 MAX-ACCESS read-write STATUS current DESCRIPTION "Relay 1, 0 off 1 on." ::= { x410 11 }
relay2State OBJECT-TYPE SYNTAX Integer32 MAX-ACCESS read-write STATUS current DESCRIPTION "Relay 2, 0 off 1 on." ::= { x410 12 }
relay3State OBJECT-TYPE SYNTAX Integer32 MAX-ACCESS read-write STATUS current DESCRIPTION "Relay 3, 0 off 1 on." ::= { x410 13 }
relay4State OBJECT-TYPE SYNTAX Integer32 MAX-ACCESS read-write STATUS current DESCRIPTION "Relay 4, 0 off 1 on." ::= { x410 14 }

END
"#;
