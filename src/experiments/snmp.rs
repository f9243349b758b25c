//! SNMP experiments: GETs against a couple of lab devices and a trap listener.
//!
//! The helpers split a GET into four steps that can be reused and tested
//! separately:
//!
//! ```text
//! make_object -> make_get -> run_command -> print_results
//!                                          (extract_errors + extract_values)
//! ```
//!
//! Every experiment writes to a caller-supplied [`Write`].

use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

use crate::client::{Auth, Client, DEFAULT_PORT, Retry};
use crate::error::{Error, ErrorStatus, Result};
use crate::mib::{MibConfig, MibView, ObjectIdentity};
use crate::notification::{DEFAULT_TRAP_PORT, NotificationReceiver};
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;

use super::RULE;

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_COMMUNITY: &str = "public";
/// Modules loaded by [`listen`] before any `--mib` extras.
pub const DEFAULT_MIBS: &[&str] = &["SNMPv2-MIB", "IF-MIB", "XYTRONIX-MIB"];

/// Per-request wait for the GET experiments.
pub const DEFAULT_GET_TIMEOUT: Duration = Duration::from_secs(1);
/// Resends after a timed-out GET.
pub const DEFAULT_GET_RETRIES: u32 = 5;

/// Loaded alongside [`DEFAULT_MIBS`] so translated v1 traps get readable names.
const COEXISTENCE_MIB: &str = "SNMP-COMMUNITY-MIB";

/// Devices the GET experiments talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentTargets {
    /// Agent for `quickstart`, `common` and `rewrite`.
    pub agent: String,
    pub agent_community: String,
    /// ControlByWeb X-410 web relay with a temperature probe.
    pub relay: String,
    pub relay_community: String,
    pub port: u16,
    pub timeout: Duration,
    pub retries: u32,
}

impl Default for ExperimentTargets {
    fn default() -> Self {
        Self {
            agent: "192.168.0.59".into(),
            agent_community: DEFAULT_COMMUNITY.into(),
            relay: "192.168.0.132".into(),
            relay_community: "webrelay".into(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_GET_TIMEOUT,
            retries: DEFAULT_GET_RETRIES,
        }
    }
}

/// `MODULE::symbol.indices`
pub fn make_object(
    module: &str,
    symbol: &str,
    indices: impl IntoIterator<Item = u32>,
) -> ObjectIdentity {
    ObjectIdentity::new(module, symbol, indices)
}

/// A GET request described without touching the network.
#[derive(Debug, Clone)]
pub struct GetCommand {
    pub address: String,
    pub port: u16,
    pub auth: Auth,
    pub objects: Vec<ObjectIdentity>,
    pub timeout: Duration,
    pub retry: Retry,
}

/// SNMPv2c GET of `objects` on `address:161`.
pub fn make_get(
    address: &str,
    community: &str,
    objects: impl IntoIterator<Item = ObjectIdentity>,
) -> GetCommand {
    GetCommand {
        address: address.to_string(),
        port: DEFAULT_PORT,
        auth: Auth::v2c(community),
        objects: objects.into_iter().collect(),
        timeout: DEFAULT_GET_TIMEOUT,
        retry: Retry::immediate(DEFAULT_GET_RETRIES),
    }
}

impl GetCommand {
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.auth.version = version;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: Retry) -> Self {
        self.retry = retry;
        self
    }

    /// Port, timeout and retry count from the experiment settings.
    pub fn with_settings(self, targets: &ExperimentTargets) -> Self {
        self.port(targets.port)
            .timeout(targets.timeout)
            .retry(Retry::immediate(targets.retries))
    }

    fn target(&self) -> String {
        match self.address.parse::<std::net::Ipv6Addr>() {
            Ok(v6) => SocketAddr::from((v6, self.port)).to_string(),
            Err(_) => format!("{}:{}", self.address, self.port),
        }
    }
}

/// One response, or the reason there was none.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    /// Local failure: timeout, network error, undecodable response.
    pub error_indication: Option<String>,
    /// Error reported by the agent.
    pub error_status: Option<ErrorStatus>,
    /// 1-based index of the failing varbind within `varbinds`, 0 if not applicable.
    pub error_index: u32,
    pub varbinds: Vec<VarBind>,
}

impl CommandResult {
    fn ok(varbinds: Vec<VarBind>) -> Self {
        Self {
            error_indication: None,
            error_status: None,
            error_index: 0,
            varbinds,
        }
    }

    fn indication(error: &Error) -> Self {
        Self {
            error_indication: Some(error.to_string()),
            error_status: None,
            error_index: 0,
            varbinds: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_indication.is_some() || self.error_status.is_some()
    }
}

/// Execute `command` and collect every response.
///
/// Modules named by the objects are loaded into `mib` first. MIB failures are
/// returned as errors; everything that goes wrong on the wire is reported in
/// the result instead.
pub async fn run_command(
    command: &GetCommand,
    mib: &mut MibView,
) -> Result<Vec<CommandResult>> {
    mib.load(command.objects.iter().filter_map(ObjectIdentity::module))?;
    let oids = command
        .objects
        .iter()
        .map(|object| object.resolve(mib))
        .collect::<Result<Vec<Oid>>>()?;

    let target = command.target();
    tracing::debug!(
        target: "snmp_adapter::experiments",
        { snmp.target = %target, snmp.version = %command.auth.version, snmp.oids = oids.len() },
        "running GET"
    );

    let client = match Client::builder(target, command.auth.clone())
        .timeout(command.timeout)
        .retry(command.retry.clone())
        .connect()
        .await
    {
        Ok(client) => client,
        Err(e) if is_configuration_error(&e) => return Err(e),
        Err(e) => return Ok(vec![CommandResult::indication(&e)]),
    };

    let result = match client.get_many(&oids).await {
        Ok(varbinds) => CommandResult::ok(varbinds),
        Err(e) => match *e {
            Error::Snmp { status, index, .. } => CommandResult {
                error_indication: None,
                error_status: Some(status),
                error_index: index,
                varbinds: oids.into_iter().map(VarBind::null).collect(),
            },
            ref other => CommandResult::indication(other),
        },
    };
    Ok(vec![result])
}

fn is_configuration_error(error: &Error) -> bool {
    matches!(error, Error::Config(_))
}

/// An error line's parts: indication, status text, offending object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub indication: Option<String>,
    pub status: Option<String>,
    pub object: String,
}

/// Errors in `results`, one per failed result.
pub fn extract_errors(results: &[CommandResult], mib: &MibView) -> Vec<ErrorReport> {
    results
        .iter()
        .filter(|r| r.is_error())
        .map(|r| ErrorReport {
            indication: r.error_indication.clone(),
            status: r.error_status.map(|s| s.to_string()),
            object: failing_object(r, mib),
        })
        .collect()
}

/// MIB name of the varbind at `error_index`, or `?`.
fn failing_object(result: &CommandResult, mib: &MibView) -> String {
    (result.error_index as usize)
        .checked_sub(1)
        .and_then(|i| result.varbinds.get(i))
        .map(|vb| mib.pretty(&vb.oid))
        .unwrap_or_else(|| "?".to_string())
}

/// Values by pretty OID name, in first-seen order. Later duplicates replace
/// the value in place.
pub fn extract_values(results: &[CommandResult], mib: &MibView) -> Vec<(String, Value)> {
    let mut values: Vec<(String, Value)> = Vec::new();
    for vb in results.iter().flat_map(|r| &r.varbinds) {
        let name = mib.pretty(&vb.oid);
        match values.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = vb.value.clone(),
            None => values.push((name, vb.value.clone())),
        }
    }
    values
}

pub fn print_errors(out: &mut impl Write, errors: &[ErrorReport]) -> Result<()> {
    for error in errors {
        if let Some(indication) = &error.indication {
            writeln!(out, "{indication}")?;
        } else if let Some(status) = &error.status {
            writeln!(out, "{status} at {}", error.object)?;
        }
    }
    Ok(())
}

pub fn print_values(out: &mut impl Write, values: &[(String, Value)]) -> Result<()> {
    for (name, value) in values {
        writeln!(out, "{name} = {value}")?;
    }
    Ok(())
}

/// Errors first, then values.
pub fn print_results(
    out: &mut impl Write,
    results: &[CommandResult],
    mib: &MibView,
) -> Result<()> {
    print_errors(out, &extract_errors(results, mib))?;
    print_values(out, &extract_values(results, mib))
}

/// Print only the first result: its indication, its error status, or its
/// varbinds. This is the printer the tutorial examples used before the
/// `extract_*` helpers.
pub fn print_first_result(
    out: &mut impl Write,
    results: &[CommandResult],
    mib: &MibView,
) -> Result<()> {
    let Some(first) = results.first() else {
        return Ok(());
    };
    if let Some(indication) = &first.error_indication {
        writeln!(out, "{indication}")?;
    } else if let Some(status) = first.error_status {
        writeln!(out, "{status} at {}", failing_object(first, mib))?;
    } else {
        for vb in &first.varbinds {
            writeln!(out, "{} = {}", mib.pretty(&vb.oid), vb.value)?;
        }
    }
    Ok(())
}

fn system_objects() -> Vec<ObjectIdentity> {
    vec![
        make_object("SNMPv2-MIB", "sysDescr", [0]),
        make_object("SNMPv2-MIB", "sysUpTime", [0]),
        make_object("IF-MIB", "ifInOctets", [1]),
    ]
}

/// SNMPv1 GET of sysDescr.0 from the lab agent.
pub async fn quickstart(
    out: &mut impl Write,
    targets: &ExperimentTargets,
    mib: &MibConfig,
) -> Result<()> {
    let mut view = MibView::with_config(mib.clone())?;
    let command = make_get(
        &targets.agent,
        &targets.agent_community,
        [make_object("SNMPv2-MIB", "sysDescr", [0])],
    )
    .version(Version::V1)
    .with_settings(targets);
    let results = run_command(&command, &mut view).await?;
    print_first_result(out, &results, &view)
}

/// SNMPv2c GET of a few system and interface objects, printed the old way.
pub async fn common(
    out: &mut impl Write,
    targets: &ExperimentTargets,
    mib: &MibConfig,
) -> Result<()> {
    let mut view = MibView::with_config(mib.clone())?;
    let command = make_get(&targets.agent, &targets.agent_community, system_objects())
        .with_settings(targets);
    let results = run_command(&command, &mut view).await?;
    tracing::warn!(
        target: "snmp_adapter::experiments",
        "print_first_result is deprecated, use print_results"
    );
    print_first_result(out, &results, &view)
}

/// X-410 temperature sensor reading.
pub async fn temperature(
    out: &mut impl Write,
    targets: &ExperimentTargets,
    mib: &MibConfig,
) -> Result<()> {
    let mut view = MibView::with_config(mib.clone())?;
    let command = make_get(
        &targets.relay,
        &targets.relay_community,
        [make_object("XYTRONIX-MIB", "temp", [0])],
    )
    .with_settings(targets);
    let results = run_command(&command, &mut view).await?;
    print_results(out, &results, &view)
}

/// `common`, rebuilt on the helpers.
pub async fn rewrite(
    out: &mut impl Write,
    targets: &ExperimentTargets,
    mib: &MibConfig,
) -> Result<()> {
    let mut view = MibView::with_config(mib.clone())?;
    let command = make_get(&targets.agent, &targets.agent_community, system_objects())
        .with_settings(targets);
    let results = run_command(&command, &mut view).await?;
    print_results(out, &results, &view)
}

/// Trap listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenConfig {
    pub address: String,
    pub port: u16,
    pub community: String,
    /// Loaded in addition to [`DEFAULT_MIBS`].
    pub extra_mibs: Vec<String>,
    /// Stop after this many notifications instead of waiting for Ctrl-C.
    pub limit: Option<usize>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_LISTEN_ADDRESS.into(),
            port: DEFAULT_TRAP_PORT,
            community: DEFAULT_COMMUNITY.into(),
            extra_mibs: Vec::new(),
            limit: None,
        }
    }
}

impl ListenConfig {
    fn mibs(&self) -> impl Iterator<Item = &str> {
        DEFAULT_MIBS
            .iter()
            .copied()
            .chain(std::iter::once(COEXISTENCE_MIB))
            .chain(self.extra_mibs.iter().map(String::as_str))
    }

    fn bind_target(&self) -> String {
        match self.address.parse::<std::net::IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.address, self.port),
        }
    }
}

/// Print every trap and inform received until Ctrl-C.
pub async fn listen(out: &mut impl Write, config: &ListenConfig, mib: &MibConfig) -> Result<()> {
    let mut view = MibView::with_config(mib.clone())?;
    view.load(config.mibs())?;

    writeln!(
        out,
        "Agent is listening SNMP Trap on {}, Port: {}",
        config.address, config.port
    )?;
    if config.port < 1024 {
        writeln!(
            out,
            "WARNING: Port < 1024. Root priviledges or authbind required on *nix systems."
        )?;
    }
    writeln!(out, "{RULE}")?;
    out.flush()?;

    let receiver = NotificationReceiver::builder()
        .bind(config.bind_target())
        .community(config.community.clone().into_bytes())
        .build()
        .await?;
    writeln!(out, "Press CTRL-C to quit.")?;
    out.flush()?;

    let mut received = 0usize;
    while config.limit.is_none_or(|limit| received < limit) {
        let (notification, source) = tokio::select! {
            next = receiver.recv() => next?,
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::debug!(target: "snmp_adapter::experiments", "interrupted, stopping listener");
                break;
            }
        };
        received += 1;

        writeln!(
            out,
            "\nNotification from {source}, SNMP Engine {}, Context {}",
            receiver.engine_id(),
            receiver.context_name()
        )?;
        for vb in notification.full_varbinds() {
            writeln!(out, "    {} ({}) = {}", view.pretty(&vb.oid), vb.oid, vb.value)?;
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use bytes::Bytes;

    fn view() -> MibView {
        let mut mib = MibView::new().unwrap();
        mib.load(["SNMPv2-MIB", "IF-MIB"]).unwrap();
        mib
    }

    fn sys_descr() -> VarBind {
        VarBind::new(
            oid!(1, 3, 6, 1, 2, 1, 1, 1, 0),
            Value::OctetString(Bytes::from_static(b"Linux box")),
        )
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn make_get_defaults_to_v2c_port_161() {
        let command = make_get("10.0.0.1", "private", [make_object("SNMPv2-MIB", "sysName", [0])]);
        assert_eq!(command.port, 161);
        assert_eq!(command.timeout, Duration::from_secs(1));
        assert_eq!(command.retry, Retry::immediate(5));
        assert_eq!(command.auth, Auth::v2c("private"));
        assert_eq!(command.objects.len(), 1);
        assert_eq!(command.target(), "10.0.0.1:161");

        let v6 = make_get("::1", "public", []).port(1161).version(Version::V1);
        assert_eq!(v6.target(), "[::1]:1161");
        assert_eq!(v6.auth.version, Version::V1);
    }

    #[test]
    fn errors_name_object_at_error_index() {
        let mib = view();
        let results = vec![
            CommandResult::ok(vec![sys_descr()]),
            CommandResult {
                error_indication: None,
                error_status: Some(ErrorStatus::NoSuchName),
                error_index: 2,
                varbinds: vec![
                    VarBind::null(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)),
                    VarBind::null(oid!(1, 3, 6, 1, 2, 1, 1, 7, 0)),
                ],
            },
            CommandResult {
                error_indication: Some("No SNMP response received before timeout".into()),
                error_status: None,
                error_index: 0,
                varbinds: Vec::new(),
            },
            CommandResult {
                error_indication: None,
                error_status: Some(ErrorStatus::GenErr),
                error_index: 0,
                varbinds: Vec::new(),
            },
        ];

        let errors = extract_errors(&results, &mib);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].status.as_deref(), Some("noSuchName"));
        assert_eq!(errors[0].object, "SNMPv2-MIB::sysServices.0");
        assert_eq!(errors[2].object, "?");

        let text = render(|out| print_errors(out, &errors));
        assert_eq!(
            text,
            concat!(
                "noSuchName at SNMPv2-MIB::sysServices.0\n",
                "No SNMP response received before timeout\n",
                "genErr at ?\n",
            )
        );
    }

    #[test]
    fn unnamed_failing_object_is_dotted() {
        let results = vec![CommandResult {
            error_indication: None,
            error_status: Some(ErrorStatus::NoSuchName),
            error_index: 1,
            varbinds: vec![VarBind::null(oid!(2, 25, 1))],
        }];
        let errors = extract_errors(&results, &MibView::new().unwrap());
        assert_eq!(errors[0].object, "2.25.1");
    }

    #[test]
    fn values_keep_first_position() {
        let mib = view();
        let results = vec![
            CommandResult::ok(vec![
                sys_descr(),
                VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::TimeTicks(360_000)),
            ]),
            CommandResult::ok(vec![VarBind::new(
                oid!(1, 3, 6, 1, 2, 1, 1, 1, 0),
                "replaced".into(),
            )]),
        ];
        let values = extract_values(&results, &mib);
        assert_eq!(
            values,
            vec![
                ("SNMPv2-MIB::sysDescr.0".to_string(), Value::from("replaced")),
                ("SNMPv2-MIB::sysUpTime.0".to_string(), Value::TimeTicks(360_000)),
            ]
        );

        let text = render(|out| print_values(out, &values));
        assert_eq!(
            text,
            "SNMPv2-MIB::sysDescr.0 = replaced\nSNMPv2-MIB::sysUpTime.0 = 360000\n"
        );
    }

    #[test]
    fn print_results_prints_errors_before_values() {
        let mib = view();
        let results = vec![
            CommandResult::ok(vec![sys_descr()]),
            CommandResult {
                error_indication: Some("request timed out".into()),
                error_status: None,
                error_index: 0,
                varbinds: Vec::new(),
            },
        ];
        let text = render(|out| print_results(out, &results, &mib));
        assert_eq!(text, "request timed out\nSNMPv2-MIB::sysDescr.0 = Linux box\n");
    }

    #[test]
    fn first_result_printer() {
        let mib = view();
        let ok = vec![
            CommandResult::ok(vec![sys_descr()]),
            CommandResult::indication(&Error::Config("ignored".into())),
        ];
        assert_eq!(
            render(|out| print_first_result(out, &ok, &mib)),
            "SNMPv2-MIB::sysDescr.0 = Linux box\n"
        );

        let status = vec![CommandResult {
            error_indication: None,
            error_status: Some(ErrorStatus::TooBig),
            error_index: 0,
            varbinds: vec![VarBind::null(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0))],
        }];
        assert_eq!(
            render(|out| print_first_result(out, &status, &mib)),
            "tooBig at ?\n"
        );

        let named = vec![CommandResult {
            error_index: 1,
            ..status[0].clone()
        }];
        assert_eq!(
            render(|out| print_first_result(out, &named, &mib)),
            "tooBig at SNMPv2-MIB::sysDescr.0\n"
        );
        assert_eq!(render(|out| print_first_result(out, &[], &mib)), "");
    }

    #[test]
    fn listen_defaults_and_mibs() {
        let config = ListenConfig {
            extra_mibs: vec!["ACME-MIB".into()],
            ..Default::default()
        };
        assert_eq!(config.bind_target(), "0.0.0.0:162");
        let mibs: Vec<&str> = config.mibs().collect();
        assert_eq!(
            mibs,
            [
                "SNMPv2-MIB",
                "IF-MIB",
                "XYTRONIX-MIB",
                "SNMP-COMMUNITY-MIB",
                "ACME-MIB"
            ]
        );
    }

    #[tokio::test]
    async fn unknown_object_is_returned_as_error() {
        let mut mib = MibView::new().unwrap();
        let command = make_get("127.0.0.1", "public", [make_object("SNMPv2-MIB", "sysNope", [0])]);
        let err = run_command(&command, &mut mib).await.unwrap_err();
        assert!(matches!(*err, Error::UnknownObject { .. }));
    }

    #[tokio::test]
    async fn missing_module_is_returned_as_error() {
        let mut mib = MibView::new().unwrap();
        let command = make_get("127.0.0.1", "public", [make_object("NOPE-MIB", "thing", [0])]);
        let err = run_command(&command, &mut mib).await.unwrap_err();
        assert!(matches!(*err, Error::Mib { .. }));
    }
}
