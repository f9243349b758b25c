//! Command-line argument structures for the `snmp-adapter` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::experiments::db::{DEFAULT_DATABASE, DbConfig};
use crate::experiments::snmp::{
    DEFAULT_COMMUNITY, DEFAULT_GET_RETRIES, DEFAULT_GET_TIMEOUT, DEFAULT_LISTEN_ADDRESS,
    ExperimentTargets, ListenConfig,
};
use crate::experiments::xml::DEFAULT_TEXT;
use crate::mib::MibConfig;
use crate::notification::DEFAULT_TRAP_PORT;

/// Run SNMP, XML and database experiments.
///
/// Commands can be shortened to any unique prefix: `snmp q` runs
/// `snmp quickstart`.
#[derive(Debug, Parser)]
#[command(name = "snmp-adapter", version, about, infer_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub group: Group,
}

/// Options accepted before or after any command.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Enable debug logging (snmp_adapter=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Enable trace logging (snmp_adapter=trace).
    #[arg(short = 'D', long = "trace", global = true)]
    pub trace: bool,

    /// Directory to search for MIB files before the built-in modules. Repeatable.
    #[arg(
        long = "mib-dir",
        value_name = "DIR",
        env = "SNMP_ADAPTER_MIB_DIRS",
        value_delimiter = ',',
        global = true
    )]
    pub mib_dirs: Vec<PathBuf>,

    /// SQLite database used by the db experiments.
    #[arg(
        long = "database",
        value_name = "PATH",
        env = "SNMP_ADAPTER_DATABASE",
        default_value = DEFAULT_DATABASE,
        global = true
    )]
    pub database: PathBuf,

    /// Seconds to wait for each SNMP response.
    #[arg(
        long = "timeout",
        value_name = "SECS",
        default_value_t = DEFAULT_GET_TIMEOUT.as_secs_f64(),
        global = true
    )]
    pub timeout: f64,

    /// Retries after a timed-out SNMP request.
    #[arg(
        long = "retries",
        value_name = "N",
        default_value_t = DEFAULT_GET_RETRIES,
        global = true
    )]
    pub retries: u32,
}

impl GlobalArgs {
    pub fn mib_config(&self) -> MibConfig {
        MibConfig::with_dirs(self.mib_dirs.iter().cloned())
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database.clone())
    }

    /// Experiment targets with the timeout and retry overrides applied.
    pub fn targets(&self) -> ExperimentTargets {
        ExperimentTargets {
            timeout: self.timeout_duration(),
            retries: self.retries,
            ..ExperimentTargets::default()
        }
    }

    /// Invalid or non-positive values fall back to the default timeout.
    pub fn timeout_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or(DEFAULT_GET_TIMEOUT)
    }

    /// Filter directive for the tracing subscriber.
    pub fn log_filter(&self) -> &'static str {
        if self.trace {
            "snmp_adapter=trace"
        } else if self.debug {
            "snmp_adapter=debug"
        } else {
            "snmp_adapter=warn"
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Group {
    /// SNMP GET and trap experiments.
    #[command(subcommand)]
    Snmp(SnmpCommand),

    /// XML experiments.
    #[command(subcommand)]
    Xml(XmlCommand),

    /// Database experiments.
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
#[command(infer_subcommands = true)]
pub enum SnmpCommand {
    /// SNMPv1 GET of sysDescr.0.
    Quickstart,
    /// SNMPv2c GET of system and interface objects (first-result printer).
    Common,
    /// One-wire temperature sensor on a ControlByWeb X-410 module.
    Temperature,
    /// `common`, rewritten with the GET helpers.
    Rewrite,
    /// Listen for SNMP traps and informs and print them.
    Listen(ListenArgs),
}

#[derive(Debug, Args)]
pub struct ListenArgs {
    /// Interface IP address on which to listen.
    #[arg(short = 'a', long = "address", default_value = DEFAULT_LISTEN_ADDRESS)]
    pub address: String,

    /// Port on which to listen.
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_TRAP_PORT)]
    pub port: u16,

    /// SNMP v1/v2c community to accept.
    #[arg(short = 'c', long = "community", default_value = DEFAULT_COMMUNITY)]
    pub community: String,

    /// Load an extra MIB module for nicer output. Repeatable.
    #[arg(short = 'm', long = "mib", value_name = "MIB")]
    pub mibs: Vec<String>,

    /// Exit after this many notifications.
    #[arg(long = "count", value_name = "N")]
    pub count: Option<usize>,
}

impl ListenArgs {
    pub fn to_config(&self) -> ListenConfig {
        ListenConfig {
            address: self.address.clone(),
            port: self.port,
            community: self.community.clone(),
            extra_mibs: self.mibs.clone(),
            limit: self.count,
        }
    }
}

#[derive(Debug, Subcommand)]
#[command(infer_subcommands = true)]
pub enum XmlCommand {
    /// Print the words of TEXT as an XML document.
    Words(TextArgs),
}

#[derive(Debug, Subcommand)]
#[command(infer_subcommands = true)]
pub enum DbCommand {
    /// Store a words document with raw driver calls.
    Sqlite(TextArgs),
    /// Store a words document through the query builder.
    Litealchemy(TextArgs),
    /// Store a words document through the object mapper.
    Ormlite(TextArgs),
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Words to use; defaults to a well-known line.
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,
}

impl TextArgs {
    /// Arguments joined by single spaces, or the default text.
    pub fn text(&self) -> String {
        if self.text.is_empty() {
            DEFAULT_TEXT.to_string()
        } else {
            self.text.join(" ")
        }
    }
}
