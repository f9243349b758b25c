//! Command-line front end: argument parsing, logging setup and dispatch.

pub mod args;

use std::io::Write;

pub use args::{Cli, DbCommand, GlobalArgs, Group, ListenArgs, SnmpCommand, TextArgs, XmlCommand};

use crate::error::Result;
use crate::experiments::{db, snmp, xml};

/// Install a stderr `fmt` subscriber filtered by `-d`/`-D`.
pub fn init_tracing(global: &GlobalArgs) {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(global.log_filter()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the selected experiment, writing its output to `out`.
pub async fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let global = &cli.global;
    tracing::debug!(target: "snmp_adapter::cli", command = ?cli.group, "dispatching");

    match &cli.group {
        Group::Snmp(command) => {
            let mib = global.mib_config();
            let targets = global.targets();
            match command {
                SnmpCommand::Quickstart => snmp::quickstart(out, &targets, &mib).await,
                SnmpCommand::Common => snmp::common(out, &targets, &mib).await,
                SnmpCommand::Temperature => snmp::temperature(out, &targets, &mib).await,
                SnmpCommand::Rewrite => snmp::rewrite(out, &targets, &mib).await,
                SnmpCommand::Listen(args) => snmp::listen(out, &args.to_config(), &mib).await,
            }
        }
        Group::Xml(XmlCommand::Words(args)) => xml::words(out, &args.text()),
        Group::Db(command) => {
            let config = global.db_config();
            match command {
                DbCommand::Sqlite(args) => db::sqlite(out, &args.text(), &config),
                DbCommand::Litealchemy(args) => db::litealchemy(out, &args.text(), &config),
                DbCommand::Ormlite(args) => db::ormlite(out, &args.text(), &config),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn dispatches_db_and_xml() {
        let dir = tempfile::tempdir().unwrap();
        let database = dir.path().join("cli.db");
        let database = database.to_str().unwrap();

        let cli = Cli::try_parse_from([
            "snmp-adapter",
            "--database",
            database,
            "db",
            "lite",
            "hello",
        ])
        .unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Creating words table.\n"));
        assert!(text.contains("<word>hello</word>"));

        let cli = Cli::try_parse_from(["snmp-adapter", "xml", "words", "a", "b"]).unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().contains("<word>a</word><word>b</word>"));
    }
}
