//! snmp-adapter: run SNMP, XML and SQLite experiments.

use std::process::ExitCode;

use clap::Parser;
use snmp_adapter::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    cli::init_tracing(&args.global);

    let mut out = std::io::stdout();
    match cli::run(&args, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
