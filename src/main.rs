use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

use modname::args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = modname::logging::init_tracing(&cli.log) {
        eprintln!("Error: cannot set up logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let status = modname::app::run(cli).context("terminal session failed")?;
    Ok(status.exit_code())
}
