mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::commands::validate;
use crate::error::{exit_code_for, report_error};

#[derive(Debug, Parser)]
#[command(
    name = "phone-number-validate",
    version,
    about = "Validates phone numbers",
    long_about = "Validates a list of E.164 phone numbers against a phone validation service."
)]
struct Cli {
    /// Application config file (defaults to $XDG_CONFIG_HOME/numval/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, short)]
    verbose: bool,
    #[command(flatten)]
    validate: validate::ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    validate::validate(cli.config, cli.validate)
}

fn init_logging(verbose: bool) {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
