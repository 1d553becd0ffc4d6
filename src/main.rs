//! plint - Plugin bundle integrity checker
//!
//! Validates a plugin manifest and the agents, skills, commands and hooks it
//! references.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use plint::app::AppContext;
use plint::cli::output::{emit_json, robot_error};
use plint::cli::{Cli, Commands};
use plint::{PlintError, Result};

/// Exit status for a report with at least one error.
const EXIT_NOT_READY: u8 = 1;
/// Exit status for failures that happen before validation (config, I/O).
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        // The report has already been printed.
        Err(PlintError::ValidationFailed(_)) => ExitCode::from(EXIT_NOT_READY),
        Err(e) => {
            if cli.robot {
                let code = match &e {
                    PlintError::Config(_) => "config_error",
                    err if err.is_fatal_load() => "io_error",
                    _ => "error",
                };
                if emit_json(&robot_error(code, e.to_string())).is_err() {
                    eprintln!("Error: {e}");
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if let Commands::Completions(args) = &cli.command {
        return plint::cli::commands::completions::run(args);
    }
    let ctx = AppContext::from_cli(cli)?;
    plint::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,plint=info",
        1 => "info,plint=debug",
        2 => "debug,plint=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
