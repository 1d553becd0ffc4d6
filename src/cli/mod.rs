//! Command-line interface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

use commands::check::CheckArgs;
use commands::checks::ChecksArgs;
use commands::completions::CompletionsArgs;

#[derive(Parser, Debug)]
#[command(name = "plint", version, about = "Integrity checker for agent/skill/command plugin bundles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Machine-readable JSON output (same as --format json)
    #[arg(long, global = true, env = "PLINT_ROBOT")]
    pub robot: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Config file (defaults to the global and project config files)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        if self.robot {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a plugin bundle and print the report
    Check(CheckArgs),
    /// List the available checks
    Checks(ChecksArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}
