//! Subcommand implementations.

pub mod check;
pub mod checks;
pub mod completions;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Check(args) => check::run(ctx, args),
        Commands::Checks(args) => checks::run(ctx, args),
        Commands::Completions(args) => completions::run(args),
    }
}
