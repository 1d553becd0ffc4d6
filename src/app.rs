use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::error::Result;

pub struct AppContext {
    /// Directory the plugin bundle lives in
    pub plugin_root: PathBuf,
    pub config: Config,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let plugin_root = match &cli.command {
            Commands::Check(args) => args.root.clone(),
            Commands::Checks(_) | Commands::Completions(_) => None,
        }
        .map_or_else(std::env::current_dir, Ok)?;

        let config = Config::load(cli.config.as_deref(), &plugin_root)?;

        Ok(Self {
            plugin_root,
            config,
            output_format: cli.output_format(),
        })
    }

    #[must_use]
    pub fn plugin_root(&self) -> &Path {
        &self.plugin_root
    }
}
