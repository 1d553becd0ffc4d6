//! plint check - Validate a plugin bundle

use std::path::PathBuf;

use clap::Args;
use console::strip_ansi_codes;
use tracing::info;

use crate::app::AppContext;
use crate::check::{CheckEngine, EngineConfig};
use crate::cli::output::{OutputFormat, RobotStatus, emit_json, robot_with_status};
use crate::config::Config;
use crate::error::{PlintError, Result};
use crate::manifest;
use crate::report::{Report, render_human, to_json};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Plugin root directory (defaults to the current directory)
    #[arg(value_name = "PLUGIN_ROOT")]
    pub root: Option<PathBuf>,

    /// Manifest path (defaults to .claude-plugin/plugin.json under the root)
    #[arg(long, env = "PLINT_MANIFEST", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Skip specific checks (comma-separated IDs)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Minimum number of agents before warning
    #[arg(long)]
    pub min_agents: Option<usize>,

    /// Minimum number of skills before warning
    #[arg(long)]
    pub min_skills: Option<usize>,

    /// Print at most N successes
    #[arg(long, value_name = "N")]
    pub success_limit: Option<usize>,

    /// Print without colors
    #[arg(long)]
    pub plain: bool,
}

pub fn run(ctx: &AppContext, args: &CheckArgs) -> Result<()> {
    let config = effective_config(&ctx.config, args);
    let manifest_path = manifest::locate(ctx.plugin_root(), args.manifest.as_deref());
    info!(manifest = %manifest_path.display(), "validating plugin");

    let engine = CheckEngine::with_default_checks(config.engine.clone());
    let report = engine.validate_path(&manifest_path, &config);

    if ctx.output_format == OutputFormat::Human {
        let rendered = render_human(&report, &config.report);
        if args.plain {
            println!("{}", strip_ansi_codes(&rendered));
        } else {
            println!("{rendered}");
        }
    } else {
        emit_json(&robot_with_status(status_for(&report), to_json(&report)))?;
    }

    if report.is_production_ready() {
        Ok(())
    } else {
        Err(PlintError::ValidationFailed(format!(
            "plugin has {} critical errors",
            report.errors.len()
        )))
    }
}

/// Layer command-line flags over the loaded configuration.
#[must_use]
pub fn effective_config(base: &Config, args: &CheckArgs) -> Config {
    let mut config = base.clone();
    if let Some(value) = args.min_agents {
        config.policy.min_agents = value;
    }
    if let Some(value) = args.min_skills {
        config.policy.min_skills = value;
    }
    if let Some(value) = args.success_limit {
        config.report.success_limit = Some(value);
    }

    let mut engine: EngineConfig = config.engine;
    if args.strict {
        engine = engine.strict();
    }
    for check_id in &args.skip {
        engine = engine.disable_check(check_id.trim());
    }
    config.engine = engine;
    config
}

fn status_for(report: &Report) -> RobotStatus {
    if report.is_production_ready() {
        RobotStatus::Ok
    } else {
        RobotStatus::Failed {
            errors: report.errors.len(),
        }
    }
}
