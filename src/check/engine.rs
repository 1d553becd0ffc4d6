//! Check engine: runs registered checks against a manifest.

use std::path::Path;

use tracing::{debug, info, warn};

use super::checks::default_checks;
use super::config::{CheckContext, EngineConfig};
use super::finding::{CheckCategory, Finding};
use super::rule::BoxedCheck;
use crate::config::Config;
use crate::manifest::{self, Manifest};
use crate::report::{Report, RunState, aggregate};

/// Findings of one check, in the order the check produced them
#[derive(Debug, Clone)]
pub struct CheckStream {
    pub check_id: String,
    pub findings: Vec<Finding>,
}

/// The engine that manages and runs checks
pub struct CheckEngine {
    checks: Vec<BoxedCheck>,
    config: EngineConfig,
}

impl CheckEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            checks: Vec::new(),
            config,
        }
    }

    /// Engine with the built-in checks registered in report order
    #[must_use]
    pub fn with_default_checks(config: EngineConfig) -> Self {
        let mut engine = Self::new(config);
        for check in default_checks() {
            engine.register(check);
        }
        engine
    }

    pub fn register(&mut self, check: BoxedCheck) {
        self.checks.push(check);
    }

    #[must_use]
    pub fn with_check(mut self, check: BoxedCheck) -> Self {
        self.register(check);
        self
    }

    /// Run every enabled check, one stream per check in registration order
    #[must_use]
    pub fn run(&self, ctx: &CheckContext<'_>) -> Vec<CheckStream> {
        let mut streams = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            if self.config.is_check_disabled(check.id()) {
                debug!(check = check.id(), "check disabled; skipping");
                continue;
            }

            let mut findings = check.run(ctx);
            for finding in &mut findings {
                finding.outcome = self.config.effective_outcome(finding.outcome);
            }
            debug!(check = check.id(), findings = findings.len(), "check complete");

            streams.push(CheckStream {
                check_id: check.id().to_string(),
                findings,
            });
        }

        streams
    }

    /// Validate an already loaded manifest
    #[must_use]
    pub fn validate(&self, manifest: &Manifest, config: &Config) -> Report {
        let ctx = CheckContext::new(manifest, config);
        let report = aggregate(&manifest.path, self.run(&ctx));
        info!(
            successes = report.successes.len(),
            warnings = report.warnings.len(),
            errors = report.errors.len(),
            total = report.total(),
            "validation complete"
        );
        report
    }

    /// Load the manifest at `path` and validate it.
    ///
    /// A load failure yields a report holding exactly one error.
    #[must_use]
    pub fn validate_path(&self, path: &Path, config: &Config) -> Report {
        debug!(state = %RunState::Loading, path = %path.display());
        match manifest::load(path) {
            Ok(manifest) => {
                debug!(state = %RunState::Validating, checks = self.checks.len());
                let report = self.validate(&manifest, config);
                debug!(state = %RunState::Reported);
                report
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "manifest could not be loaded");
                debug!(state = %RunState::Reported, "load failed");
                Report::fatal(path, &err)
            }
        }
    }

    /// List all registered checks
    #[must_use]
    pub fn list_checks(&self) -> Vec<CheckInfo> {
        self.checks
            .iter()
            .map(|c| CheckInfo {
                id: c.id().to_string(),
                name: c.name().to_string(),
                description: c.description().to_string(),
                category: c.category(),
                disabled: self.config.is_check_disabled(c.id()),
            })
            .collect()
    }
}

/// Information about a registered check
#[derive(Debug, Clone)]
pub struct CheckInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: CheckCategory,
    pub disabled: bool,
}
