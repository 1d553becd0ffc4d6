//! Engine configuration and check context.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::finding::Outcome;
use crate::config::Config;
use crate::manifest::Manifest;

/// Configuration for the check engine
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Checks to skip by ID
    #[serde(default)]
    pub disabled_checks: Vec<String>,

    /// Treat warnings as errors
    #[serde(default)]
    pub strict: bool,
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    #[must_use]
    pub fn disable_check(mut self, check_id: impl Into<String>) -> Self {
        let check_id = check_id.into();
        if !self.disabled_checks.contains(&check_id) {
            self.disabled_checks.push(check_id);
        }
        self
    }

    #[must_use]
    pub fn is_check_disabled(&self, check_id: &str) -> bool {
        self.disabled_checks.iter().any(|id| id == check_id)
    }

    /// Outcome after applying strict mode
    #[must_use]
    pub fn effective_outcome(&self, outcome: Outcome) -> Outcome {
        if self.strict && outcome == Outcome::Warning {
            Outcome::Error
        } else {
            outcome
        }
    }
}

/// Context provided to checks
pub struct CheckContext<'a> {
    /// The manifest under validation
    pub manifest: &'a Manifest,

    /// Policy, content markers and layout expectations
    pub config: &'a Config,
}

impl<'a> CheckContext<'a> {
    #[must_use]
    pub const fn new(manifest: &'a Manifest, config: &'a Config) -> Self {
        Self { manifest, config }
    }

    /// Directory entry files are resolved against
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.manifest.base_dir()
    }
}
