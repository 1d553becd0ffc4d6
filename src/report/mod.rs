//! Validation report: an ordered merge of check findings.

pub mod render;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::check::{CheckStream, Finding, Outcome};
use crate::error::PlintError;

pub use render::{ReportJson, render_human, to_json};

/// Check id recorded on the finding produced by a failed manifest load.
pub const LOAD_CHECK_ID: &str = "manifest";

/// Phases of a validation run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Loading,
    Validating,
    Reported,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Validating => write!(f, "validating"),
            Self::Reported => write!(f, "reported"),
        }
    }
}

/// Result of one validation run.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Report {
    pub manifest: PathBuf,
    /// The manifest could not be loaded and no check ran
    pub load_failed: bool,
    pub successes: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub errors: Vec<Finding>,
}

impl Report {
    #[must_use]
    pub fn new(manifest: &Path) -> Self {
        Self {
            manifest: manifest.to_path_buf(),
            ..Self::default()
        }
    }

    /// Report for a run that stopped at the load step.
    #[must_use]
    pub fn fatal(manifest: &Path, err: &PlintError) -> Self {
        let mut report = Self::new(manifest);
        report.load_failed = true;
        report.push(Finding::error(LOAD_CHECK_ID, format!("error reading manifest: {err}")));
        report
    }

    /// Route a finding into its stream.
    pub fn push(&mut self, finding: Finding) {
        match finding.outcome {
            Outcome::Success => self.successes.push(finding),
            Outcome::Warning => self.warnings.push(finding),
            Outcome::Error => self.errors.push(finding),
        }
    }

    /// True iff no errors were found.
    #[must_use]
    pub fn is_production_ready(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.successes.len() + self.warnings.len() + self.errors.len()
    }
}

/// Merge check streams into a report, preserving stream order and the order
/// within each stream.
#[must_use]
pub fn aggregate(manifest: &Path, streams: impl IntoIterator<Item = CheckStream>) -> Report {
    let mut report = Report::new(manifest);
    for stream in streams {
        for finding in stream.findings {
            report.push(finding);
        }
    }
    report
}
