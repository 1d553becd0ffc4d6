//! Check trait.

use super::config::CheckContext;
use super::finding::{CheckCategory, Finding};

/// One validation pass over a loaded manifest.
///
/// Checks are stateless and only read from the `CheckContext`. They
/// accumulate findings rather than stop at the first problem.
pub trait Check: Send + Sync {
    /// Unique identifier (e.g., "integrity"), used by `--skip`
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// What this check verifies
    fn description(&self) -> &str;

    fn category(&self) -> CheckCategory;

    /// Run the check, returning findings in deterministic order
    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding>;
}

/// A boxed check for dynamic dispatch
pub type BoxedCheck = Box<dyn Check>;
