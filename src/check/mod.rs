//! Plugin manifest checks.
//!
//! - `Check` trait for a single validation pass
//! - `CheckEngine` for running checks against a manifest
//! - `Finding` types for categorized results
//! - `EngineConfig` for disabling checks and strict mode
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use plint::check::{CheckEngine, EngineConfig};
//! use plint::config::Config;
//!
//! let config = Config::default();
//! let engine = CheckEngine::with_default_checks(EngineConfig::new());
//! let report = engine.validate_path(Path::new(".claude-plugin/plugin.json"), &config);
//!
//! for error in &report.errors {
//!     eprintln!("{error}");
//! }
//! ```

pub mod checks;
pub mod config;
pub mod engine;
pub mod finding;
pub mod rule;
pub mod sniff;

pub use checks::default_checks;
pub use config::{CheckContext, EngineConfig};
pub use engine::{CheckEngine, CheckInfo, CheckStream};
pub use finding::{CheckCategory, Finding, Outcome};
pub use rule::{BoxedCheck, Check};
