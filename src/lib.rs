//! plint - integrity checker for agent/skill/command plugin bundles.
//!
//! Loads a plugin manifest, runs the built-in checks against it and the
//! files it references, and merges their findings into a single report.

pub mod app;
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod report;
pub mod test_utils;

pub use error::{PlintError, Result};
