//! Error types for plint.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("manifest parse error in {}: {message}", .path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

impl PlintError {
    /// Whether this error aborts a validation run before any check executes.
    #[must_use]
    pub const fn is_fatal_load(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::ManifestNotFound(_) | Self::ManifestParse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_errors_are_fatal() {
        let missing = PlintError::ManifestNotFound(PathBuf::from("plugin.json"));
        assert!(missing.is_fatal_load());
        assert_eq!(missing.to_string(), "manifest not found: plugin.json");

        let parse = PlintError::ManifestParse {
            path: PathBuf::from("plugin.json"),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert!(parse.is_fatal_load());
        assert!(parse.to_string().contains("line 1 column 1"));
    }

    #[test]
    fn test_config_error_not_fatal_load() {
        let err = PlintError::Config("bad threshold".to_string());
        assert!(!err.is_fatal_load());
    }
}
