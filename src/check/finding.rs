//! Finding types produced by checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::manifest::Collection;

/// Category of a check
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckCategory {
    /// Required fields and collection shape
    Structure,
    /// Referenced files on disk
    Filesystem,
    /// Identifier uniqueness and cross-references
    Reference,
    /// Hooks and documentation shipped alongside the manifest
    Layout,
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => write!(f, "structure"),
            Self::Filesystem => write!(f, "filesystem"),
            Self::Reference => write!(f, "reference"),
            Self::Layout => write!(f, "layout"),
        }
    }
}

/// Outcome of a single finding
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Something was verified
    Success,
    /// Advisory, does not block production readiness
    Warning,
    /// Blocks production readiness
    Error,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One categorized result of a check
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// The check that produced this finding
    pub check_id: String,
    pub outcome: Outcome,
    pub message: String,
    /// Collection of the offending entry, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    /// Identifier (or best-effort label) of the offending entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(check_id: impl Into<String>, outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            check_id: check_id.into(),
            outcome,
            message: message.into(),
            collection: None,
            entry_id: None,
            suggestion: None,
        }
    }

    pub fn success(check_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check_id, Outcome::Success, message)
    }

    pub fn warning(check_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check_id, Outcome::Warning, message)
    }

    pub fn error(check_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(check_id, Outcome::Error, message)
    }

    /// Attach the collection a finding is about
    #[must_use]
    pub const fn with_collection(mut self, collection: Collection) -> Self {
        self.collection = Some(collection);
        self
    }

    /// Attach the offending entry
    #[must_use]
    pub fn with_entry(mut self, collection: Collection, entry_id: impl Into<String>) -> Self {
        self.collection = Some(collection);
        self.entry_id = Some(entry_id.into());
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.outcome, self.check_id, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (hint: {suggestion})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_ordering() {
        assert!(Outcome::Success < Outcome::Warning);
        assert!(Outcome::Warning < Outcome::Error);
    }

    #[test]
    fn test_finding_builder() {
        let finding = Finding::error("integrity", "duplicate id 'a1' in collection 'agents'")
            .with_entry(Collection::Agents, "a1")
            .with_suggestion("rename one of the entries");

        assert_eq!(finding.outcome, Outcome::Error);
        assert_eq!(finding.collection, Some(Collection::Agents));
        assert_eq!(finding.entry_id.as_deref(), Some("a1"));
        assert_eq!(
            finding.to_string(),
            "[error] integrity: duplicate id 'a1' in collection 'agents' (hint: rename one of the entries)"
        );
    }

    #[test]
    fn test_finding_serializes_without_empty_fields() {
        let finding = Finding::success("structure", "3 agents defined");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["outcome"], "success");
        assert!(json.get("entry_id").is_none());
    }
}
