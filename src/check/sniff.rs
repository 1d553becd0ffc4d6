//! Shallow content sniff of entry documents.
//!
//! Only structural markers are inspected: an opening and closing header
//! delimiter, the `name`/`description` keys inside the header, and a title
//! line in the body. Prose is never looked at.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ContentConfig;

/// `key: value` line inside a metadata header.
static RE_HEADER_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+)\s*:").expect("static regex"));

/// Keys every metadata header must carry.
pub const REQUIRED_HEADER_KEYS: &[&str] = &["name", "description"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sniff {
    /// Document opens with a closed delimiter block
    pub has_header: bool,
    /// Required keys absent from the header (empty when no header)
    pub missing_keys: Vec<&'static str>,
    /// A title line exists outside the header
    pub has_title: bool,
}

impl Sniff {
    /// Problems to report for a document that must (or need not) carry a title.
    #[must_use]
    pub fn problems(&self, require_title: bool) -> Vec<String> {
        let mut problems = Vec::new();
        if self.has_header {
            for key in &self.missing_keys {
                problems.push(format!("header has no '{key}' field"));
            }
        } else {
            problems.push("no metadata header".to_string());
        }
        if require_title && !self.has_title {
            problems.push("no title line".to_string());
        }
        problems
    }
}

/// Inspect a document's structural markers.
#[must_use]
pub fn sniff(content: &str, markers: &ContentConfig) -> Sniff {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let delimiter = markers.header_delimiter.trim();
    let lines: Vec<&str> = content.lines().collect();

    let mut result = Sniff::default();
    let mut body_start = 0usize;

    let opening = lines.iter().position(|line| !line.trim().is_empty());
    if let Some(opening) = opening.filter(|&i| lines[i].trim() == delimiter) {
        if let Some(offset) = lines[opening + 1..]
            .iter()
            .position(|line| line.trim() == delimiter)
        {
            let closing = opening + 1 + offset;
            let keys: Vec<&str> = lines[opening + 1..closing]
                .iter()
                .filter_map(|line| RE_HEADER_KEY.captures(line))
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .collect();
            result.has_header = true;
            result.missing_keys = REQUIRED_HEADER_KEYS
                .iter()
                .copied()
                .filter(|key| !keys.contains(key))
                .collect();
            body_start = closing + 1;
        }
    }

    result.has_title = lines[body_start.min(lines.len())..]
        .iter()
        .any(|line| line.starts_with(markers.title_marker.as_str()));
    result
}
