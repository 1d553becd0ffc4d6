//! Manifest loading.
//!
//! The loader is the only fail-fast step of a run: an unreadable or malformed
//! manifest aborts validation before any check executes.

pub mod shape;
pub mod types;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PlintError, Result};

pub use shape::TypeMismatch;
pub use types::{Author, Collection, Entry, Manifest};

/// Conventional directory holding the manifest inside a plugin root.
pub const MANIFEST_DIR: &str = ".claude-plugin";

/// Manifest locations probed under a plugin root, in order.
pub const MANIFEST_CANDIDATES: &[&str] = &[
    ".claude-plugin/plugin.json",
    "plugin.json",
    "plugin.yaml",
    "plugin.yml",
];

/// Serialization format of a manifest document.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Pick the format from a file extension; JSON unless it says YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Resolve the manifest path for a plugin root.
///
/// An explicit path always wins. Otherwise the first existing candidate is
/// used, falling back to the conventional location so that a missing
/// manifest is reported against the path users expect.
#[must_use]
pub fn locate(plugin_root: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    MANIFEST_CANDIDATES
        .iter()
        .map(|candidate| plugin_root.join(candidate))
        .find(|path| path.is_file())
        .unwrap_or_else(|| plugin_root.join(MANIFEST_CANDIDATES[0]))
}

/// Load and parse a manifest document.
pub fn load(path: &Path) -> Result<Manifest> {
    debug!(path = %path.display(), "loading manifest");
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(PlintError::ManifestNotFound(path.to_path_buf()));
        }
        Err(err) if err.kind() == ErrorKind::InvalidData => {
            return Err(PlintError::ManifestParse {
                path: path.to_path_buf(),
                message: format!("not valid UTF-8: {err}"),
            });
        }
        Err(err) => return Err(err.into()),
    };

    let mut manifest =
        parse_str(&raw, ManifestFormat::from_path(path)).map_err(|message| {
            PlintError::ManifestParse {
                path: path.to_path_buf(),
                message,
            }
        })?;
    manifest.path = path.to_path_buf();
    manifest.base_dir = base_dir_for(path);
    debug!(base_dir = %manifest.base_dir.display(), "manifest loaded");
    Ok(manifest)
}

/// Parse manifest text. The root must be a mapping of string keys.
///
/// Values of the wrong type do not fail the parse; they are recorded in
/// `Manifest::type_mismatches` and left out of the typed fields.
pub fn parse_str(raw: &str, format: ManifestFormat) -> std::result::Result<Manifest, String> {
    let value: serde_json::Value = match format {
        ManifestFormat::Json => serde_json::from_str(raw).map_err(|err| err.to_string())?,
        ManifestFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(raw).map_err(|err| err.to_string())?;
            if !value.is_mapping() {
                return Err("manifest root must be a mapping".to_string());
            }
            serde_json::to_value(value).map_err(|err| err.to_string())?
        }
    };
    let serde_json::Value::Object(mut root) = value else {
        return Err("manifest root must be a mapping".to_string());
    };

    let type_mismatches = shape::conform(&mut root);
    if !type_mismatches.is_empty() {
        debug!(count = type_mismatches.len(), "manifest has mistyped values");
    }
    let mut manifest: Manifest =
        serde_json::from_value(serde_json::Value::Object(root)).map_err(|err| err.to_string())?;
    manifest.type_mismatches = type_mismatches;
    Ok(manifest)
}

/// Directory that entry file pointers are relative to.
///
/// A manifest kept in `.claude-plugin/` describes the directory above it.
#[must_use]
pub fn base_dir_for(manifest_path: &Path) -> PathBuf {
    let parent = match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if parent.file_name().is_some_and(|name| name == MANIFEST_DIR) {
        return match parent.parent() {
            Some(root) if !root.as_os_str().is_empty() => root.to_path_buf(),
            _ => PathBuf::from("."),
        };
    }
    parent.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::PluginFixture;

    #[test]
    fn test_load_json_manifest() {
        let fixture = PluginFixture::new();
        let path = fixture.write_manifest(
            r#"{
                "name": "demo",
                "version": "1.0.0",
                "agents": [{"id": "a1", "file": "agents/a1.md"}],
                "skills": [{"id": "s1", "agent": "a1", "file": "skills/s1.md"}]
            }"#,
        );

        let manifest = load(&path).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert_eq!(manifest.agents.as_ref().map(Vec::len), Some(1));
        assert_eq!(manifest.base_dir, fixture.root());
        assert!(manifest.commands.is_none());
    }

    #[test]
    fn test_load_yaml_manifest() {
        let fixture = PluginFixture::new();
        let path = fixture.create_file(
            "plugin.yaml",
            "name: demo\nversion: 0.2.0\nagents:\n  - id: a1\n    file: agents/a1.md\n",
        );

        let manifest = load(&path).unwrap();
        assert_eq!(manifest.version.as_deref(), Some("0.2.0"));
        assert_eq!(manifest.base_dir, fixture.root());
    }

    #[test]
    fn test_missing_manifest_is_not_found() {
        let fixture = PluginFixture::new();
        let err = load(&fixture.root().join("nope.json")).unwrap_err();
        assert!(matches!(err, PlintError::ManifestNotFound(_)));
    }

    #[test]
    fn test_malformed_manifest_is_parse_error() {
        let fixture = PluginFixture::new();
        let path = fixture.write_manifest("{ \"name\": ");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, PlintError::ManifestParse { .. }));
    }

    #[test]
    fn test_non_mapping_root_is_parse_error() {
        let err = parse_str("[1, 2, 3]", ManifestFormat::Json).unwrap_err();
        assert!(err.contains("mapping"));
        let err = parse_str("- a\n- b\n", ManifestFormat::Yaml).unwrap_err();
        assert!(err.contains("mapping"));
    }

    #[test]
    fn test_wrongly_typed_values_do_not_fail_the_parse() {
        let manifest = parse_str(
            r#"{"version": 1.0, "agents": "everything", "skills": [{"id": "s1", "agent": 7}]}"#,
            ManifestFormat::Json,
        )
        .unwrap();

        assert!(manifest.version.is_none());
        assert!(manifest.agents.is_none());
        assert_eq!(manifest.skills.as_ref().map(Vec::len), Some(1));
        assert!(manifest.field_mismatch("version").is_some());
        assert!(manifest.field_mismatch("agents").is_some());
        let entry: Vec<String> = manifest
            .entry_mismatches(Collection::Skills, 0)
            .map(TypeMismatch::location)
            .collect();
        assert_eq!(entry, vec!["skills[0].agent"]);
    }

    #[test]
    fn test_yaml_numeric_version_is_mistyped() {
        let manifest = parse_str("name: demo\nversion: 1.0\n", ManifestFormat::Yaml).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert_eq!(manifest.field_mismatch("version").map(|m| m.found), Some("number"));
    }

    #[test]
    fn test_locate_prefers_conventional_path() {
        let fixture = PluginFixture::new();
        fixture.create_file("plugin.json", "{}");
        assert_eq!(locate(fixture.root(), None), fixture.root().join("plugin.json"));

        fixture.write_manifest("{}");
        assert_eq!(
            locate(fixture.root(), None),
            fixture.root().join(".claude-plugin/plugin.json")
        );

        let explicit = Path::new("/somewhere/else.json");
        assert_eq!(locate(fixture.root(), Some(explicit)), explicit);
    }

    #[test]
    fn test_locate_missing_falls_back_to_conventional_path() {
        let fixture = PluginFixture::new();
        assert_eq!(
            locate(fixture.root(), None),
            fixture.root().join(".claude-plugin/plugin.json")
        );
    }

    #[test]
    fn test_base_dir_for() {
        assert_eq!(
            base_dir_for(Path::new("/p/.claude-plugin/plugin.json")),
            PathBuf::from("/p")
        );
        assert_eq!(base_dir_for(Path::new("/p/plugin.json")), PathBuf::from("/p"));
        assert_eq!(base_dir_for(Path::new("plugin.json")), PathBuf::from("."));
        assert_eq!(
            base_dir_for(Path::new(".claude-plugin/plugin.json")),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ManifestFormat::from_path(Path::new("a.json")), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path(Path::new("a.YML")), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path(Path::new("a")), ManifestFormat::Json);
    }
}
