use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::check::EngineConfig;
use crate::error::{PlintError, Result};

/// Project-level config file name, looked up in the plugin root.
pub const PROJECT_CONFIG_FILE: &str = ".plint.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub hooks: HooksConfig,
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, plugin_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("PLINT_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(plugin_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Parse a config document and merge it over the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| PlintError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            debug!("no user config directory; skipping global config");
            return Ok(None);
        };
        Self::load_patch(&dir.join("plint/config.toml"))
    }

    fn load_project(plugin_root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&plugin_root.join(PROJECT_CONFIG_FILE))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| PlintError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| PlintError::Config(format!("parse config {}: {err}", path.display())))?;
        debug!(path = %path.display(), "config layer applied");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.policy {
            self.policy.merge(patch);
        }
        if let Some(patch) = patch.content {
            self.content.merge(patch);
        }
        if let Some(patch) = patch.hooks {
            self.hooks.merge(patch);
        }
        if let Some(patch) = patch.docs {
            self.docs.merge(patch);
        }
        if let Some(patch) = patch.report {
            self.report.merge(patch);
        }
        if let Some(patch) = patch.engine {
            if let Some(values) = patch.disabled_checks {
                self.engine.disabled_checks.extend(values);
            }
            if let Some(value) = patch.strict {
                self.engine.strict = value;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(&|key| std::env::var(key).ok())
    }

    /// Apply `PLINT_*` overrides read through `lookup`.
    pub fn apply_overrides_from(&mut self, lookup: &dyn Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = env_usize(lookup, "PLINT_MIN_AGENTS")? {
            self.policy.min_agents = value;
        }
        if let Some(value) = env_usize(lookup, "PLINT_MIN_SKILLS")? {
            self.policy.min_skills = value;
        }
        if let Some(value) = env_usize(lookup, "PLINT_MIN_COMMANDS")? {
            self.policy.min_commands = value;
        }
        if let Some(value) = env_usize(lookup, "PLINT_MAX_DESCRIPTION_LEN")? {
            self.policy.max_description_len = value;
        }
        if let Some(value) = env_bool(lookup, "PLINT_STRICT") {
            self.engine.strict = value;
        }
        if let Some(values) = env_list(lookup, "PLINT_SKIP") {
            self.engine.disabled_checks = merge_unique(values, &self.engine.disabled_checks);
        }
        if let Some(value) = env_usize(lookup, "PLINT_SUCCESS_LIMIT")? {
            self.report.success_limit = Some(value);
        }
        Ok(())
    }
}

/// Advisory thresholds and field bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PolicyConfig {
    pub min_agents: usize,
    pub min_skills: usize,
    pub min_commands: usize,
    pub min_hooks: usize,
    pub recommended_agents: usize,
    pub recommended_skills: usize,
    pub max_description_len: usize,
    pub warn_missing_keywords: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_agents: 5,
            min_skills: 20,
            min_commands: 0,
            min_hooks: 0,
            recommended_agents: 8,
            recommended_skills: 50,
            max_description_len: 1024,
            warn_missing_keywords: true,
        }
    }
}

impl PolicyConfig {
    fn merge(&mut self, patch: PolicyPatch) {
        if let Some(value) = patch.min_agents {
            self.min_agents = value;
        }
        if let Some(value) = patch.min_skills {
            self.min_skills = value;
        }
        if let Some(value) = patch.min_commands {
            self.min_commands = value;
        }
        if let Some(value) = patch.min_hooks {
            self.min_hooks = value;
        }
        if let Some(value) = patch.recommended_agents {
            self.recommended_agents = value;
        }
        if let Some(value) = patch.recommended_skills {
            self.recommended_skills = value;
        }
        if let Some(value) = patch.max_description_len {
            self.max_description_len = value;
        }
        if let Some(value) = patch.warn_missing_keywords {
            self.warn_missing_keywords = value;
        }
    }
}

/// Markers the content sniff looks for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContentConfig {
    pub header_delimiter: String,
    pub title_marker: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            header_delimiter: "---".to_string(),
            title_marker: "# ".to_string(),
        }
    }
}

impl ContentConfig {
    fn merge(&mut self, patch: ContentPatch) {
        if let Some(value) = patch.header_delimiter {
            self.header_delimiter = value;
        }
        if let Some(value) = patch.title_marker {
            self.title_marker = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HooksConfig {
    pub declaration: String,
    pub dir: String,
    pub scripts: Vec<String>,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            declaration: "hooks/hooks.json".to_string(),
            dir: "hooks".to_string(),
            scripts: vec!["on-load.js".to_string(), "on-skill-invoke.js".to_string()],
        }
    }
}

impl HooksConfig {
    fn merge(&mut self, patch: HooksPatch) {
        if let Some(value) = patch.declaration {
            self.declaration = value;
        }
        if let Some(value) = patch.dir {
            self.dir = value;
        }
        if let Some(values) = patch.scripts {
            self.scripts = values;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocsConfig {
    pub required: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            required: ["README.md", "CHANGELOG.md", "INTEGRATION.md", "QUALITY_STANDARDS.md", "LICENSE"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl DocsConfig {
    fn merge(&mut self, patch: DocsPatch) {
        if let Some(values) = patch.required {
            self.required = values;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    /// Cap on printed successes; the rest are summarized. `None` prints all.
    #[serde(default)]
    pub success_limit: Option<usize>,
}

impl ReportConfig {
    fn merge(&mut self, patch: ReportPatch) {
        if let Some(value) = patch.success_limit {
            self.success_limit = Some(value);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    policy: Option<PolicyPatch>,
    content: Option<ContentPatch>,
    hooks: Option<HooksPatch>,
    docs: Option<DocsPatch>,
    report: Option<ReportPatch>,
    engine: Option<EnginePatch>,
}

#[derive(Debug, Default, Deserialize)]
struct PolicyPatch {
    min_agents: Option<usize>,
    min_skills: Option<usize>,
    min_commands: Option<usize>,
    min_hooks: Option<usize>,
    recommended_agents: Option<usize>,
    recommended_skills: Option<usize>,
    max_description_len: Option<usize>,
    warn_missing_keywords: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentPatch {
    header_delimiter: Option<String>,
    title_marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HooksPatch {
    declaration: Option<String>,
    dir: Option<String>,
    scripts: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct DocsPatch {
    required: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct ReportPatch {
    success_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct EnginePatch {
    disabled_checks: Option<Vec<String>>,
    strict: Option<bool>,
}

fn merge_unique(values: Vec<String>, existing: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values.into_iter().chain(existing.iter().cloned()) {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

fn env_bool(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    lookup(key).map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_usize(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<usize>> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|err| PlintError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_list(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<Vec<String>> {
    lookup(key).map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
}
