//! Structural check for plugin manifests.
//!
//! Verifies required manifest fields, collection sizes against the advisory
//! policy, and the required fields of every entry. Problems are accumulated
//! field by field so a single run surfaces all of them.

use crate::check::config::CheckContext;
use crate::check::finding::{CheckCategory, Finding};
use crate::check::rule::Check;
use crate::config::PolicyConfig;
use crate::manifest::{Collection, Entry, Manifest, TypeMismatch};

/// Manifest fields that must be present, in reporting order.
pub const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "version",
    "description",
    "author",
    "agents",
    "skills",
    "commands",
];

pub struct StructureCheck;

impl Check for StructureCheck {
    fn id(&self) -> &'static str {
        "structure"
    }

    fn name(&self) -> &'static str {
        "Manifest Structure"
    }

    fn description(&self) -> &'static str {
        "Required manifest fields, collection sizes and per-entry id/file fields"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Structure
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let manifest = ctx.manifest;
        let policy = &ctx.config.policy;
        let mut findings = Vec::new();

        for field in REQUIRED_FIELDS {
            if let Some(mismatch) = manifest.field_mismatch(field) {
                findings.push(self.mismatch_finding(mismatch));
            } else if field_present(manifest, field) {
                findings.push(Finding::success(
                    self.id(),
                    format!("manifest field '{field}' present"),
                ));
            } else {
                findings.push(
                    Finding::error(self.id(), format!("manifest missing required field: {field}"))
                        .with_suggestion(format!("add a top-level '{field}' entry")),
                );
            }
        }
        for mismatch in &manifest.type_mismatches {
            let optional_field = mismatch.collection.is_none()
                && mismatch
                    .field
                    .as_deref()
                    .is_some_and(|field| !REQUIRED_FIELDS.contains(&field));
            if optional_field {
                findings.push(self.mismatch_finding(mismatch));
            }
        }

        findings.extend(self.metadata_findings(manifest, policy));

        for (collection, entries) in manifest.collections() {
            findings.extend(self.count_findings(collection, entries.len(), policy));
            for (index, entry) in entries.iter().enumerate() {
                findings.extend(self.entry_findings(manifest, collection, index, entry));
            }
        }

        findings
    }
}

impl StructureCheck {
    fn metadata_findings(&self, manifest: &Manifest, policy: &PolicyConfig) -> Vec<Finding> {
        let mut findings = Vec::new();

        if let Some(version) = manifest.version.as_deref() {
            if semver::Version::parse(version.trim()).is_err() {
                findings.push(
                    Finding::warning(
                        self.id(),
                        format!("manifest version '{version}' is not valid semver"),
                    )
                    .with_suggestion("use semantic versioning like '1.0.0'"),
                );
            }
        }

        if let Some(description) = manifest.description.as_deref() {
            let len = description.chars().count();
            if len > policy.max_description_len {
                findings.push(Finding::warning(
                    self.id(),
                    format!(
                        "manifest description is {len} characters (limit {})",
                        policy.max_description_len
                    ),
                ));
            }
        }

        if policy.warn_missing_keywords
            && manifest.field_mismatch("keywords").is_none()
            && manifest.keywords.as_ref().is_none_or(Vec::is_empty)
        {
            findings.push(
                Finding::warning(self.id(), "manifest declares no keywords")
                    .with_suggestion("add keywords so the plugin can be discovered"),
            );
        }

        findings
    }

    fn count_findings(&self, collection: Collection, count: usize, policy: &PolicyConfig) -> Vec<Finding> {
        let mut findings = vec![
            Finding::success(self.id(), format!("{count} {collection} defined"))
                .with_collection(collection),
        ];

        let (minimum, recommended) = thresholds(collection, policy);
        if count < minimum {
            findings.push(
                Finding::warning(
                    self.id(),
                    format!("only {count} {collection} (recommend {recommended}+)"),
                )
                .with_collection(collection),
            );
        }
        findings
    }

    fn mismatch_finding(&self, mismatch: &TypeMismatch) -> Finding {
        let location = mismatch.location();
        let finding = Finding::error(
            self.id(),
            format!(
                "field '{location}' has wrong type: expected {}, found {}",
                mismatch.expected, mismatch.found
            ),
        );
        match mismatch.collection {
            Some(collection) => finding.with_collection(collection),
            None => finding,
        }
    }

    fn entry_findings(
        &self,
        manifest: &Manifest,
        collection: Collection,
        index: usize,
        entry: &Entry,
    ) -> Vec<Finding> {
        let label = entry.label(collection, index);
        let mut findings = Vec::new();
        let mut mistyped: Vec<&str> = Vec::new();
        let mut whole_entry = false;
        for mismatch in manifest.entry_mismatches(collection, index) {
            match mismatch.field.as_deref() {
                Some(field) => mistyped.push(field),
                None => whole_entry = true,
            }
            findings.push(self.mismatch_finding(mismatch).with_entry(collection, label.clone()));
        }
        if whole_entry {
            return findings;
        }

        let mut missing = Vec::new();
        if entry.identifier(collection).is_none() {
            missing.push("id");
        }
        if entry.file().is_none() {
            missing.push("file");
        }
        if collection == Collection::Skills && entry.agent.as_deref().is_none_or(|a| a.trim().is_empty()) {
            missing.push("agent");
        }
        missing.retain(|field| !mistyped.contains(field));

        if !missing.is_empty() {
            findings.push(
                Finding::error(
                    self.id(),
                    format!(
                        "{collection} entry {label} missing required field: {}",
                        missing.join(", ")
                    ),
                )
                .with_entry(collection, label),
            );
        }
        findings
    }
}

fn field_present(manifest: &Manifest, field: &str) -> bool {
    match field {
        "name" => manifest.name.is_some(),
        "version" => manifest.version.is_some(),
        "description" => manifest.description.is_some(),
        "author" => manifest.author.is_some(),
        "keywords" => manifest.keywords.is_some(),
        "agents" => manifest.agents.is_some(),
        "skills" => manifest.skills.is_some(),
        "commands" => manifest.commands.is_some(),
        "hooks" => manifest.hooks.is_some(),
        _ => false,
    }
}

/// Minimum count and the recommendation quoted when it is not met.
const fn thresholds(collection: Collection, policy: &PolicyConfig) -> (usize, usize) {
    match collection {
        Collection::Agents => (policy.min_agents, policy.recommended_agents),
        Collection::Skills => (policy.min_skills, policy.recommended_skills),
        Collection::Commands => (policy.min_commands, policy.min_commands),
        Collection::Hooks => (policy.min_hooks, policy.min_hooks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::finding::Outcome;
    use crate::config::Config;
    use crate::manifest::{Author, ManifestFormat, parse_str};

    fn run(manifest: &Manifest, config: &Config) -> Vec<Finding> {
        StructureCheck.run(&CheckContext::new(manifest, config))
    }

    fn errors(findings: &[Finding]) -> Vec<&str> {
        findings
            .iter()
            .filter(|f| f.outcome == Outcome::Error)
            .map(|f| f.message.as_str())
            .collect()
    }

    fn warnings(findings: &[Finding]) -> Vec<&str> {
        findings
            .iter()
            .filter(|f| f.outcome == Outcome::Warning)
            .map(|f| f.message.as_str())
            .collect()
    }

    fn complete_manifest() -> Manifest {
        Manifest {
            name: Some("dev-path".to_string()),
            version: Some("1.1.0".to_string()),
            description: Some("Developer learning platform".to_string()),
            author: Some(Author::Name("Jane".to_string())),
            keywords: Some(vec!["learning".to_string()]),
            agents: Some(vec![Entry {
                id: Some("a1".to_string()),
                file: Some("agents/a1.md".to_string()),
                ..Entry::default()
            }]),
            skills: Some(vec![Entry {
                id: Some("s1".to_string()),
                agent: Some("a1".to_string()),
                file: Some("skills/s1.md".to_string()),
                ..Entry::default()
            }]),
            commands: Some(vec![]),
            ..Manifest::default()
        }
    }

    fn lenient_config() -> Config {
        let mut config = Config::default();
        config.policy.min_agents = 0;
        config.policy.min_skills = 0;
        config
    }

    #[test]
    fn test_complete_manifest_has_no_errors_or_warnings() {
        let findings = run(&complete_manifest(), &lenient_config());
        assert!(errors(&findings).is_empty());
        assert!(warnings(&findings).is_empty());
    }

    #[test]
    fn test_every_missing_field_is_reported() {
        let findings = run(&Manifest::default(), &lenient_config());
        let errs = errors(&findings);
        assert_eq!(errs.len(), REQUIRED_FIELDS.len());
        assert_eq!(errs[0], "manifest missing required field: name");
        assert_eq!(errs[6], "manifest missing required field: commands");
    }

    #[test]
    fn test_hooks_and_keywords_are_optional() {
        let mut manifest = complete_manifest();
        manifest.hooks = None;
        let findings = run(&manifest, &lenient_config());
        assert!(errors(&findings).is_empty());
    }

    #[test]
    fn test_counts_and_thresholds() {
        let findings = run(&complete_manifest(), &Config::default());
        let successes: Vec<&str> = findings
            .iter()
            .filter(|f| f.outcome == Outcome::Success)
            .map(|f| f.message.as_str())
            .collect();
        assert!(successes.contains(&"1 agents defined"));
        assert!(successes.contains(&"1 skills defined"));
        assert!(successes.contains(&"0 commands defined"));

        let warns = warnings(&findings);
        assert_eq!(warns, vec!["only 1 agents (recommend 8+)", "only 1 skills (recommend 50+)"]);
    }

    #[test]
    fn test_entry_missing_id_and_file() {
        let manifest = parse_str(
            r#"{"agents": [{"name": "Planner"}, {"id": "a2"}],
                "skills": [{"id": "s1", "file": "skills/s1.md"}],
                "commands": [{"name": "start", "file": "commands/start.md"}]}"#,
            ManifestFormat::Json,
        )
        .unwrap();
        let findings = run(&manifest, &lenient_config());
        let entry_errors: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.outcome == Outcome::Error && f.entry_id.is_some())
            .collect();

        assert_eq!(entry_errors.len(), 3);
        assert_eq!(
            entry_errors[0].message,
            "agents entry Planner missing required field: id, file"
        );
        assert_eq!(entry_errors[1].message, "agents entry a2 missing required field: file");
        assert_eq!(entry_errors[2].message, "skills entry s1 missing required field: agent");
        assert_eq!(entry_errors[2].collection, Some(Collection::Skills));
    }

    #[test]
    fn test_entry_without_any_label_uses_index() {
        let manifest = parse_str(r#"{"agents": [{}, {}]}"#, ManifestFormat::Json).unwrap();
        let findings = run(&manifest, &lenient_config());
        assert!(errors(&findings).contains(&"agents entry #1 missing required field: id, file"));
    }

    #[test]
    fn test_invalid_semver_and_long_description_warn() {
        let mut manifest = complete_manifest();
        manifest.version = Some("v1".to_string());
        manifest.description = Some("x".repeat(20));
        let mut config = lenient_config();
        config.policy.max_description_len = 10;

        let findings = run(&manifest, &config);
        let warns = warnings(&findings);
        assert_eq!(warns.len(), 2);
        assert!(warns[0].contains("not valid semver"));
        assert!(warns[1].contains("20 characters (limit 10)"));
    }

    #[test]
    fn test_missing_keywords_warns_unless_disabled() {
        let mut manifest = complete_manifest();
        manifest.keywords = None;
        let mut config = lenient_config();
        assert_eq!(warnings(&run(&manifest, &config)), vec!["manifest declares no keywords"]);

        config.policy.warn_missing_keywords = false;
        assert!(warnings(&run(&manifest, &config)).is_empty());
    }

    #[test]
    fn test_wrong_type_is_reported_alongside_other_problems() {
        let manifest = parse_str(
            r#"{"version": 1.0, "agents": [{"id": "a1"}], "skills": [{"id": "s1", "agent": "ghost"}]}"#,
            ManifestFormat::Json,
        )
        .unwrap();
        let findings = run(&manifest, &lenient_config());

        assert_eq!(
            errors(&findings),
            vec![
                "manifest missing required field: name",
                "field 'version' has wrong type: expected string, found number",
                "manifest missing required field: description",
                "manifest missing required field: author",
                "manifest missing required field: commands",
                "agents entry a1 missing required field: file",
                "skills entry s1 missing required field: file",
            ]
        );
        assert!(!warnings(&findings).iter().any(|w| w.contains("semver")));
    }

    #[test]
    fn test_mistyped_entry_fields_are_not_also_missing() {
        let manifest = parse_str(
            r#"{"agents": [{"id": 5, "file": "agents/a.md"}, "a2"],
                "hooks": {"on-load": "hooks/on-load.js"},
                "keywords": "learning"}"#,
            ManifestFormat::Json,
        )
        .unwrap();
        let findings = run(&manifest, &lenient_config());
        let errs = errors(&findings);

        assert!(errs.contains(&"field 'hooks' has wrong type: expected array, found object"));
        assert!(errs.contains(&"field 'keywords' has wrong type: expected array of strings, found string"));
        assert!(errs.contains(&"field 'agents[0].id' has wrong type: expected string, found number"));
        assert!(errs.contains(&"field 'agents[1]' has wrong type: expected object, found string"));
        assert!(!errs.iter().any(|e| e.starts_with("agents entry")));
    }
}
