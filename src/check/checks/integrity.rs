//! Referential integrity: unique identifiers and skill → agent references.

use std::collections::{HashMap, HashSet};

use crate::check::config::CheckContext;
use crate::check::finding::{CheckCategory, Finding};
use crate::check::rule::Check;
use crate::manifest::{Collection, Entry, Manifest};

pub struct IntegrityCheck;

impl Check for IntegrityCheck {
    fn id(&self) -> &'static str {
        "integrity"
    }

    fn name(&self) -> &'static str {
        "Referential Integrity"
    }

    fn description(&self) -> &'static str {
        "Identifiers are unique per collection and every skill names a declared agent"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Reference
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let manifest = ctx.manifest;
        let mut findings = Vec::new();

        for (collection, entries) in manifest.collections() {
            findings.extend(self.duplicate_findings(collection, entries));
            if collection == Collection::Skills {
                findings.extend(self.agent_reference_findings(manifest, entries));
            }
        }

        findings
    }
}

impl IntegrityCheck {
    /// One error per duplicated id, at the position of its first occurrence.
    fn duplicate_findings(&self, collection: Collection, entries: &[Entry]) -> Vec<Finding> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for id in entries.iter().filter_map(|e| e.identifier(collection)) {
            let count = counts.entry(id).or_insert(0);
            if *count == 0 {
                order.push(id);
            }
            *count += 1;
        }

        let findings: Vec<Finding> = order
            .into_iter()
            .filter_map(|id| {
                let occurrences = counts[id];
                (occurrences > 1).then(|| {
                    Finding::error(
                        self.id(),
                        format!(
                            "duplicate id '{id}' in collection '{collection}' ({occurrences} occurrences)"
                        ),
                    )
                    .with_entry(collection, id)
                    .with_suggestion("give every entry in a collection its own id")
                })
            })
            .collect();

        if findings.is_empty() {
            vec![
                Finding::success(self.id(), format!("no duplicate ids in {collection}"))
                    .with_collection(collection),
            ]
        } else {
            findings
        }
    }

    /// Skills must name an agent declared in the agents collection.
    fn agent_reference_findings(&self, manifest: &Manifest, skills: &[Entry]) -> Vec<Finding> {
        let agent_ids: HashSet<&str> = manifest
            .collection(Collection::Agents)
            .unwrap_or_default()
            .iter()
            .filter_map(|agent| agent.identifier(Collection::Agents))
            .collect();

        let mut findings = Vec::new();
        let mut checked = 0usize;
        for (index, skill) in skills.iter().enumerate() {
            // A skill without an agent is reported by the structure check.
            let Some(agent) = skill.agent.as_deref().filter(|a| !a.trim().is_empty()) else {
                continue;
            };
            checked += 1;
            if !agent_ids.contains(agent) {
                let label = skill.label(Collection::Skills, index);
                findings.push(
                    Finding::error(
                        self.id(),
                        format!("skill {label} references unknown agent {agent}"),
                    )
                    .with_entry(Collection::Skills, label)
                    .with_suggestion(format!("declare agent '{agent}' or point the skill at an existing agent")),
                );
            }
        }

        if findings.is_empty() && checked > 0 {
            findings.push(
                Finding::success(self.id(), "all skill-agent mappings valid")
                    .with_collection(Collection::Skills),
            );
        }
        findings
    }
}
