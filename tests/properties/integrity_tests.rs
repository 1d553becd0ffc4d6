use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use serde_json::json;

use plint::check::checks::IntegrityCheck;
use plint::check::{CheckEngine, EngineConfig};
use plint::config::Config;
use plint::manifest::{ManifestFormat, parse_str};
use plint::report::Report;

fn integrity_report(manifest: &serde_json::Value) -> Report {
    let manifest = parse_str(&manifest.to_string(), ManifestFormat::Json).unwrap();
    let engine = CheckEngine::new(EngineConfig::new()).with_check(Box::new(IntegrityCheck));
    engine.validate(&manifest, &Config::default())
}

fn ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]", 0..12)
}

proptest! {
    #[test]
    fn test_one_error_per_duplicated_agent_id(agent_ids in ids()) {
        let agents: Vec<_> = agent_ids
            .iter()
            .map(|id| json!({"id": id, "file": format!("agents/{id}.md")}))
            .collect();
        let report = integrity_report(&json!({"agents": agents, "skills": []}));

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for id in &agent_ids {
            *counts.entry(id.as_str()).or_default() += 1;
        }
        let duplicated = counts.values().filter(|&&n| n > 1).count();

        prop_assert_eq!(report.errors.len(), duplicated);
        for error in &report.errors {
            prop_assert!(error.message.starts_with("duplicate id '"));
        }
    }

    #[test]
    fn test_unknown_agents_flagged_exactly(
        agent_ids in prop::collection::btree_set("[a-e]", 0..5),
        skill_agents in prop::collection::vec("[a-h]", 0..10),
    ) {
        let agents: Vec<_> = agent_ids
            .iter()
            .map(|id| json!({"id": id, "file": format!("agents/{id}.md")}))
            .collect();
        let skills: Vec<_> = skill_agents
            .iter()
            .enumerate()
            .map(|(i, agent)| json!({"id": format!("s{i}"), "agent": agent, "file": format!("skills/s{i}.md")}))
            .collect();
        let report = integrity_report(&json!({"agents": agents, "skills": skills}));

        let known: BTreeSet<&str> = agent_ids.iter().map(String::as_str).collect();
        let expected: Vec<String> = skill_agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| !known.contains(agent.as_str()))
            .map(|(i, agent)| format!("skill s{i} references unknown agent {agent}"))
            .collect();
        let actual: Vec<String> = report.errors.iter().map(|f| f.message.clone()).collect();

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(report.is_production_ready(), report.errors.is_empty());
    }
}
