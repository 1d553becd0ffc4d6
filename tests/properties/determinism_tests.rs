use proptest::prelude::*;
use serde_json::json;

use plint::check::{CheckEngine, EngineConfig};
use plint::config::{Config, ReportConfig};
use plint::manifest::{ManifestFormat, parse_str};
use plint::report::render_human;

proptest! {
    #[test]
    fn test_report_is_deterministic(
        agent_ids in prop::collection::vec("[a-d]{1,3}", 0..6),
        skill_agents in prop::collection::vec("[a-d]{1,3}", 0..6),
        strict in any::<bool>(),
    ) {
        let agents: Vec<_> = agent_ids.iter().map(|id| json!({"id": id})).collect();
        let skills: Vec<_> = skill_agents
            .iter()
            .enumerate()
            .map(|(i, agent)| json!({"id": format!("s{i}"), "agent": agent}))
            .collect();
        let raw = json!({"name": "p", "agents": agents, "skills": skills}).to_string();
        let manifest = parse_str(&raw, ManifestFormat::Json).unwrap();

        let engine_config = if strict { EngineConfig::new().strict() } else { EngineConfig::new() };
        let engine = CheckEngine::with_default_checks(engine_config);
        let config = Config::default();

        let first = engine.validate(&manifest, &config);
        let second = engine.validate(&manifest, &config);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            render_human(&first, &ReportConfig::default()),
            render_human(&second, &ReportConfig::default())
        );
        if strict {
            prop_assert!(first.warnings.is_empty());
        }
    }
}
