//! Bundle layout: hooks declaration, hook scripts and documentation files.
//!
//! Everything here is advisory: this check never produces errors.

use crate::check::config::CheckContext;
use crate::check::finding::{CheckCategory, Finding};
use crate::check::rule::Check;

pub struct LayoutCheck;

impl Check for LayoutCheck {
    fn id(&self) -> &'static str {
        "layout"
    }

    fn name(&self) -> &'static str {
        "Bundle Layout"
    }

    fn description(&self) -> &'static str {
        "Hooks declaration parses as JSON, hook scripts and documentation files are present"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Layout
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        findings.push(self.hooks_declaration(ctx));
        findings.extend(self.hook_scripts(ctx));
        findings.extend(self.documentation(ctx));
        findings
    }
}

impl LayoutCheck {
    fn hooks_declaration(&self, ctx: &CheckContext<'_>) -> Finding {
        let declaration = &ctx.config.hooks.declaration;
        let path = ctx.base_dir().join(declaration);
        if !path.is_file() {
            return Finding::warning(self.id(), format!("{declaration} not found"));
        }

        let parsed = std::fs::read_to_string(&path)
            .map_err(|err| err.to_string())
            .and_then(|raw| {
                serde_json::from_str::<serde_json::Value>(&raw).map_err(|err| err.to_string())
            });
        match parsed {
            Ok(_) => Finding::success(self.id(), format!("{declaration} is valid JSON")),
            Err(err) => Finding::warning(self.id(), format!("{declaration} is not valid JSON: {err}")),
        }
    }

    fn hook_scripts(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let hooks = &ctx.config.hooks;
        let dir = ctx.base_dir().join(&hooks.dir);
        hooks
            .scripts
            .iter()
            .map(|script| {
                if dir.join(script).is_file() {
                    Finding::success(self.id(), format!("hook {script} found"))
                } else {
                    Finding::warning(self.id(), format!("hook {script} not found"))
                }
            })
            .collect()
    }

    fn documentation(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        ctx.config
            .docs
            .required
            .iter()
            .map(|doc| {
                if ctx.base_dir().join(doc).exists() {
                    Finding::success(self.id(), format!("{doc} present"))
                } else {
                    Finding::warning(self.id(), format!("{doc} missing"))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::finding::Outcome;
    use crate::config::Config;
    use crate::manifest::Manifest;
    use crate::test_utils::fixtures::PluginFixture;

    fn run(fixture: &PluginFixture, config: &Config) -> Vec<Finding> {
        let manifest = Manifest {
            base_dir: fixture.root().to_path_buf(),
            ..Manifest::default()
        };
        LayoutCheck.run(&CheckContext::new(&manifest, config))
    }

    #[test]
    fn test_complete_layout() {
        let fixture = PluginFixture::new();
        fixture.scaffold_layout();
        let findings = run(&fixture, &Config::default());

        assert_eq!(findings.len(), 1 + 2 + 5);
        assert!(findings.iter().all(|f| f.outcome == Outcome::Success));
        assert_eq!(findings[0].message, "hooks/hooks.json is valid JSON");
    }

    #[test]
    fn test_empty_root_only_warns() {
        let fixture = PluginFixture::new();
        let findings = run(&fixture, &Config::default());

        assert!(findings.iter().all(|f| f.outcome == Outcome::Warning));
        assert_eq!(findings[0].message, "hooks/hooks.json not found");
        assert_eq!(findings[1].message, "hook on-load.js not found");
        assert_eq!(findings[3].message, "README.md missing");
    }

    #[test]
    fn test_invalid_hooks_json_warns() {
        let fixture = PluginFixture::new();
        fixture.create_file("hooks/hooks.json", "{ not json");
        let findings = run(&fixture, &Config::default());
        assert_eq!(findings[0].outcome, Outcome::Warning);
        assert!(findings[0].message.starts_with("hooks/hooks.json is not valid JSON"));
    }

    #[test]
    fn test_configured_expectations() {
        let fixture = PluginFixture::new();
        fixture.create_file("scripts/hooks.json", "[]");
        fixture.create_file("scripts/start.sh", "#!/bin/sh\n");
        let mut config = Config::default();
        config.hooks.declaration = "scripts/hooks.json".to_string();
        config.hooks.dir = "scripts".to_string();
        config.hooks.scripts = vec!["start.sh".to_string()];
        config.docs.required = Vec::new();

        let findings = run(&fixture, &config);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.outcome == Outcome::Success));
    }
}
