//! plint checks - List the available checks

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::check::{CheckCategory, CheckEngine};
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ChecksArgs {}

#[derive(Serialize)]
struct CheckOutput {
    id: String,
    name: String,
    category: String,
    description: String,
    disabled: bool,
}

pub fn run(ctx: &AppContext, _args: &ChecksArgs) -> Result<()> {
    let engine = CheckEngine::with_default_checks(ctx.config.engine.clone());
    let checks = engine.list_checks();

    if ctx.output_format != OutputFormat::Human {
        let infos: Vec<CheckOutput> = checks
            .iter()
            .map(|c| CheckOutput {
                id: c.id.clone(),
                name: c.name.clone(),
                category: c.category.to_string(),
                description: c.description.clone(),
                disabled: c.disabled,
            })
            .collect();
        return emit_json(&robot_ok(infos));
    }

    let mut layout = HumanLayout::new();
    layout.title("Available Checks");

    let categories = [
        (CheckCategory::Structure, "Structure"),
        (CheckCategory::Filesystem, "Filesystem"),
        (CheckCategory::Reference, "Reference"),
        (CheckCategory::Layout, "Layout"),
    ];

    for (category, label) in categories {
        let in_category: Vec<_> = checks.iter().filter(|c| c.category == category).collect();
        if in_category.is_empty() {
            continue;
        }

        layout.section(label);
        for check in in_category {
            let badge = if check.disabled { " [disabled]" } else { "" };
            layout.bullet(&format!("{} - {}{badge}", check.id, check.name));
            layout.push_line(format!("  {}", check.description));
        }
        layout.blank();
    }

    emit_human(layout);
    Ok(())
}
