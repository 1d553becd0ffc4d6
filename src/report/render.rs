//! Human and JSON renderings of a report.

use console::style;
use serde::Serialize;

use super::Report;
use crate::check::Finding;
use crate::cli::output::HumanLayout;
use crate::config::ReportConfig;

/// Final verdict line.
#[must_use]
pub fn verdict(report: &Report) -> String {
    if report.is_production_ready() {
        "PLUGIN IS PRODUCTION READY".to_string()
    } else {
        format!("PLUGIN HAS {} CRITICAL ERRORS", report.errors.len())
    }
}

/// Render the report as labeled sections, a summary and the verdict.
#[must_use]
pub fn render_human(report: &Report, config: &ReportConfig) -> String {
    let mut layout = HumanLayout::new();
    layout.title("Plugin Validation");
    layout.kv("Manifest", &report.manifest.display().to_string());
    layout.blank();

    findings_section(
        &mut layout,
        &format!("Successes ({})", report.successes.len()),
        &report.successes,
        config.success_limit,
    );
    findings_section(
        &mut layout,
        &format!("Warnings ({})", report.warnings.len()),
        &report.warnings,
        None,
    );
    findings_section(
        &mut layout,
        &format!("Errors ({})", report.errors.len()),
        &report.errors,
        None,
    );

    layout.section("Summary");
    layout.kv("Successes", &report.successes.len().to_string());
    layout.kv("Warnings", &report.warnings.len().to_string());
    layout.kv("Errors", &report.errors.len().to_string());
    layout.blank();

    let verdict = verdict(report);
    if report.is_production_ready() {
        layout.push_line(style(verdict).green().bold().to_string());
    } else {
        layout.push_line(style(verdict).red().bold().to_string());
    }

    layout.build()
}

fn findings_section(layout: &mut HumanLayout, title: &str, findings: &[Finding], limit: Option<usize>) {
    layout.section(title);
    if findings.is_empty() {
        layout.bullet("none");
    }

    let shown = limit.unwrap_or(findings.len()).min(findings.len());
    for finding in &findings[..shown] {
        match &finding.suggestion {
            Some(hint) => layout.bullet(&format!(
                "{} {}",
                finding.message,
                style(format!("(hint: {hint})")).dim()
            )),
            None => layout.bullet(&finding.message),
        };
    }
    if shown < findings.len() {
        layout.bullet(&format!("... and {} more", findings.len() - shown));
    }
    layout.blank();
}

#[derive(Debug, Serialize)]
pub struct ReportJson<'a> {
    pub manifest: String,
    pub production_ready: bool,
    pub load_failed: bool,
    pub verdict: String,
    pub summary: SummaryJson,
    pub successes: &'a [Finding],
    pub warnings: &'a [Finding],
    pub errors: &'a [Finding],
}

#[derive(Debug, Serialize)]
pub struct SummaryJson {
    pub successes: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// JSON view of the full report; never truncated.
#[must_use]
pub fn to_json(report: &Report) -> ReportJson<'_> {
    ReportJson {
        manifest: report.manifest.display().to_string(),
        production_ready: report.is_production_ready(),
        load_failed: report.load_failed,
        verdict: verdict(report),
        summary: SummaryJson {
            successes: report.successes.len(),
            warnings: report.warnings.len(),
            errors: report.errors.len(),
        },
        successes: &report.successes,
        warnings: &report.warnings,
        errors: &report.errors,
    }
}
