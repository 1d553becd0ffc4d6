//! Filesystem cross-check: every entry's file exists and looks like content.

use std::path::{Component, Path};

use crate::check::config::CheckContext;
use crate::check::finding::{CheckCategory, Finding, Outcome};
use crate::check::rule::Check;
use crate::check::sniff::sniff;
use crate::manifest::{Collection, Entry};

pub struct FilesCheck;

impl Check for FilesCheck {
    fn id(&self) -> &'static str {
        "files"
    }

    fn name(&self) -> &'static str {
        "Referenced Files"
    }

    fn description(&self) -> &'static str {
        "Entry files exist under the plugin root and carry a metadata header (and a title for agents)"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Filesystem
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (collection, entries) in ctx.manifest.collections() {
            for (index, entry) in entries.iter().enumerate() {
                if let Some(finding) = self.check_entry(ctx, collection, index, entry) {
                    findings.push(finding);
                }
            }
        }
        findings
    }
}

impl FilesCheck {
    fn check_entry(
        &self,
        ctx: &CheckContext<'_>,
        collection: Collection,
        index: usize,
        entry: &Entry,
    ) -> Option<Finding> {
        // Entries without a file pointer are reported by the structure check.
        let file = entry.file()?;
        let label = entry.label(collection, index);
        let kind = collection.singular();

        // An out-of-root path counts as an unresolvable file.
        if escapes_root(Path::new(file)) {
            return Some(
                Finding::new(
                    self.id(),
                    missing_file_outcome(collection),
                    format!("{kind} {label}: file escapes the plugin root: {file}"),
                )
                .with_entry(collection, label)
                .with_suggestion("use a path relative to the plugin root"),
            );
        }

        let path = ctx.manifest.resolve(file);
        if !path.is_file() {
            return Some(
                Finding::new(
                    self.id(),
                    missing_file_outcome(collection),
                    format!("{kind} {label}: file not found: {file}"),
                )
                .with_entry(collection, label),
            );
        }

        // Hook files are scripts, not content documents.
        if collection == Collection::Hooks {
            return Some(
                Finding::success(self.id(), format!("{kind} {label} file present"))
                    .with_entry(collection, label),
            );
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                return Some(
                    Finding::warning(self.id(), format!("{kind} {label}: could not read {file}: {err}"))
                        .with_entry(collection, label),
                );
            }
        };

        let problems = sniff(&content, &ctx.config.content).problems(collection == Collection::Agents);
        if problems.is_empty() {
            Some(Finding::success(self.id(), format!("{kind} {label} valid")).with_entry(collection, label))
        } else {
            Some(
                Finding::warning(
                    self.id(),
                    format!("{kind} {label}: entry present but missing expected header/title"),
                )
                .with_entry(collection, label)
                .with_suggestion(problems.join("; ")),
            )
        }
    }
}

/// Missing skill files are advisory; every other missing file breaks the bundle.
#[must_use]
pub const fn missing_file_outcome(collection: Collection) -> Outcome {
    match collection {
        Collection::Skills => Outcome::Warning,
        Collection::Agents | Collection::Commands | Collection::Hooks => Outcome::Error,
    }
}

fn escapes_root(path: &Path) -> bool {
    path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir))
}
