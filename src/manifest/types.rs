//! Typed plugin manifest.
//!
//! Every field is optional at parse time. Whether a manifest is *complete* is
//! decided by the structural check, which needs to see absent or mistyped
//! fields rather than a parse failure.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::shape::TypeMismatch;

/// The root plugin manifest document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub agents: Option<Vec<Entry>>,
    #[serde(default)]
    pub skills: Option<Vec<Entry>>,
    #[serde(default)]
    pub commands: Option<Vec<Entry>>,
    #[serde(default)]
    pub hooks: Option<Vec<Entry>>,

    /// Path the manifest was loaded from.
    #[serde(skip)]
    pub path: PathBuf,
    /// Directory entry `file` pointers are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
    /// Values dropped at load time because they had the wrong type.
    #[serde(skip)]
    pub type_mismatches: Vec<TypeMismatch>,
}

impl Manifest {
    /// Entries of one collection, `None` when the collection is not declared.
    #[must_use]
    pub fn collection(&self, collection: Collection) -> Option<&[Entry]> {
        match collection {
            Collection::Agents => self.agents.as_deref(),
            Collection::Skills => self.skills.as_deref(),
            Collection::Commands => self.commands.as_deref(),
            Collection::Hooks => self.hooks.as_deref(),
        }
    }

    /// Declared collections in manifest order (agents, skills, commands, hooks).
    pub fn collections(&self) -> impl Iterator<Item = (Collection, &[Entry])> {
        Collection::ALL
            .into_iter()
            .filter_map(|c| self.collection(c).map(|entries| (c, entries)))
    }

    /// Resolve an entry's file pointer against the manifest base directory.
    #[must_use]
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.base_dir.join(file)
    }

    /// Mismatch recorded for a top-level field.
    #[must_use]
    pub fn field_mismatch(&self, field: &str) -> Option<&TypeMismatch> {
        self.type_mismatches
            .iter()
            .find(|m| m.collection.is_none() && m.field.as_deref() == Some(field))
    }

    /// Mismatches recorded inside one entry, in field order.
    pub fn entry_mismatches(&self, collection: Collection, index: usize) -> impl Iterator<Item = &TypeMismatch> {
        self.type_mismatches
            .iter()
            .filter(move |m| m.is_entry(collection, index))
    }

    /// Base directory as a path reference.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Plugin author: either a bare name or a structured record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

/// One item of a manifest collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Owning agent id (skills only).
    #[serde(default)]
    pub agent: Option<String>,
    /// Lifecycle event a hook is bound to (hooks only).
    #[serde(default)]
    pub event: Option<String>,
}

impl Entry {
    /// Join key used for uniqueness and cross-references.
    ///
    /// Commands and hooks are conventionally keyed by `name`, so `name` stands
    /// in for a missing `id` in those collections.
    #[must_use]
    pub fn identifier(&self, collection: Collection) -> Option<&str> {
        let id = non_empty(self.id.as_deref());
        match collection {
            Collection::Commands | Collection::Hooks => id.or_else(|| non_empty(self.name.as_deref())),
            Collection::Agents | Collection::Skills => id,
        }
    }

    /// File pointer, ignoring blank strings.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        non_empty(self.file.as_deref())
    }

    /// Best-effort label for messages about this entry.
    #[must_use]
    pub fn label(&self, collection: Collection, index: usize) -> String {
        self.identifier(collection)
            .or_else(|| non_empty(self.name.as_deref()))
            .map_or_else(|| format!("#{index}"), str::to_string)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// The four named manifest collections, in declaration order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Agents,
    Skills,
    Commands,
    Hooks,
}

impl Collection {
    pub const ALL: [Self; 4] = [Self::Agents, Self::Skills, Self::Commands, Self::Hooks];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agents => "agents",
            Self::Skills => "skills",
            Self::Commands => "commands",
            Self::Hooks => "hooks",
        }
    }

    /// Singular noun used in per-entry messages.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Agents => "agent",
            Self::Skills => "skill",
            Self::Commands => "command",
            Self::Hooks => "hook",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
