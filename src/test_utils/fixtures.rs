use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::manifest::MANIFEST_CANDIDATES;

/// Isolated plugin root on disk for tests.
pub struct PluginFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl Default for PluginFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created plugin root: {root_path:?}");

        Self {
            temp_dir,
            root_path,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Create a file (and its parent directories) under the plugin root.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Write the manifest at its conventional location.
    pub fn write_manifest(&self, content: &str) -> PathBuf {
        self.create_file(MANIFEST_CANDIDATES[0], content)
    }

    /// Write a well-formed agent document.
    pub fn create_agent(&self, relative_path: &str, name: &str) -> PathBuf {
        self.create_file(relative_path, &agent_document(name))
    }

    /// Write a well-formed skill document.
    pub fn create_skill(&self, relative_path: &str, name: &str) -> PathBuf {
        self.create_file(relative_path, &skill_document(name))
    }

    /// Create the hooks declaration, hook scripts and documentation files a
    /// complete bundle ships with.
    pub fn scaffold_layout(&self) {
        self.create_file("hooks/hooks.json", r#"{"hooks": []}"#);
        self.create_file("hooks/on-load.js", "module.exports = async () => ({ success: true });\n");
        self.create_file(
            "hooks/on-skill-invoke.js",
            "module.exports = async () => ({ success: true });\n",
        );
        for doc in ["README.md", "CHANGELOG.md", "INTEGRATION.md", "QUALITY_STANDARDS.md"] {
            self.create_file(doc, &format!("# {doc}\n"));
        }
        self.create_file("LICENSE", "MIT\n");
    }
}

impl Drop for PluginFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up plugin root: {:?}", self.root_path);
    }
}

/// Agent document with frontmatter and a title.
#[must_use]
pub fn agent_document(name: &str) -> String {
    format!(
        "---\nname: {name}\ndescription: Guides learners through {name}\n---\n\n# {name}\n\n## Responsibilities\n\nHelps with {name}.\n"
    )
}

/// Skill document with frontmatter.
#[must_use]
pub fn skill_document(name: &str) -> String {
    format!(
        "---\nname: {name}\ndescription: Teaches {name}\n---\n\n# {name}\n\n## Quick Start\n\nStart here.\n"
    )
}
