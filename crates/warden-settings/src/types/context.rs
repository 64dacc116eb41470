//! Prompt context injection settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Context injection on prompt submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextSettings {
    /// Whether the context file is injected.
    pub enabled: bool,
    /// Context file; relative paths resolve against the project directory.
    pub file: String,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file: ".claude/context.md".to_string(),
        }
    }
}

impl ContextSettings {
    /// Resolve the context file against `project_dir`.
    pub fn resolve_file(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.file)
    }
}
