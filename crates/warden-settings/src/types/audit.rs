//! Audit trail settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Largest accepted retention bound for any category.
pub const MAX_RETENTION: usize = 100_000;

/// Audit trail configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditSettings {
    /// Whether events are recorded at all.
    pub enabled: bool,
    /// Log directory; relative paths resolve against the project directory.
    pub log_dir: String,
    /// Mask credential-looking keys in recorded payloads.
    pub redact_sensitive: bool,
    /// Per-category retention bounds.
    pub retention: RetentionSettings,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: "logs".to_string(),
            redact_sensitive: true,
            retention: RetentionSettings::default(),
        }
    }
}

impl AuditSettings {
    /// Resolve the log directory against `project_dir`.
    pub fn resolve_log_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.log_dir)
    }
}

/// Maximum retained records per audit category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetentionSettings {
    /// Tool calls before execution.
    pub pre_tool_use: usize,
    /// Tool calls after execution.
    pub post_tool_use: usize,
    /// Gate verdicts.
    pub verdicts: usize,
    /// Session start and end.
    pub sessions: usize,
    /// Sub-agent start and stop.
    pub subagents: usize,
    /// User prompts.
    pub user_prompts: usize,
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            pre_tool_use: 1000,
            post_tool_use: 1000,
            verdicts: 1000,
            sessions: 100,
            subagents: 200,
            user_prompts: 500,
        }
    }
}

impl RetentionSettings {
    /// Every bound paired with its JSON key.
    pub fn entries(&self) -> [(&'static str, usize); 6] {
        [
            ("preToolUse", self.pre_tool_use),
            ("postToolUse", self.post_tool_use),
            ("verdicts", self.verdicts),
            ("sessions", self.sessions),
            ("subagents", self.subagents),
            ("userPrompts", self.user_prompts),
        ]
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (key, value) in self.entries() {
            if value == 0 || value > MAX_RETENTION {
                return Err(SettingsError::InvalidValue(format!(
                    "audit.retention.{key} must be between 1 and {MAX_RETENTION}, got {value}"
                )));
            }
        }
        Ok(())
    }
}
