//! Additions to the built-in guardrail rule set.
//!
//! Entries are appended after the built-in rules; they can widen the policy
//! but never remove a built-in rule. Entries are checked when the rule set is
//! built, not at load time, so a bad entry never discards the rest of the file.

use serde::{Deserialize, Serialize};

/// Extra guardrail entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuardrailSettings {
    /// Extra dangerous-command regexes, matched case-insensitively against
    /// the normalized command.
    pub extra_command_patterns: Vec<String>,
    /// Extra protected directories (absolute paths).
    pub extra_protected_directories: Vec<String>,
    /// Extra protected filename fragments.
    pub extra_protected_files: Vec<String>,
}

impl GuardrailSettings {
    /// Whether nothing is added to the built-in rules.
    pub fn is_empty(&self) -> bool {
        self.extra_command_patterns.is_empty()
            && self.extra_protected_directories.is_empty()
            && self.extra_protected_files.is_empty()
    }
}
