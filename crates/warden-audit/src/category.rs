//! Audit categories and their retention bounds.
//!
//! Each category is an independent bounded sequence stored in its own file.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Named audit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuditCategory {
    /// Tool calls as submitted, before the gate runs.
    PreToolUse,
    /// Tool calls after execution.
    PostToolUse,
    /// Gate verdicts, one per evaluated tool call.
    Verdicts,
    /// Session start and end.
    Sessions,
    /// Sub-agent start and stop.
    Subagents,
    /// Submitted user prompts.
    UserPrompts,
}

impl AuditCategory {
    /// All categories, in declaration order.
    pub fn all() -> &'static [AuditCategory] {
        &[
            Self::PreToolUse,
            Self::PostToolUse,
            Self::Verdicts,
            Self::Sessions,
            Self::Subagents,
            Self::UserPrompts,
        ]
    }

    /// File the category is stored in, relative to the log directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::PreToolUse => "pre_tool_use.json",
            Self::PostToolUse => "post_tool_use.json",
            Self::Verdicts => "verdicts.json",
            Self::Sessions => "sessions.json",
            Self::Subagents => "subagents.json",
            Self::UserPrompts => "user_prompts.json",
        }
    }

    /// Maximum retained records when nothing else is configured.
    pub fn default_retention(self) -> usize {
        match self {
            Self::PreToolUse | Self::PostToolUse | Self::Verdicts => 1000,
            Self::Sessions => 100,
            Self::Subagents => 200,
            Self::UserPrompts => 500,
        }
    }
}

impl std::fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreToolUse => write!(f, "preToolUse"),
            Self::PostToolUse => write!(f, "postToolUse"),
            Self::Verdicts => write!(f, "verdicts"),
            Self::Sessions => write!(f, "sessions"),
            Self::Subagents => write!(f, "subagents"),
            Self::UserPrompts => write!(f, "userPrompts"),
        }
    }
}

/// Per-category retention bounds.
///
/// Categories without an explicit limit use
/// [`AuditCategory::default_retention`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    limits: HashMap<AuditCategory, usize>,
}

impl RetentionPolicy {
    /// Set the bound for one category.
    #[must_use]
    pub fn with_limit(mut self, category: AuditCategory, limit: usize) -> Self {
        let _ = self.limits.insert(category, limit);
        self
    }

    /// Bound for `category`.
    pub fn limit(&self, category: AuditCategory) -> usize {
        self.limits
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_retention())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_distinct() {
        let mut names: Vec<_> = AuditCategory::all().iter().map(|c| c.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), AuditCategory::all().len());
    }

    #[test]
    fn default_bounds() {
        assert_eq!(AuditCategory::PreToolUse.default_retention(), 1000);
        assert_eq!(AuditCategory::Sessions.default_retention(), 100);
        assert_eq!(AuditCategory::Subagents.default_retention(), 200);
        assert_eq!(AuditCategory::UserPrompts.default_retention(), 500);
    }

    #[test]
    fn policy_overrides_one_category() {
        let policy = RetentionPolicy::default().with_limit(AuditCategory::Sessions, 5);
        assert_eq!(policy.limit(AuditCategory::Sessions), 5);
        assert_eq!(policy.limit(AuditCategory::Subagents), 200);
    }

    #[test]
    fn display_matches_serde() {
        for category in AuditCategory::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{category}\""));
        }
    }
}
