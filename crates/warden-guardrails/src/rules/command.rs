//! Command classifier: matches shell commands against dangerous-command rules.
//!
//! Input is normalized (lower-cased, whitespace runs collapsed to one space)
//! before matching. That defeats padding with extra spaces, tabs or newlines.
//! It does not see through quoting, variable expansion or command
//! substitution: `r''m -rf` or `$RM -rf` pass.

use tracing::debug;

use crate::library::PatternLibrary;
use crate::types::RuleMatch;

/// Lower-case `raw` and collapse every whitespace run to a single space.
pub fn normalize_command(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Classifies shell commands.
#[derive(Debug, Clone, Copy)]
pub struct CommandClassifier<'a> {
    library: &'a PatternLibrary,
}

impl<'a> CommandClassifier<'a> {
    /// Create a classifier over `library`.
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self { library }
    }

    /// Return the first dangerous-command rule matching `raw`.
    ///
    /// Every rule is tested unanchored; the first match in library order
    /// supplies the reason. Empty input never matches.
    pub fn classify(&self, raw: &str) -> Option<RuleMatch> {
        let normalized = normalize_command(raw);
        if normalized.is_empty() {
            return None;
        }

        let rule = self
            .library
            .command_rules()
            .iter()
            .find(|rule| rule.is_match(&normalized))?;

        debug!(rule_id = rule.id(), "dangerous command matched");
        Some(RuleMatch {
            rule_id: rule.id().to_string(),
            category: rule.category(),
            reason: rule.description().to_string(),
        })
    }

    /// Whether `raw` matches any dangerous-command rule.
    pub fn is_dangerous(&self, raw: &str) -> bool {
        self.classify(raw).is_some()
    }
}
