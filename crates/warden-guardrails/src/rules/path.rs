//! Path classifier: protected directories and sensitive filenames.
//!
//! Two independent checks, directory first:
//!
//! 1. The trimmed path equals a protected directory or sits below it.
//!    Comparison is literal; nothing is canonicalized and symlinks are not
//!    followed.
//! 2. The final path component, lower-cased, contains a protected fragment
//!    and no exemption marker.

use tracing::debug;

use crate::library::{ClassificationRule, PatternLibrary};
use crate::types::RuleMatch;

/// Final component of `path`, ignoring trailing separators and `.`.
///
/// Returns an empty string for `/` or an empty path.
pub fn final_component(path: &str) -> &str {
    path.trim()
        .rsplit('/')
        .find(|segment| !segment.is_empty() && *segment != ".")
        .unwrap_or("")
}

/// Classifies filesystem paths.
#[derive(Debug, Clone, Copy)]
pub struct PathClassifier<'a> {
    library: &'a PatternLibrary,
}

impl<'a> PathClassifier<'a> {
    /// Create a classifier over `library`.
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self { library }
    }

    /// Run both checks, stopping at the first hit.
    pub fn classify(&self, raw: &str) -> Option<RuleMatch> {
        self.check_directory(raw)
            .or_else(|| self.check_protected_file(raw))
    }

    /// Whether `raw` is a protected directory or nested under one.
    pub fn check_directory(&self, raw: &str) -> Option<RuleMatch> {
        let path = raw.trim();
        if path.is_empty() {
            return None;
        }
        first_match(self.library.directory_rules(), path)
    }

    /// Whether the filename of `raw` marks credentials or key material.
    ///
    /// An exemption marker anywhere in the filename cancels the match.
    pub fn check_protected_file(&self, raw: &str) -> Option<RuleMatch> {
        let name = final_component(raw).to_lowercase();
        if name.is_empty() {
            return None;
        }
        if let Some(marker) = self
            .library
            .exemptions()
            .iter()
            .find(|marker| name.contains(marker.as_str()))
        {
            debug!(file = %name, marker = %marker, "protected file check exempted");
            return None;
        }
        first_match(self.library.file_rules(), &name)
    }
}

fn first_match(rules: &[ClassificationRule], text: &str) -> Option<RuleMatch> {
    let rule = rules.iter().find(|rule| rule.is_match(text))?;
    debug!(rule_id = rule.id(), "path rule matched");
    Some(RuleMatch {
        rule_id: rule.id().to_string(),
        category: rule.category(),
        reason: rule.description().to_string(),
    })
}
