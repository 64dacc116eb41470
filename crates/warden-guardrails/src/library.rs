//! Built-in classification rules.
//!
//! The pattern library holds three rule lists and one exemption list:
//!
//! - **Dangerous commands** (12): recursive forced `rm`, `chmod 777`,
//!   `sudo rm|chmod|chown`, destructive SQL, forced `git push`,
//!   `git reset --hard`
//! - **Dangerous directories** (7): `/`, `/etc`, `/var`, `/usr`, `/bin`,
//!   `/sbin`, `/boot`
//! - **Protected files** (8): `.env` variants, `credentials`, `secrets`,
//!   SSH key material
//! - **Exemption markers** (3): `.sample`, `.example`, `.template`
//!
//! A library is built once at startup and never mutated afterwards. Extra
//! entries from configuration are appended with [`PatternLibrary::extend`].

use regex::{Regex, RegexBuilder};

use crate::errors::GuardrailError;
use crate::types::RuleCategory;

/// Version of the built-in rule set.
pub const LIBRARY_VERSION: &str = "1.0.0";

// Flag-token shapes used by the `rm` rules. Commands are normalized to single
// spaces before matching, so `\s` is exactly one separator.
//   recursive: -[a-z]*r[a-z]*  or  --recursive
//   force:     -[a-z]*f[a-z]*  or  --force
// `(?:[^;&|]*\s)?` lets arbitrary arguments sit between the verb and each flag
// without crossing a `;`, `&&`, `||` or `|` into the next command.

/// Dangerous command rules: `(id, pattern, description)`.
const DANGEROUS_COMMANDS: &[(&str, &str, &str)] = &[
    (
        "command.rm-combined-recursive-force",
        r"\brm\s(?:[^;&|]*\s)?-[a-z]*(?:r[a-z]*f|f[a-z]*r)",
        "Dangerous command: recursive forced file removal (rm -rf)",
    ),
    (
        "command.rm-recursive-then-force",
        r"\brm\s(?:[^;&|]*\s)?(?:-[a-z]*r[a-z]*|--recursive)\s(?:[^;&|]*\s)?(?:-[a-z]*f|--force)",
        "Dangerous command: recursive forced file removal (rm -r ... -f)",
    ),
    (
        "command.rm-force-then-recursive",
        r"\brm\s(?:[^;&|]*\s)?(?:-[a-z]*f[a-z]*|--force)\s(?:[^;&|]*\s)?(?:-[a-z]*r|--recursive)",
        "Dangerous command: recursive forced file removal (rm -f ... -r)",
    ),
    (
        "command.chmod-world-writable",
        r"\bchmod\s(?:[^;&|]*\s)?0?777\b",
        "Dangerous command: world-writable permission change (chmod 777)",
    ),
    (
        "command.sudo-rm",
        r"\bsudo\s+(?:-\S+\s+(?:[^-\s]\S*\s+)?)*rm\b",
        "Dangerous command: privileged file removal (sudo rm)",
    ),
    (
        "command.sudo-chmod",
        r"\bsudo\s+(?:-\S+\s+(?:[^-\s]\S*\s+)?)*chmod\b",
        "Dangerous command: privileged permission change (sudo chmod)",
    ),
    (
        "command.sudo-chown",
        r"\bsudo\s+(?:-\S+\s+(?:[^-\s]\S*\s+)?)*chown\b",
        "Dangerous command: privileged ownership change (sudo chown)",
    ),
    (
        "command.sql-drop-database",
        r"\bdrop\s+database",
        "Dangerous command: destructive SQL (DROP DATABASE)",
    ),
    (
        "command.sql-drop-table",
        r"\bdrop\s+table",
        "Dangerous command: destructive SQL (DROP TABLE)",
    ),
    (
        "command.sql-truncate-table",
        r"\btruncate\s+table",
        "Dangerous command: destructive SQL (TRUNCATE TABLE)",
    ),
    (
        "command.git-force-push",
        r"\bgit\s+push\b[^;&|]*\s(?:--force|-f\b)",
        "Dangerous command: history-rewriting push (git push --force)",
    ),
    (
        "command.git-hard-reset",
        r"\bgit\s+reset\s(?:[^;&|]*\s)?--hard",
        "Dangerous command: irreversible history reset (git reset --hard)",
    ),
];

/// Top-level system directories that may not be accessed at all.
pub const DANGEROUS_DIRECTORIES: &[&str] = &["/", "/etc", "/var", "/usr", "/bin", "/sbin", "/boot"];

/// Filename fragments marking credentials or key material.
pub const PROTECTED_FILE_FRAGMENTS: &[&str] = &[
    ".env",
    ".env.local",
    ".env.production",
    "credentials",
    "secrets",
    ".ssh",
    "id_rsa",
    "id_ed25519",
];

/// Filename markers that exempt a file from the protected-file rules.
pub const EXEMPTION_MARKERS: &[&str] = &[".sample", ".example", ".template"];

/// A single compiled classification rule.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    id: String,
    category: RuleCategory,
    pattern: Regex,
    description: String,
}

impl ClassificationRule {
    /// Compile a rule.
    ///
    /// Command and protected-file rules match case-insensitively. Directory
    /// rules compare paths literally, so they stay case-sensitive.
    pub fn new(
        id: impl Into<String>,
        category: RuleCategory,
        pattern: &str,
        description: impl Into<String>,
    ) -> Result<Self, GuardrailError> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(category != RuleCategory::DangerousPath)
            .build()?;
        Ok(Self {
            id: id.into(),
            category,
            pattern,
            description: description.into(),
        })
    }

    /// Rule matching `directory` itself or anything nested under it.
    ///
    /// A sibling sharing the same leading characters (`/etcetera` for
    /// `/etc`) does not match.
    pub fn directory(directory: &str) -> Result<Self, GuardrailError> {
        let directory = normalize_directory(directory)?;
        let pattern = format!("^{}(?:/|$)", regex::escape(directory));
        Self::new(
            format!("path.directory:{directory}"),
            RuleCategory::DangerousPath,
            &pattern,
            format!("Access to protected path blocked: {directory}"),
        )
    }

    /// Rule matching any filename containing `fragment`.
    pub fn protected_file(fragment: &str) -> Result<Self, GuardrailError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(GuardrailError::InvalidRule {
                message: "protected file fragment is empty".into(),
            });
        }
        Self::new(
            format!("file.protected:{fragment}"),
            RuleCategory::ProtectedFile,
            &regex::escape(fragment),
            format!("Access to sensitive file blocked: {fragment}"),
        )
    }

    /// Unique rule identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Which list this rule belongs to.
    pub fn category(&self) -> RuleCategory {
        self.category
    }

    /// Source text of the compiled pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Human-readable explanation surfaced in a block verdict.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Test the pattern anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

fn normalize_directory(directory: &str) -> Result<&str, GuardrailError> {
    let trimmed = directory.trim();
    if trimmed.is_empty() {
        return Err(GuardrailError::InvalidRule {
            message: "protected directory is empty".into(),
        });
    }
    let stripped = trimmed.trim_end_matches('/');
    Ok(if stripped.is_empty() { "/" } else { stripped })
}

/// Extra rule entries supplied by configuration.
#[derive(Debug, Clone, Default)]
pub struct LibraryExtensions {
    /// Additional dangerous command regexes.
    pub command_patterns: Vec<String>,
    /// Additional protected directories.
    pub directories: Vec<String>,
    /// Additional protected filename fragments.
    pub file_fragments: Vec<String>,
}

impl LibraryExtensions {
    /// Whether there is nothing to add.
    pub fn is_empty(&self) -> bool {
        self.command_patterns.is_empty()
            && self.directories.is_empty()
            && self.file_fragments.is_empty()
    }
}

/// Versioned, read-only set of classification rules.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    version: String,
    command_rules: Vec<ClassificationRule>,
    directory_rules: Vec<ClassificationRule>,
    file_rules: Vec<ClassificationRule>,
    exemptions: Vec<String>,
}

impl PatternLibrary {
    /// Build the built-in rule set.
    pub fn builtin() -> Result<Self, GuardrailError> {
        let command_rules = DANGEROUS_COMMANDS
            .iter()
            .map(|(id, pattern, description)| {
                ClassificationRule::new(*id, RuleCategory::DangerousCommand, pattern, *description)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let directory_rules = DANGEROUS_DIRECTORIES
            .iter()
            .copied()
            .map(ClassificationRule::directory)
            .collect::<Result<Vec<_>, _>>()?;

        let file_rules = PROTECTED_FILE_FRAGMENTS
            .iter()
            .copied()
            .map(ClassificationRule::protected_file)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: LIBRARY_VERSION.to_string(),
            command_rules,
            directory_rules,
            file_rules,
            exemptions: EXEMPTION_MARKERS.iter().map(|m| (*m).to_string()).collect(),
        })
    }

    /// Append configured entries after the built-in ones.
    ///
    /// Built-in rules keep their position, so they still supply the reason
    /// when both a built-in and an extra rule match.
    pub fn extend(mut self, extensions: &LibraryExtensions) -> Result<Self, GuardrailError> {
        for (index, pattern) in extensions.command_patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                return Err(GuardrailError::InvalidRule {
                    message: "command pattern is empty".into(),
                });
            }
            self.command_rules.push(ClassificationRule::new(
                format!("custom.command.{index}"),
                RuleCategory::DangerousCommand,
                pattern,
                format!("Dangerous command pattern detected: {pattern}"),
            )?);
        }
        for directory in &extensions.directories {
            self.directory_rules
                .push(ClassificationRule::directory(directory)?);
        }
        for fragment in &extensions.file_fragments {
            self.file_rules
                .push(ClassificationRule::protected_file(fragment)?);
        }
        if !extensions.is_empty() {
            self.version = format!("{LIBRARY_VERSION}+custom");
        }
        Ok(self)
    }

    /// Rule set version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Dangerous command rules, in evaluation order.
    pub fn command_rules(&self) -> &[ClassificationRule] {
        &self.command_rules
    }

    /// Dangerous directory rules, in evaluation order.
    pub fn directory_rules(&self) -> &[ClassificationRule] {
        &self.directory_rules
    }

    /// Protected file rules, in evaluation order.
    pub fn file_rules(&self) -> &[ClassificationRule] {
        &self.file_rules
    }

    /// Lower-case filename markers that override protected-file matches.
    pub fn exemptions(&self) -> &[String] {
        &self.exemptions
    }

    /// Total number of rules across all three lists.
    pub fn rule_count(&self) -> usize {
        self.command_rules.len() + self.directory_rules.len() + self.file_rules.len()
    }
}
