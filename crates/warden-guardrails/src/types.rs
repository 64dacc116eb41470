//! Core types for the policy gate.
//!
//! Defines the action descriptor submitted to the gate, the verdict it
//! returns, and the rule categories and matches used in between.

use serde::{Deserialize, Serialize};

/// Kind of action an agent intends to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Run a shell command.
    ShellCommand,
    /// Read a file.
    FileRead,
    /// Create or overwrite a file.
    FileWrite,
    /// Apply a single edit to a file.
    FileEdit,
    /// Apply several edits to a file in one call.
    FileBatchEdit,
    /// Any tool the gate has no policy for.
    Other,
}

impl ActionKind {
    /// Map a host tool name onto an action kind.
    ///
    /// Unknown tool names map to [`ActionKind::Other`].
    pub fn from_tool_name(tool_name: &str) -> Self {
        match tool_name {
            "Bash" => Self::ShellCommand,
            "Read" => Self::FileRead,
            "Write" => Self::FileWrite,
            "Edit" => Self::FileEdit,
            "MultiEdit" => Self::FileBatchEdit,
            _ => Self::Other,
        }
    }

    /// Whether this kind carries a `path`.
    pub fn is_file(self) -> bool {
        matches!(
            self,
            Self::FileRead | Self::FileWrite | Self::FileEdit | Self::FileBatchEdit
        )
    }

    /// Whether this kind modifies the file it targets.
    pub fn is_mutating(self) -> bool {
        matches!(self, Self::FileWrite | Self::FileEdit | Self::FileBatchEdit)
    }

    /// All variants, in declaration order.
    pub fn all() -> &'static [ActionKind] {
        &[
            Self::ShellCommand,
            Self::FileRead,
            Self::FileWrite,
            Self::FileEdit,
            Self::FileBatchEdit,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShellCommand => write!(f, "shellCommand"),
            Self::FileRead => write!(f, "fileRead"),
            Self::FileWrite => write!(f, "fileWrite"),
            Self::FileEdit => write!(f, "fileEdit"),
            Self::FileBatchEdit => write!(f, "fileBatchEdit"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// The unit of work submitted to the gate.
///
/// `command` is populated for [`ActionKind::ShellCommand`], `path` for the
/// file kinds. A descriptor that lacks the field its kind needs is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    /// What the agent intends to do.
    pub kind: ActionKind,
    /// Shell command text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Target filesystem path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ActionDescriptor {
    /// A shell command action.
    pub fn shell(command: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::ShellCommand,
            command: Some(command.into()),
            path: None,
        }
    }

    /// A file action of the given kind.
    pub fn file(kind: ActionKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            command: None,
            path: Some(path.into()),
        }
    }

    /// An action the gate has no policy for.
    pub fn other() -> Self {
        Self {
            kind: ActionKind::Other,
            command: None,
            path: None,
        }
    }

    /// Build a descriptor from a host tool call.
    ///
    /// Reads `command` for shell tools and `file_path` for file tools.
    /// Non-string values are treated as absent.
    pub fn from_tool_call(tool_name: &str, tool_input: &serde_json::Value) -> Self {
        let kind = ActionKind::from_tool_name(tool_name);
        let field = |name: &str| {
            tool_input
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        };

        match kind {
            ActionKind::ShellCommand => Self {
                kind,
                command: field("command"),
                path: None,
            },
            k if k.is_file() => Self {
                kind,
                command: None,
                path: field("file_path"),
            },
            _ => Self::other(),
        }
    }
}

/// Which list of the pattern library a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleCategory {
    /// Matches normalized shell command text.
    DangerousCommand,
    /// Matches a trimmed path against a system directory.
    DangerousPath,
    /// Matches the final path component against a sensitive name fragment.
    ProtectedFile,
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DangerousCommand => write!(f, "dangerousCommand"),
            Self::DangerousPath => write!(f, "dangerousPath"),
            Self::ProtectedFile => write!(f, "protectedFile"),
        }
    }
}

/// A rule that fired during classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatch {
    /// ID of the rule that matched.
    pub rule_id: String,
    /// Category of the rule.
    pub category: RuleCategory,
    /// Diagnostic surfaced to the agent.
    pub reason: String,
}

/// Fallback diagnostic when a block is requested without a reason.
const DEFAULT_BLOCK_REASON: &str = "Blocked by policy";

/// Result of gate evaluation.
///
/// A blocked verdict always carries a non-empty reason; an allowed verdict
/// always carries an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    allowed: bool,
    reason: String,
}

impl Verdict {
    /// Allow the action.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: String::new(),
        }
    }

    /// Block the action with a diagnostic.
    pub fn block(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let reason = if reason.trim().is_empty() {
            DEFAULT_BLOCK_REASON.to_string()
        } else {
            reason
        };
        Self {
            allowed: false,
            reason,
        }
    }

    /// Whether the action may proceed.
    pub fn allowed(&self) -> bool {
        self.allowed
    }

    /// Whether the action must be aborted.
    pub fn is_blocked(&self) -> bool {
        !self.allowed
    }

    /// Diagnostic for a blocked action; empty when allowed.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<Option<RuleMatch>> for Verdict {
    fn from(matched: Option<RuleMatch>) -> Self {
        matched.map_or_else(Self::allow, |m| Self::block(m.reason))
    }
}
