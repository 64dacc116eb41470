//! Core types for the hook adapter.
//!
//! The host runs one process per lifecycle event, writes a JSON object to
//! stdin, and reads the exit code (plus stderr/stdout) back.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use warden_audit::AuditCategory;

use crate::errors::HookError;

/// Exit code telling the host to proceed.
pub const EXIT_PROCEED: i32 = 0;

/// Exit code telling the host to abort the tool call.
pub const EXIT_BLOCK: i32 = 2;

/// Lifecycle event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Before a tool is executed. The only event that can block.
    PreToolUse,
    /// After a tool has executed.
    PostToolUse,
    /// When a session starts.
    SessionStart,
    /// When a session ends.
    SessionEnd,
    /// When a sub-agent is spawned.
    SubagentStart,
    /// When a sub-agent completes.
    SubagentStop,
    /// When the user submits a prompt.
    UserPromptSubmit,
}

impl HookEvent {
    /// Returns all event variants.
    #[must_use]
    pub fn all() -> &'static [HookEvent] {
        &[
            Self::PreToolUse,
            Self::PostToolUse,
            Self::SessionStart,
            Self::SessionEnd,
            Self::SubagentStart,
            Self::SubagentStop,
            Self::UserPromptSubmit,
        ]
    }

    /// Whether a handler for this event may block the host.
    #[must_use]
    pub fn can_block(self) -> bool {
        matches!(self, Self::PreToolUse)
    }

    /// Audit sequence the event's record is appended to.
    #[must_use]
    pub fn audit_category(self) -> AuditCategory {
        match self {
            Self::PreToolUse => AuditCategory::PreToolUse,
            Self::PostToolUse => AuditCategory::PostToolUse,
            Self::SessionStart | Self::SessionEnd => AuditCategory::Sessions,
            Self::SubagentStart | Self::SubagentStop => AuditCategory::Subagents,
            Self::UserPromptSubmit => AuditCategory::UserPrompts,
        }
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreToolUse => write!(f, "PreToolUse"),
            Self::PostToolUse => write!(f, "PostToolUse"),
            Self::SessionStart => write!(f, "SessionStart"),
            Self::SessionEnd => write!(f, "SessionEnd"),
            Self::SubagentStart => write!(f, "SubagentStart"),
            Self::SubagentStop => write!(f, "SubagentStop"),
            Self::UserPromptSubmit => write!(f, "UserPromptSubmit"),
        }
    }
}

impl FromStr for HookEvent {
    type Err = HookError;

    /// Accepts `PreToolUse`, `pre-tool-use` and `pre_tool_use` spellings.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let folded: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match folded.as_str() {
            "pretooluse" => Ok(Self::PreToolUse),
            "posttooluse" => Ok(Self::PostToolUse),
            "sessionstart" => Ok(Self::SessionStart),
            "sessionend" => Ok(Self::SessionEnd),
            "subagentstart" => Ok(Self::SubagentStart),
            "subagentstop" => Ok(Self::SubagentStop),
            "userpromptsubmit" => Ok(Self::UserPromptSubmit),
            _ => Err(HookError::UnknownEvent(name.to_string())),
        }
    }
}

/// Typed view of the fields the adapter reads from a hook payload.
///
/// Every field is optional; absent identifiers are recorded as `unknown`.
/// Text fields holding a non-string value are treated as absent, so any JSON
/// object deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HookInput {
    /// Host session identifier.
    #[serde(deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
    /// Working directory reported at session start.
    #[serde(deserialize_with = "lenient_string")]
    pub cwd: Option<String>,
    /// Tool name for tool events.
    #[serde(deserialize_with = "lenient_string")]
    pub tool_name: Option<String>,
    /// Tool arguments for tool events.
    pub tool_input: Value,
    /// Prompt text (user prompt or sub-agent task).
    #[serde(deserialize_with = "lenient_string")]
    pub prompt: Option<String>,
    /// Why a session ended.
    #[serde(deserialize_with = "lenient_string")]
    pub reason: Option<String>,
    /// Sub-agent identifier.
    #[serde(deserialize_with = "lenient_string")]
    pub subagent_id: Option<String>,
    /// Sub-agent type.
    #[serde(deserialize_with = "lenient_string")]
    pub subagent_type: Option<String>,
    /// Sub-agent result, any JSON type.
    pub result: Option<Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Placeholder for identifiers the host did not send.
pub const UNKNOWN: &str = "unknown";

impl HookInput {
    /// Session id, or `unknown`.
    pub fn session_id(&self) -> &str {
        self.session_id.as_deref().unwrap_or(UNKNOWN)
    }

    /// Tool name, or `unknown`.
    pub fn tool_name(&self) -> &str {
        self.tool_name.as_deref().unwrap_or(UNKNOWN)
    }
}

/// What the process reports back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutcome {
    /// Process exit code.
    pub exit_code: i32,
    /// Text for stdout (context injection).
    pub stdout: Option<String>,
    /// Text for stderr (block diagnostic).
    pub stderr: Option<String>,
}

impl HookOutcome {
    /// Let the host proceed silently.
    pub fn proceed() -> Self {
        Self {
            exit_code: EXIT_PROCEED,
            stdout: None,
            stderr: None,
        }
    }

    /// Let the host proceed and hand it `text` on stdout.
    pub fn proceed_with_output(text: impl Into<String>) -> Self {
        Self {
            stdout: Some(text.into()),
            ..Self::proceed()
        }
    }

    /// Abort the tool call, surfacing `reason`.
    pub fn block(reason: &str) -> Self {
        Self {
            exit_code: EXIT_BLOCK,
            stdout: None,
            stderr: Some(format!("BLOCKED: {reason}")),
        }
    }

    /// Whether the host will abort the tool call.
    pub fn is_blocked(&self) -> bool {
        self.exit_code == EXIT_BLOCK
    }
}
