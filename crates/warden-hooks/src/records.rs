//! Audit records built from hook payloads.
//!
//! Tool events are recorded verbatim. Lifecycle events are reduced to the
//! fields below, with free text capped in characters.

use serde::Serialize;
use warden_core::text::truncate_chars;
use warden_guardrails::{ActionKind, Verdict};

use crate::types::{HookInput, UNKNOWN};

/// Characters of a sub-agent prompt kept in its start record.
pub const SUBAGENT_PROMPT_PREVIEW_CHARS: usize = 200;

/// Characters of a sub-agent result kept in its stop record.
pub const SUBAGENT_RESULT_PREVIEW_CHARS: usize = 200;

/// Characters of a user prompt kept in its record.
pub const USER_PROMPT_CHARS: usize = 500;

/// Session start or end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// `session_start` or `session_end`.
    pub event: &'static str,
    /// Host session id.
    pub session_id: String,
    /// Working directory (start only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    /// Why the session ended (end only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SessionRecord {
    /// Record for a session start.
    pub fn start(input: &HookInput) -> Self {
        Self {
            event: "session_start",
            session_id: input.session_id().to_string(),
            cwd: Some(input.cwd.clone().unwrap_or_default()),
            reason: None,
        }
    }

    /// Record for a session end.
    pub fn end(input: &HookInput) -> Self {
        Self {
            event: "session_end",
            session_id: input.session_id().to_string(),
            cwd: None,
            reason: Some(input.reason.clone().unwrap_or_else(|| UNKNOWN.to_string())),
        }
    }
}

/// Sub-agent start or stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubagentRecord {
    /// `subagent_start` or `subagent_stop`.
    pub event: &'static str,
    /// Parent session id.
    pub session_id: String,
    /// Sub-agent id.
    pub subagent_id: String,
    /// Sub-agent type (start only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subagent_type: Option<String>,
    /// Start of the task prompt (start only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_preview: Option<String>,
    /// Start of the result (stop only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_preview: Option<String>,
}

impl SubagentRecord {
    /// Record for a sub-agent start.
    pub fn start(input: &HookInput) -> Self {
        let prompt = input.prompt.as_deref().unwrap_or("");
        Self {
            event: "subagent_start",
            session_id: input.session_id().to_string(),
            subagent_id: subagent_id(input),
            subagent_type: Some(
                input
                    .subagent_type
                    .clone()
                    .unwrap_or_else(|| UNKNOWN.to_string()),
            ),
            prompt_preview: Some(truncate_chars(prompt, SUBAGENT_PROMPT_PREVIEW_CHARS).to_string()),
            result_preview: None,
        }
    }

    /// Record for a sub-agent stop.
    ///
    /// Non-string results are rendered as compact JSON before capping.
    pub fn stop(input: &HookInput) -> Self {
        let result = match &input.result {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        Self {
            event: "subagent_stop",
            session_id: input.session_id().to_string(),
            subagent_id: subagent_id(input),
            subagent_type: None,
            prompt_preview: None,
            result_preview: Some(truncate_chars(&result, SUBAGENT_RESULT_PREVIEW_CHARS).to_string()),
        }
    }
}

fn subagent_id(input: &HookInput) -> String {
    input
        .subagent_id
        .clone()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Submitted user prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecord {
    /// Host session id.
    pub session_id: String,
    /// Start of the prompt.
    pub prompt: String,
    /// Full prompt length in characters.
    pub prompt_length: usize,
}

impl PromptRecord {
    /// Record for a prompt submission.
    pub fn from_input(input: &HookInput) -> Self {
        let prompt = input.prompt.as_deref().unwrap_or("");
        Self {
            session_id: input.session_id().to_string(),
            prompt: truncate_chars(prompt, USER_PROMPT_CHARS).to_string(),
            prompt_length: prompt.chars().count(),
        }
    }
}

/// Gate decision for one tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictRecord {
    /// Host session id.
    pub session_id: String,
    /// Host tool name.
    pub tool_name: String,
    /// Action kind the tool mapped to.
    pub kind: ActionKind,
    /// Whether the call may proceed.
    pub allowed: bool,
    /// Block diagnostic; empty when allowed.
    pub reason: String,
    /// Rule set version that produced the decision.
    pub library_version: String,
}

impl VerdictRecord {
    /// Record for `verdict` on the tool call in `input`.
    pub fn new(input: &HookInput, kind: ActionKind, verdict: &Verdict, library_version: &str) -> Self {
        Self {
            session_id: input.session_id().to_string(),
            tool_name: input.tool_name().to_string(),
            kind,
            allowed: verdict.allowed(),
            reason: verdict.reason().to_string(),
            library_version: library_version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> HookInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn session_start_record() {
        let record = SessionRecord::start(&input(json!({"session_id": "s1", "cwd": "/work"})));
        insta::assert_json_snapshot!(record, @r###"
        {
          "event": "session_start",
          "sessionId": "s1",
          "cwd": "/work"
        }
        "###);
    }

    #[test]
    fn session_end_defaults_unknown() {
        let record = SessionRecord::end(&input(json!({})));
        assert_eq!(record.session_id, "unknown");
        assert_eq!(record.reason.as_deref(), Some("unknown"));
        assert!(record.cwd.is_none());
    }

    #[test]
    fn subagent_start_caps_prompt() {
        let record = SubagentRecord::start(&input(json!({
            "session_id": "s1",
            "subagent_id": "a1",
            "prompt": "p".repeat(500)
        })));
        assert_eq!(record.prompt_preview.unwrap().len(), SUBAGENT_PROMPT_PREVIEW_CHARS);
        assert_eq!(record.subagent_type.as_deref(), Some("unknown"));
    }

    #[test]
    fn subagent_stop_renders_structured_result() {
        let record = SubagentRecord::stop(&input(json!({"result": {"ok": true}})));
        assert_eq!(record.result_preview.as_deref(), Some(r#"{"ok":true}"#));
        assert_eq!(record.subagent_id, "unknown");

        let record = SubagentRecord::stop(&input(json!({"result": "done"})));
        assert_eq!(record.result_preview.as_deref(), Some("done"));

        let record = SubagentRecord::stop(&input(json!({})));
        assert_eq!(record.result_preview.as_deref(), Some(""));
    }

    #[test]
    fn prompt_record_keeps_full_length() {
        let prompt = "ü".repeat(600);
        let record = PromptRecord::from_input(&input(json!({"session_id": "s", "prompt": prompt})));
        assert_eq!(record.prompt.chars().count(), USER_PROMPT_CHARS);
        assert_eq!(record.prompt_length, 600);
    }

    #[test]
    fn verdict_record_serialization() {
        let record = VerdictRecord::new(
            &input(json!({"session_id": "s1", "tool_name": "Write"})),
            ActionKind::FileWrite,
            &Verdict::block("Access to sensitive file blocked: .env"),
            "1.0.0",
        );
        insta::assert_json_snapshot!(record, @r###"
        {
          "sessionId": "s1",
          "toolName": "Write",
          "kind": "fileWrite",
          "allowed": false,
          "reason": "Access to sensitive file blocked: .env",
          "libraryVersion": "1.0.0"
        }
        "###);
    }
}
