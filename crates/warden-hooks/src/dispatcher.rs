//! Hook dispatcher: one payload in, one outcome out.
//!
//! Per event:
//!
//! - `PreToolUse`: record the payload, evaluate the gate, record the verdict,
//!   block (exit 2) on a deny
//! - `PostToolUse`: record the payload
//! - session and sub-agent events: record a reduced lifecycle record
//! - `UserPromptSubmit`: record the prompt, inject project context on stdout
//!
//! ## Fail-Open
//!
//! Malformed payloads, audit failures and panics never block the host.
//! Audit failures are logged and the event continues.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use warden_audit::{AuditCategory, AuditEvent, AuditSink, summarize_tool_call};
use warden_guardrails::{ActionDescriptor, PolicyGate};

use crate::context::load_context;
use crate::errors::HookError;
use crate::records::{PromptRecord, SessionRecord, SubagentRecord, VerdictRecord};
use crate::types::{HookEvent, HookInput, HookOutcome};

/// Routes hook payloads to the gate and the audit sink.
pub struct HookDispatcher {
    gate: PolicyGate,
    sink: Arc<dyn AuditSink>,
    context_file: Option<PathBuf>,
}

impl HookDispatcher {
    /// Create a dispatcher without context injection.
    pub fn new(gate: PolicyGate, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            gate,
            sink,
            context_file: None,
        }
    }

    /// Inject `path` on prompt submission.
    #[must_use]
    pub fn with_context_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.context_file = Some(path.into());
        self
    }

    /// The gate tool calls are evaluated against.
    pub fn gate(&self) -> &PolicyGate {
        &self.gate
    }

    /// Handle one invocation. Never fails; errors resolve to proceed.
    pub fn dispatch(&self, event: HookEvent, raw: &str) -> HookOutcome {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_dispatch(event, raw))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(error)) => {
                warn!(%event, error = %error, "hook failed, proceeding (fail-open)");
                HookOutcome::proceed()
            }
            Err(_) => {
                warn!(%event, "hook panicked, proceeding (fail-open)");
                HookOutcome::proceed()
            }
        }
    }

    /// Handle one invocation, surfacing payload errors.
    pub fn try_dispatch(&self, event: HookEvent, raw: &str) -> Result<HookOutcome, HookError> {
        let payload: Value = serde_json::from_str(raw)?;
        if !payload.is_object() {
            return Err(HookError::NotAnObject {
                kind: json_kind(&payload),
            });
        }
        let input: HookInput = serde_json::from_value(payload.clone())?;
        let category = event.audit_category();

        let outcome = match event {
            HookEvent::PreToolUse => self.pre_tool_use(&input, payload),
            HookEvent::PostToolUse => {
                let summary = summarize_tool_call(input.tool_name(), &input.tool_input);
                self.record(category, AuditEvent::new(payload).with_summary(summary));
                HookOutcome::proceed()
            }
            HookEvent::SessionStart => {
                self.record_entry(category, &SessionRecord::start(&input));
                HookOutcome::proceed()
            }
            HookEvent::SessionEnd => {
                self.record_entry(category, &SessionRecord::end(&input));
                HookOutcome::proceed()
            }
            HookEvent::SubagentStart => {
                self.record_entry(category, &SubagentRecord::start(&input));
                HookOutcome::proceed()
            }
            HookEvent::SubagentStop => {
                self.record_entry(category, &SubagentRecord::stop(&input));
                HookOutcome::proceed()
            }
            HookEvent::UserPromptSubmit => {
                self.record_entry(category, &PromptRecord::from_input(&input));
                self.context_injection()
            }
        };

        debug_assert!(event.can_block() || !outcome.is_blocked());
        Ok(outcome)
    }

    fn pre_tool_use(&self, input: &HookInput, payload: Value) -> HookOutcome {
        let tool_name = input.tool_name();
        let summary = summarize_tool_call(tool_name, &input.tool_input);
        self.record(
            AuditCategory::PreToolUse,
            AuditEvent::new(payload).with_summary(summary.clone()),
        );

        let action = ActionDescriptor::from_tool_call(tool_name, &input.tool_input);
        let verdict = self.gate.evaluate(&action);

        let record = VerdictRecord::new(input, action.kind, &verdict, self.gate.library().version());
        match serde_json::to_value(&record) {
            Ok(value) => self.record(
                AuditCategory::Verdicts,
                AuditEvent::new(value).with_summary(summary),
            ),
            Err(e) => warn!(error = %e, "failed to serialize verdict record"),
        }

        if verdict.is_blocked() {
            info!(tool = tool_name, reason = verdict.reason(), "tool call blocked");
            HookOutcome::block(verdict.reason())
        } else {
            HookOutcome::proceed()
        }
    }

    fn context_injection(&self) -> HookOutcome {
        self.context_file
            .as_deref()
            .and_then(load_context)
            .map_or_else(HookOutcome::proceed, HookOutcome::proceed_with_output)
    }

    fn record(&self, category: AuditCategory, event: AuditEvent) {
        if let Err(e) = self.sink.append(category, event) {
            warn!(%category, error = %e, "audit append failed");
        } else {
            debug!(%category, "audit event recorded");
        }
    }

    fn record_entry<T: Serialize>(&self, category: AuditCategory, entry: &T) {
        match serde_json::to_value(entry) {
            Ok(value) => self.record(category, AuditEvent::new(value)),
            Err(e) => warn!(%category, error = %e, "failed to serialize audit record"),
        }
    }
}

impl std::fmt::Debug for HookDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookDispatcher")
            .field("gate", &self.gate)
            .field("context_file", &self.context_file)
            .finish_non_exhaustive()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
