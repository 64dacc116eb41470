//! Builds the gate, audit sink and dispatcher from loaded settings.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use warden_audit::{AuditCategory, AuditSink, JsonFileSink, NullSink, RetentionPolicy};
use warden_guardrails::{LibraryExtensions, PatternLibrary, PolicyGate};
use warden_hooks::HookDispatcher;
use warden_settings::{GuardrailSettings, RetentionSettings, WardenSettings};

/// Built-in rules plus configured extras.
///
/// An unusable extra (bad regex, blank entry) drops all extras with a
/// warning rather than leaving the gate half-configured.
pub fn build_gate(guardrails: &GuardrailSettings) -> Result<PolicyGate> {
    let builtin = PatternLibrary::builtin().context("Failed to compile built-in rules")?;
    if guardrails.is_empty() {
        return Ok(PolicyGate::new(builtin));
    }

    let extensions = LibraryExtensions {
        command_patterns: guardrails.extra_command_patterns.clone(),
        directories: guardrails.extra_protected_directories.clone(),
        file_fragments: guardrails.extra_protected_files.clone(),
    };
    match builtin.clone().extend(&extensions) {
        Ok(library) => {
            tracing::debug!(rules = library.rule_count(), "extended rule set loaded");
            Ok(PolicyGate::new(library))
        }
        Err(e) => {
            tracing::warn!(error = %e, "invalid guardrail extension, using built-in rules only");
            Ok(PolicyGate::new(builtin))
        }
    }
}

/// Per-category bounds from settings.
pub fn retention_policy(retention: &RetentionSettings) -> RetentionPolicy {
    RetentionPolicy::default()
        .with_limit(AuditCategory::PreToolUse, retention.pre_tool_use)
        .with_limit(AuditCategory::PostToolUse, retention.post_tool_use)
        .with_limit(AuditCategory::Verdicts, retention.verdicts)
        .with_limit(AuditCategory::Sessions, retention.sessions)
        .with_limit(AuditCategory::Subagents, retention.subagents)
        .with_limit(AuditCategory::UserPrompts, retention.user_prompts)
}

/// File sink under the project's log directory, or a null sink when
/// auditing is off.
pub fn build_sink(settings: &WardenSettings, project_dir: &Path) -> Arc<dyn AuditSink> {
    if !settings.audit.enabled {
        return Arc::new(NullSink);
    }
    let sink = JsonFileSink::new(settings.audit.resolve_log_dir(project_dir))
        .with_retention(retention_policy(&settings.audit.retention))
        .with_redaction(settings.audit.redact_sensitive);
    Arc::new(sink)
}

/// Dispatcher for one hook invocation in `project_dir`.
pub fn build_dispatcher(settings: &WardenSettings, project_dir: &Path) -> Result<HookDispatcher> {
    let gate = build_gate(&settings.guardrails)?;
    let dispatcher = HookDispatcher::new(gate, build_sink(settings, project_dir));
    Ok(if settings.context.enabled {
        dispatcher.with_context_file(settings.context.resolve_file(project_dir))
    } else {
        dispatcher
    })
}
