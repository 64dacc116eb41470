//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and `#[serde(default)]`,
//! so a settings file only needs the keys it changes.

mod audit;
mod context;
mod guardrails;
mod logging;

pub use audit::*;
pub use context::*;
pub use guardrails::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings type.
///
/// Example:
///
/// ```json
/// {
///   "logging": { "level": "debug" },
///   "audit": { "retention": { "sessions": 50 } },
///   "guardrails": { "extraProtectedFiles": ["kubeconfig"] }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WardenSettings {
    /// Diagnostic logging.
    pub logging: LoggingSettings,
    /// Audit trail.
    pub audit: AuditSettings,
    /// Additions to the built-in rule set.
    pub guardrails: GuardrailSettings,
    /// Prompt context injection.
    pub context: ContextSettings,
}

impl WardenSettings {
    /// Reject values that deserialize but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "logging.level must not be empty".into(),
            ));
        }
        if self.audit.log_dir.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "audit.logDir must not be empty".into(),
            ));
        }
        self.audit.retention.validate()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_produces_defaults() {
        let settings: WardenSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, WardenSettings::default());
    }

    #[test]
    fn default_settings_json_field_names() {
        let json = serde_json::to_value(WardenSettings::default()).unwrap();
        assert!(json["logging"].get("toFile").is_some());
        assert!(json["audit"].get("logDir").is_some());
        assert!(json["audit"].get("redactSensitive").is_some());
        assert!(json["audit"]["retention"].get("preToolUse").is_some());
        assert!(json["guardrails"].get("extraCommandPatterns").is_some());
        assert!(json["context"].get("file").is_some());
    }

    #[test]
    fn partial_json_overrides() {
        let json = serde_json::json!({
            "audit": {"retention": {"sessions": 10}},
            "context": {"enabled": false}
        });
        let settings: WardenSettings = serde_json::from_value(json).unwrap();
        assert_eq!(settings.audit.retention.sessions, 10);
        assert_eq!(settings.audit.retention.subagents, 200);
        assert!(settings.audit.enabled);
        assert!(!settings.context.enabled);
        assert_eq!(settings.context.file, ".claude/context.md");
    }

    #[test]
    fn defaults_are_valid() {
        WardenSettings::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_blank_strings() {
        let mut settings = WardenSettings::default();
        settings.logging.level = " ".into();
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidValue(_))
        ));

        let mut settings = WardenSettings::default();
        settings.audit.log_dir = String::new();
        assert!(settings.validate().is_err());
    }
}
