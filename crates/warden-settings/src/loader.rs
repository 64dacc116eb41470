//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`WardenSettings::default()`]
//! 2. If the settings file exists, deep-merge its values over defaults
//! 3. Apply `WARDEN_*` environment variable overrides (highest priority)
//! 4. Validate
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::WardenSettings;

/// Environment variable naming an alternative settings file.
pub const SETTINGS_PATH_ENV: &str = "WARDEN_SETTINGS";

/// Resolve the settings file: `$WARDEN_SETTINGS`, else `~/.warden/settings.json`.
pub fn settings_path() -> PathBuf {
    if let Some(path) = read_env_string(SETTINGS_PATH_ENV) {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".warden").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<WardenSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON or an unusable value, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<WardenSettings> {
    load_settings_with(path, |name| std::env::var(name).ok())
}

/// Load settings reading environment overrides through `env`.
pub fn load_settings_with<F>(path: &Path, env: F) -> Result<WardenSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = serde_json::to_value(WardenSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: WardenSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings, env);
    settings.validate()?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// | variable                 | setting           |
/// |--------------------------|-------------------|
/// | `WARDEN_LOG_LEVEL`       | `logging.level`   |
/// | `WARDEN_AUDIT_ENABLED`   | `audit.enabled`   |
/// | `WARDEN_AUDIT_DIR`       | `audit.logDir`    |
/// | `WARDEN_CONTEXT_ENABLED` | `context.enabled` |
///
/// Booleans accept `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
/// Invalid values are ignored with a warning.
pub fn apply_env_overrides<F>(settings: &mut WardenSettings, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let string = |name: &str| env(name).filter(|v| !v.trim().is_empty());
    let boolean = |name: &str| {
        let val = env(name)?;
        let result = parse_bool(&val);
        if result.is_none() {
            warn!(key = name, value = %val, "invalid boolean env var, ignoring");
        }
        result
    };

    if let Some(v) = string("WARDEN_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = boolean("WARDEN_AUDIT_ENABLED") {
        settings.audit.enabled = v;
    }
    if let Some(v) = string("WARDEN_AUDIT_DIR") {
        settings.audit.log_dir = v;
    }
    if let Some(v) = boolean("WARDEN_CONTEXT_ENABLED") {
        settings.context.enabled = v;
    }
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::errors::SettingsError;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"audit": {"enabled": true, "logDir": "logs"}});
        let source = serde_json::json!({"audit": {"logDir": "audit"}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["audit"]["logDir"], "audit");
        assert_eq!(merged["audit"]["enabled"], true);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"items": [1, 2, 3]});
        let source = serde_json::json!({"items": [4, 5]});
        let merged = deep_merge(target, source);
        assert_eq!(merged["items"], serde_json::json!([4, 5]));
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_new_keys_added() {
        let merged = deep_merge(serde_json::json!({"a": 1}), serde_json::json!({"b": 2}));
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"nested": true}});
        let source = serde_json::json!({"a": 42});
        assert_eq!(deep_merge(target, source)["a"], 42);
    }

    // ── load_settings_with ──────────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let path = Path::new("/nonexistent/settings.json");
        let settings = load_settings_with(path, no_env).unwrap();
        assert_eq!(settings, WardenSettings::default());
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"audit": {"retention": {"sessions": 20}}, "logging": {"level": "debug"}}"#,
        )
        .unwrap();

        let settings = load_settings_with(&path, no_env).unwrap();
        assert_eq!(settings.audit.retention.sessions, 20);
        assert_eq!(settings.audit.retention.user_prompts, 500);
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.to_file);
    }

    #[test]
    fn load_guardrail_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"guardrails": {"extraProtectedDirectories": ["/opt/vault"]}}"#,
        )
        .unwrap();

        let settings = load_settings_with(&path, no_env).unwrap();
        assert_eq!(settings.guardrails.extra_protected_directories, vec!["/opt/vault"]);
        assert!(settings.guardrails.extra_command_patterns.is_empty());
    }

    #[test]
    fn blank_guardrail_entry_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"audit": {"enabled": false}, "guardrails": {"extraProtectedFiles": [" "]}}"#,
        )
        .unwrap();

        let settings = load_settings_with(&path, no_env).unwrap();
        assert!(!settings.audit.enabled);
        assert_eq!(settings.guardrails.extra_protected_files, vec![" "]);
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result = load_settings_with(&path, no_env);
        assert!(matches!(result.unwrap_err(), SettingsError::Json(_)));
    }

    #[test]
    fn load_wrong_type_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"audit": {"enabled": "maybe"}}"#).unwrap();

        assert!(matches!(
            load_settings_with(&path, no_env).unwrap_err(),
            SettingsError::Json(_)
        ));
    }

    #[test]
    fn load_invalid_value_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"audit": {"retention": {"verdicts": 0}}}"#).unwrap();

        assert!(matches!(
            load_settings_with(&path, no_env).unwrap_err(),
            SettingsError::InvalidValue(_)
        ));
    }

    // ── env overrides ───────────────────────────────────────────────

    #[test]
    fn env_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"audit": {"logDir": "from-file"}}"#).unwrap();

        let env = env_from(&[
            ("WARDEN_AUDIT_DIR", "/tmp/audit"),
            ("WARDEN_LOG_LEVEL", "trace"),
            ("WARDEN_AUDIT_ENABLED", "off"),
            ("WARDEN_CONTEXT_ENABLED", "0"),
        ]);
        let settings = load_settings_with(&path, env).unwrap();
        assert_eq!(settings.audit.log_dir, "/tmp/audit");
        assert_eq!(settings.logging.level, "trace");
        assert!(!settings.audit.enabled);
        assert!(!settings.context.enabled);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut settings = WardenSettings::default();
        apply_env_overrides(
            &mut settings,
            env_from(&[
                ("WARDEN_AUDIT_ENABLED", "sometimes"),
                ("WARDEN_LOG_LEVEL", "   "),
            ]),
        );
        assert!(settings.audit.enabled);
        assert_eq!(settings.logging.level, "warn");
    }

    // ── parse_bool ──────────────────────────────────────────────────

    #[test]
    fn parse_bool_true_variants() {
        for val in &["true", "1", "yes", "on", "TRUE", "Yes", "ON", " on "] {
            assert_eq!(parse_bool(val), Some(true), "failed for {val}");
        }
    }

    #[test]
    fn parse_bool_false_variants() {
        for val in &["false", "0", "no", "off", "FALSE", "No", "OFF"] {
            assert_eq!(parse_bool(val), Some(false), "failed for {val}");
        }
    }

    #[test]
    fn parse_bool_invalid() {
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("2"), None);
    }
}
