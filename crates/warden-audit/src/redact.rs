//! Redaction of sensitive values before they reach disk.

use serde_json::{Map, Value};
use warden_core::text::truncate_with_suffix;

/// Key fragments that mark a value as sensitive (matched case-insensitively).
const SENSITIVE_KEYS: &[&str] = &[
    "password",
    "token",
    "secret",
    "api_key",
    "apikey",
    "auth",
    "credential",
];

/// Placeholder written in place of a sensitive value.
pub const REDACTED: &str = "[REDACTED]";

/// Longest string value kept verbatim, in bytes.
const MAX_STRING_LENGTH: usize = 1000;

const TRUNCATION_SUFFIX: &str = "... [truncated]";

/// Whether `key` names a sensitive value.
pub fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    SENSITIVE_KEYS.iter().any(|s| lower.contains(s))
}

/// Copy of `value` with sensitive keys masked and long strings truncated.
///
/// Nested objects and arrays are walked recursively.
pub fn redact_sensitive(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut redacted = Map::with_capacity(map.len());
            for (key, value) in map {
                let value = if is_sensitive_key(key) {
                    Value::String(REDACTED.to_string())
                } else {
                    redact_sensitive(value)
                };
                let _ = redacted.insert(key.clone(), value);
            }
            Value::Object(redacted)
        }
        Value::Array(items) => Value::Array(items.iter().map(redact_sensitive).collect()),
        Value::String(s) if s.len() > MAX_STRING_LENGTH => Value::String(truncate_with_suffix(
            s,
            MAX_STRING_LENGTH,
            TRUNCATION_SUFFIX,
        )),
        other => other.clone(),
    }
}
