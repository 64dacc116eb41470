//! The record appended to an audit sequence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One audit record: the forwarded payload, when it was logged, and an
/// optional short description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// Record as forwarded by the host.
    pub payload: Value,
    /// RFC 3339 timestamp.
    pub logged_at: String,
    /// Short derived description of the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEvent {
    /// Stamp `payload` with the current time.
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            logged_at: chrono::Utc::now().to_rfc3339(),
            summary: None,
        }
    }

    /// Attach a summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_stamps_parseable_time() {
        let event = AuditEvent::new(json!({"a": 1}));
        assert!(chrono::DateTime::parse_from_rfc3339(&event.logged_at).is_ok());
        assert!(event.summary.is_none());
    }

    #[test]
    fn serializes_camel_case_without_empty_summary() {
        let mut event = AuditEvent::new(json!({}));
        event.logged_at = "2026-01-01T00:00:00+00:00".into();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({"payload": {}, "loggedAt": "2026-01-01T00:00:00+00:00"})
        );

        let value = serde_json::to_value(event.with_summary("Bash: ls")).unwrap();
        assert_eq!(value["summary"], "Bash: ls");
    }
}
