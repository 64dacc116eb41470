//! Hook error types.
//!
//! None of these reach the host: the dispatcher logs them and lets the
//! action proceed.

use thiserror::Error;

/// Errors that can occur while handling one hook invocation.
#[derive(Debug, Error)]
pub enum HookError {
    /// Stdin was not a JSON object of the expected shape.
    #[error("invalid hook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Stdin parsed as JSON but not as an object.
    #[error("hook payload must be a JSON object, got {kind}")]
    NotAnObject {
        /// JSON type that was received.
        kind: &'static str,
    },

    /// Event name not recognized.
    #[error("unknown hook event: {0}")]
    UnknownEvent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_event_display() {
        let err = HookError::UnknownEvent("PreCompact".into());
        assert_eq!(err.to_string(), "unknown hook event: PreCompact");
    }

    #[test]
    fn payload_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: HookError = json_err.into();
        assert!(matches!(err, HookError::InvalidPayload(_)));
    }
}
