//! Error types for the policy gate.
//!
//! The first three variants form the evaluation taxonomy. [`PolicyGate::evaluate`]
//! resolves every one of them to an allow verdict; they only surface through
//! [`PolicyGate::try_evaluate`] and in logs.
//!
//! [`PolicyGate::evaluate`]: crate::engine::PolicyGate::evaluate
//! [`PolicyGate::try_evaluate`]: crate::engine::PolicyGate::try_evaluate

use thiserror::Error;

/// Errors that can occur while building rules or evaluating an action.
#[derive(Debug, Error)]
pub enum GuardrailError {
    /// A required field of the action descriptor is missing or blank.
    #[error("malformed action: missing or empty `{field}`")]
    MalformedInput {
        /// Name of the missing field (`command` or `path`).
        field: &'static str,
    },

    /// The action kind has no routing entry.
    #[error("unrecognized action kind: {kind}")]
    UnrecognizedActionKind {
        /// Display form of the kind.
        kind: String,
    },

    /// Classification failed unexpectedly (including a caught panic).
    #[error("classifier fault: {message}")]
    ClassifierFault {
        /// Description of the fault.
        message: String,
    },

    /// Invalid rule configuration.
    #[error("invalid rule configuration: {message}")]
    InvalidRule {
        /// Description of the configuration error.
        message: String,
    },

    /// Regex compilation error.
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}

impl GuardrailError {
    /// Whether this error indicates something went wrong inside the gate,
    /// as opposed to input the gate has no policy for.
    pub fn is_fault(&self) -> bool {
        !matches!(
            self,
            Self::MalformedInput { .. } | Self::UnrecognizedActionKind { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_display() {
        let err = GuardrailError::MalformedInput { field: "command" };
        assert_eq!(err.to_string(), "malformed action: missing or empty `command`");
    }

    #[test]
    fn fault_classification() {
        assert!(!GuardrailError::MalformedInput { field: "path" }.is_fault());
        assert!(
            !GuardrailError::UnrecognizedActionKind {
                kind: "other".into()
            }
            .is_fault()
        );
        assert!(
            GuardrailError::ClassifierFault {
                message: "boom".into()
            }
            .is_fault()
        );
    }

    #[test]
    fn regex_error_from_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: GuardrailError = regex_err.into();
        assert!(matches!(err, GuardrailError::Regex(_)));
        assert!(err.to_string().starts_with("regex compilation error"));
    }
}
