//! Diagnostic logging settings.

use serde::{Deserialize, Serialize};

/// Diagnostic logging configuration.
///
/// Diagnostics never go to stdout or stderr during hook runs unless
/// `to_file` is off; stderr carries the block reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive (`RUST_LOG` takes precedence).
    pub level: String,
    /// Write to a daily-rolled file in the audit log directory.
    pub to_file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            to_file: true,
        }
    }
}
