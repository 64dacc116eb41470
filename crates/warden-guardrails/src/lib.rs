//! # warden-guardrails
//!
//! Pre-execution policy gate for agent actions.
//!
//! - [`library::PatternLibrary`]: versioned rule set (dangerous commands,
//!   system directories, protected file names, exemption markers)
//! - [`rules::command::CommandClassifier`]: shell command matching
//! - [`rules::path::PathClassifier`]: directory and protected-file checks
//! - [`engine::PolicyGate`]: routes an [`ActionDescriptor`] to the
//!   classifiers and returns a [`Verdict`]
//!
//! ## Fail-Open
//!
//! The gate only blocks on an explicit rule match. Missing fields, unknown
//! action kinds and internal faults all resolve to "allow".

#![deny(unsafe_code)]

pub mod engine;
pub mod errors;
pub mod library;
pub mod rules;
pub mod types;

pub use engine::PolicyGate;
pub use errors::GuardrailError;
pub use library::{ClassificationRule, LibraryExtensions, PatternLibrary};
pub use types::{ActionDescriptor, ActionKind, RuleCategory, RuleMatch, Verdict};
