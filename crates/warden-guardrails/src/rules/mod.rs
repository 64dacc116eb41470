//! Classifiers over the pattern library.
//!
//! Both classifiers borrow a [`PatternLibrary`](crate::library::PatternLibrary)
//! and return `Some(RuleMatch)` for the first rule that fires, or `None`.

pub mod command;
pub mod path;

pub use command::{CommandClassifier, normalize_command};
pub use path::{PathClassifier, final_component};
