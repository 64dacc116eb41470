//! Policy gate: routes an action to the classifiers and returns a verdict.
//!
//! | kind                                    | check                          |
//! |-----------------------------------------|--------------------------------|
//! | `ShellCommand`                          | command rules on `command`     |
//! | `FileRead`                              | directory rules on `path`      |
//! | `FileWrite`, `FileEdit`, `FileBatchEdit`| directory then file rules      |
//! | `Other`                                 | none, always allowed           |
//!
//! [`PolicyGate::evaluate`] is the single fail-open point: every error from
//! [`PolicyGate::try_evaluate`], and any panic raised while classifying,
//! becomes an allow verdict.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::GuardrailError;
use crate::library::PatternLibrary;
use crate::rules::{CommandClassifier, PathClassifier};
use crate::types::{ActionDescriptor, ActionKind, RuleMatch, Verdict};

/// Stateless evaluator over a shared, immutable [`PatternLibrary`].
///
/// Cloning is cheap and clones share the library. The gate holds no mutable
/// state, so it can be used from many threads at once.
#[derive(Debug, Clone)]
pub struct PolicyGate {
    library: Arc<PatternLibrary>,
}

impl PolicyGate {
    /// Create a gate that owns `library`.
    pub fn new(library: PatternLibrary) -> Self {
        Self {
            library: Arc::new(library),
        }
    }

    /// Create a gate over an already shared library.
    pub fn from_shared(library: Arc<PatternLibrary>) -> Self {
        Self { library }
    }

    /// Create a gate over the built-in rule set.
    pub fn with_builtin_rules() -> Result<Self, GuardrailError> {
        Ok(Self::new(PatternLibrary::builtin()?))
    }

    /// The rule set this gate evaluates against.
    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Classify a shell command without going through routing.
    pub fn classify_command(&self, command: &str) -> Option<RuleMatch> {
        CommandClassifier::new(&self.library).classify(command)
    }

    /// Run the full path check (directory, then protected file).
    pub fn classify_path(&self, path: &str) -> Option<RuleMatch> {
        PathClassifier::new(&self.library).classify(path)
    }

    /// Evaluate `action`, resolving every failure to allow.
    pub fn evaluate(&self, action: &ActionDescriptor) -> Verdict {
        let verdict = fail_open(|| self.try_evaluate(action));
        debug!(
            kind = %action.kind,
            allowed = verdict.allowed(),
            reason = verdict.reason(),
            "policy evaluated"
        );
        verdict
    }

    /// Evaluate `action`, surfacing why no rule could be applied.
    ///
    /// Returns [`GuardrailError::MalformedInput`] when the field the kind
    /// needs is missing or blank, and [`GuardrailError::UnrecognizedActionKind`]
    /// for [`ActionKind::Other`].
    pub fn try_evaluate(&self, action: &ActionDescriptor) -> Result<Verdict, GuardrailError> {
        let matched = match action.kind {
            ActionKind::ShellCommand => {
                let command = required(action.command.as_deref(), "command")?;
                CommandClassifier::new(&self.library).classify(command)
            }
            ActionKind::FileRead => {
                let path = required(action.path.as_deref(), "path")?;
                PathClassifier::new(&self.library).check_directory(path)
            }
            ActionKind::FileWrite | ActionKind::FileEdit | ActionKind::FileBatchEdit => {
                let path = required(action.path.as_deref(), "path")?;
                PathClassifier::new(&self.library).classify(path)
            }
            ActionKind::Other => {
                return Err(GuardrailError::UnrecognizedActionKind {
                    kind: action.kind.to_string(),
                });
            }
        };

        if let Some(rule) = &matched {
            debug!(rule_id = %rule.rule_id, category = %rule.category, "action blocked");
        }
        Ok(Verdict::from(matched))
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, GuardrailError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(GuardrailError::MalformedInput { field }),
    }
}

/// Run `f`, turning errors and panics into an allow verdict.
fn fail_open<F>(f: F) -> Verdict
where
    F: FnOnce() -> Result<Verdict, GuardrailError>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(GuardrailError::ClassifierFault {
            message: panic_message(payload.as_ref()),
        })
    });

    match result {
        Ok(verdict) => verdict,
        Err(error) if error.is_fault() => {
            warn!(error = %error, "policy evaluation failed, allowing (fail-open)");
            Verdict::allow()
        }
        Err(error) => {
            debug!(error = %error, "no policy applies, allowing");
            Verdict::allow()
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during classification".to_string()
    }
}
