//! # warden-hooks
//!
//! Adapter between the host's lifecycle hooks and the policy gate.
//!
//! The host runs one process per event and writes a JSON payload to stdin.
//! [`HookDispatcher::dispatch`] turns that payload into a [`HookOutcome`]:
//!
//! - [`PreToolUse`](HookEvent::PreToolUse): evaluate the gate, exit 2 with
//!   `BLOCKED: <reason>` on stderr when the call is denied
//! - [`UserPromptSubmit`](HookEvent::UserPromptSubmit): print the project
//!   context file on stdout, if configured
//! - every event: append a record to the audit trail
//!
//! ## Fail-Open
//!
//! Malformed payloads, audit write failures and panics resolve to exit 0.
//! Only an explicit rule match blocks.

#![deny(unsafe_code)]

pub mod context;
pub mod dispatcher;
pub mod errors;
pub mod records;
pub mod types;

pub use dispatcher::HookDispatcher;
pub use errors::HookError;
pub use types::{EXIT_BLOCK, EXIT_PROCEED, HookEvent, HookInput, HookOutcome};
