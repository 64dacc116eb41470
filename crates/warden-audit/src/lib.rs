//! # warden-audit
//!
//! Best-effort audit trail for agent actions and lifecycle events.
//!
//! - [`AuditSink`]: append-only, size-bounded store keyed by [`AuditCategory`]
//! - [`JsonFileSink`]: one JSON array file per category, trimmed on append
//! - [`MemorySink`] and [`NullSink`]: in-process and disabled stores
//! - [`summarize_tool_call`]: one-line description kept with tool events
//! - [`redact_sensitive`]: masks credential-looking keys before writing
//!
//! The audit trail is not a system of record. Damaged files are replaced
//! rather than reported.

#![deny(unsafe_code)]

pub mod category;
pub mod errors;
pub mod event;
pub mod redact;
pub mod sink;
pub mod summary;

pub use category::{AuditCategory, RetentionPolicy};
pub use errors::AuditError;
pub use event::AuditEvent;
pub use redact::redact_sensitive;
pub use sink::{AuditSink, JsonFileSink, MemorySink, NullSink};
pub use summary::summarize_tool_call;
