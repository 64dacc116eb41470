//! Audit sinks.
//!
//! [`JsonFileSink`] keeps one pretty-printed JSON array per category under a
//! log directory. Every append reads the array, pushes the event, trims to
//! the retention bound and writes the array back. A missing, unreadable or
//! corrupt file is treated as an empty array. Writes replace the file
//! atomically; concurrent writers are last-writer-wins.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::category::{AuditCategory, RetentionPolicy};
use crate::errors::Result;
use crate::event::AuditEvent;
use crate::redact::redact_sensitive;

/// Append-only, size-bounded event store keyed by category.
pub trait AuditSink: Send + Sync {
    /// Append `event` to the sequence for `category`.
    fn append(&self, category: AuditCategory, event: AuditEvent) -> Result<()>;
}

/// File-backed sink writing `<dir>/<category file>`.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
    retention: RetentionPolicy,
    redact: bool,
}

impl JsonFileSink {
    /// Create a sink rooted at `dir` with default retention and redaction on.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            retention: RetentionPolicy::default(),
            redact: true,
        }
    }

    /// Replace the retention bounds.
    #[must_use]
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Toggle payload redaction.
    #[must_use]
    pub fn with_redaction(mut self, redact: bool) -> Self {
        self.redact = redact;
        self
    }

    /// Log directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `category`.
    pub fn path_for(&self, category: AuditCategory) -> PathBuf {
        self.dir.join(category.file_name())
    }

    /// Current contents of `category`, oldest first.
    pub fn read(&self, category: AuditCategory) -> Vec<Value> {
        read_records(&self.path_for(category))
    }
}

impl AuditSink for JsonFileSink {
    fn append(&self, category: AuditCategory, mut event: AuditEvent) -> Result<()> {
        if self.redact {
            event.payload = redact_sensitive(&event.payload);
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(category);
        let mut records = read_records(&path);
        records.push(serde_json::to_value(&event)?);
        trim_to(&mut records, self.retention.limit(category));

        write_atomic(&self.dir, &path, &serde_json::to_vec_pretty(&records)?)?;
        debug!(%category, retained = records.len(), "audit event appended");
        Ok(())
    }
}

fn read_records(path: &Path) -> Vec<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(?path, error = %e, "audit log unreadable, starting fresh");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(records) => records,
        Err(e) => {
            warn!(?path, error = %e, "audit log corrupt, starting fresh");
            Vec::new()
        }
    }
}

/// Write through a sibling temp file and rename, so readers never observe a
/// partially written array.
fn write_atomic(dir: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    let _ = tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn trim_to<T>(records: &mut Vec<T>, limit: usize) {
    if records.len() > limit {
        let excess = records.len() - limit;
        let _ = records.drain(..excess);
    }
}

/// In-process sink holding events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<HashMap<AuditCategory, Vec<AuditEvent>>>,
    retention: RetentionPolicy,
}

impl MemorySink {
    /// Create an empty sink with default retention.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sink with the given retention bounds.
    pub fn with_retention(retention: RetentionPolicy) -> Self {
        Self {
            events: Mutex::default(),
            retention,
        }
    }

    /// Snapshot of `category`, oldest first.
    pub fn events(&self, category: AuditCategory) -> Vec<AuditEvent> {
        self.events
            .lock()
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of events retained for `category`.
    pub fn len(&self, category: AuditCategory) -> usize {
        self.events.lock().get(&category).map_or(0, Vec::len)
    }

    /// Whether no category holds any event.
    pub fn is_empty(&self) -> bool {
        self.events.lock().values().all(Vec::is_empty)
    }
}

impl AuditSink for MemorySink {
    fn append(&self, category: AuditCategory, event: AuditEvent) -> Result<()> {
        let mut events = self.events.lock();
        let sequence = events.entry(category).or_default();
        sequence.push(event);
        trim_to(sequence, self.retention.limit(category));
        Ok(())
    }
}

/// Sink that discards everything. Used when auditing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AuditSink for NullSink {
    fn append(&self, _category: AuditCategory, _event: AuditEvent) -> Result<()> {
        Ok(())
    }
}
