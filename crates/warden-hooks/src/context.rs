//! Project context injected into the conversation on prompt submission.

use std::path::Path;

use tracing::debug;

/// Header placed before the injected context.
pub const CONTEXT_HEADER: &str = "[Project Context]";

/// Read `path` and format it for injection.
///
/// Returns `None` when the file is missing, unreadable or blank.
pub fn load_context(path: &Path) -> Option<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(?path, error = %e, "no project context");
            return None;
        }
    };
    if content.trim().is_empty() {
        return None;
    }
    Some(format!("{CONTEXT_HEADER}\n{content}\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.md");
        std::fs::write(&path, "Use cargo nextest.").unwrap();
        assert_eq!(
            load_context(&path).as_deref(),
            Some("[Project Context]\nUse cargo nextest.\n\n")
        );
    }

    #[test]
    fn blank_file_injects_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.md");
        std::fs::write(&path, " \n\t\n").unwrap();
        assert!(load_context(&path).is_none());
    }

    #[test]
    fn missing_file_injects_nothing() {
        assert!(load_context(Path::new("/nonexistent/context.md")).is_none());
    }
}
