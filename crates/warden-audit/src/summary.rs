//! One-line tool-call summaries stored alongside audit payloads.

use serde_json::Value;
use warden_core::text::truncate_chars;

/// Maximum characters of a shell command kept in a summary.
pub const COMMAND_PREVIEW_CHARS: usize = 100;

/// Maximum characters of a file path kept in a summary.
pub const PATH_PREVIEW_CHARS: usize = 200;

/// Maximum characters of a search pattern kept in a summary.
pub const PATTERN_PREVIEW_CHARS: usize = 100;

/// Describe a tool call in one line.
///
/// - `Bash: <command>`
/// - `Read|Write|Edit|MultiEdit: <file_path>`
/// - `Grep|Glob: <pattern>`
/// - anything else: the tool name
pub fn summarize_tool_call(tool_name: &str, tool_input: &Value) -> String {
    let field = |name: &str, cap: usize| {
        let value = tool_input.get(name).and_then(Value::as_str).unwrap_or("");
        truncate_chars(value, cap).to_string()
    };

    match tool_name {
        "Bash" => format!("Bash: {}", field("command", COMMAND_PREVIEW_CHARS)),
        "Read" | "Write" | "Edit" | "MultiEdit" => {
            format!("{tool_name}: {}", field("file_path", PATH_PREVIEW_CHARS))
        }
        "Grep" | "Glob" => format!("{tool_name}: {}", field("pattern", PATTERN_PREVIEW_CHARS)),
        _ => tool_name.to_string(),
    }
}
