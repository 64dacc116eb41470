//! # warden
//!
//! Hook entry point and policy check CLI.
//!
//! - `warden hook <event>` reads one hook payload from stdin and answers the
//!   host with an exit code (0 proceed, 2 block).
//! - `warden check command|path ...` evaluates a single action and prints
//!   the verdict as JSON.

#![deny(unsafe_code)]

mod setup;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use warden_guardrails::{ActionDescriptor, ActionKind};
use warden_hooks::{EXIT_BLOCK, HookEvent, HookOutcome};
use warden_settings::WardenSettings;

/// Pre-execution policy gate for coding agents.
#[derive(Parser, Debug)]
#[command(name = "warden", version, about = "Pre-execution policy gate for coding agents")]
struct Cli {
    /// Settings file (defaults to `$WARDEN_SETTINGS` or `~/.warden/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Handle one host hook invocation; the payload is read from stdin.
    Hook {
        /// Event name, e.g. `PreToolUse` or `pre-tool-use`.
        event: String,

        /// Project root for the audit directory and context file.
        #[arg(long)]
        project_dir: Option<PathBuf>,
    },
    /// Evaluate one action against the rule set.
    Check {
        #[command(subcommand)]
        target: CheckTarget,
    },
}

#[derive(Subcommand, Debug)]
enum CheckTarget {
    /// Classify a shell command.
    Command {
        /// Command line, as the agent would run it.
        command: String,
    },
    /// Classify a file access.
    Path {
        /// Kind of access.
        access: PathAccess,
        /// Target path.
        path: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PathAccess {
    Read,
    Write,
    Edit,
    MultiEdit,
}

impl From<PathAccess> for ActionKind {
    fn from(access: PathAccess) -> Self {
        match access {
            PathAccess::Read => Self::FileRead,
            PathAccess::Write => Self::FileWrite,
            PathAccess::Edit => Self::FileEdit,
            PathAccess::MultiEdit => Self::FileBatchEdit,
        }
    }
}

fn main() -> Result<ExitCode> {
    // A usage error must not look like a block (exit 2) to the host.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return Ok(if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(warden_settings::settings_path);
    let loaded = warden_settings::load_settings_from_path(&settings_path);
    let settings = loaded.as_ref().cloned().unwrap_or_default();

    match cli.command {
        Command::Hook { event, project_dir } => {
            let project_dir = project_dir.unwrap_or_else(current_dir);
            init_hook_logging(&settings, &project_dir);
            if let Err(e) = &loaded {
                tracing::warn!(path = %settings_path.display(), error = %e, "settings unusable, using defaults");
            }
            Ok(run_hook(&event, &settings, &project_dir))
        }
        Command::Check { target } => {
            warden_core::logging::init_subscriber(&settings.logging.level);
            if let Err(e) = &loaded {
                tracing::warn!(path = %settings_path.display(), error = %e, "settings unusable, using defaults");
            }
            run_check(target, &settings)
        }
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Hook logs go to a file; stderr carries only the block diagnostic.
fn init_hook_logging(settings: &WardenSettings, project_dir: &Path) {
    if !settings.logging.to_file {
        return;
    }
    let dir = settings.audit.resolve_log_dir(project_dir);
    if let Err(e) = warden_core::logging::init_file_subscriber(&settings.logging.level, &dir) {
        let _ = writeln!(io::stderr(), "warden: file logging unavailable: {e}");
    }
}

fn run_hook(event: &str, settings: &WardenSettings, project_dir: &Path) -> ExitCode {
    let event: HookEvent = match event.parse() {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring hook invocation");
            return ExitCode::SUCCESS;
        }
    };

    let dispatcher = match setup::build_dispatcher(settings, project_dir) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            tracing::warn!(error = %e, "gate unavailable, proceeding (fail-open)");
            return ExitCode::SUCCESS;
        }
    };

    let raw = io::read_to_string(io::stdin()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to read hook payload");
        String::new()
    });
    let outcome = dispatcher.dispatch(event, &raw);
    tracing::debug!(%event, exit_code = outcome.exit_code, "hook handled");
    emit(&outcome)
}

fn emit(outcome: &HookOutcome) -> ExitCode {
    if let Some(text) = &outcome.stdout {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
    if let Some(text) = &outcome.stderr {
        let _ = writeln!(io::stderr(), "{text}");
    }
    exit_code(outcome.exit_code)
}

fn exit_code(code: i32) -> ExitCode {
    if code == EXIT_BLOCK {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_check(target: CheckTarget, settings: &WardenSettings) -> Result<ExitCode> {
    let gate = setup::build_gate(&settings.guardrails)?;
    let action = match target {
        CheckTarget::Command { command } => ActionDescriptor::shell(command),
        CheckTarget::Path { access, path } => ActionDescriptor::file(access.into(), path),
    };
    let verdict = gate.evaluate(&action);

    let report = serde_json::json!({
        "kind": action.kind,
        "allowed": verdict.allowed(),
        "reason": verdict.reason(),
        "libraryVersion": gate.library().version(),
    });
    let rendered = serde_json::to_string_pretty(&report).context("Failed to render verdict")?;
    println!("{rendered}");

    Ok(if verdict.is_blocked() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}
