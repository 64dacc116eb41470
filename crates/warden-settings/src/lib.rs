//! # warden-settings
//!
//! Layered configuration for the policy gate and its hook adapter.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`WardenSettings::default()`]
//! 2. **User file**: `~/.warden/settings.json`, or the path in
//!    `WARDEN_SETTINGS` (deep-merged over defaults)
//! 3. **Environment variables**: `WARDEN_*` overrides (highest priority)
//!
//! Unlike a long-running service, every hook invocation is a fresh process,
//! so settings are loaded once per run and passed down explicitly.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    SETTINGS_PATH_ENV, apply_env_overrides, deep_merge, load_settings, load_settings_from_path,
    load_settings_with, parse_bool, settings_path,
};
pub use types::*;
