//! # warden-core
//!
//! Foundation utilities shared by every warden crate:
//!
//! - **Text**: UTF-8 safe truncation by bytes and by characters
//! - **Logging**: `tracing` subscriber setup for stderr or a rolling log file

#![deny(unsafe_code)]

pub mod logging;
pub mod text;
