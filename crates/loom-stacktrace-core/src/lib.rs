// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Loom source-mapped stack traces.
//!
//! This crate holds the types shared by the symbolication engine
//! (`loom-stacktrace-symbolicate`) and the mobile SDK (`loom-stacktrace`):
//!
//! - [`SourceMapOptions`]: resolver configuration, loadable from TOML and
//!   environment overrides
//! - [`Platform`], [`CaptureMode`], [`BuildMode`]: platform switches
//! - [`ScriptError`]: the error value whose stack is resolved
//! - [`MinifiedFrame`], [`OriginalPosition`], [`ResolvedFrame`]: frames before,
//!   during and after source map lookup
//! - [`StackTrace`]: the resolver output, either collapsed or per frame

pub mod error;
pub mod frame;
pub mod options;
pub mod platform;
pub mod script_error;
pub mod stacktrace;

pub use error::{ConfigError, Result};
pub use frame::{MinifiedFrame, OriginalPosition, ResolvedFrame, UNKNOWN_FUNCTION};
pub use options::{load_options, SourceMapOptions};
pub use platform::{BuildMode, CaptureMode, Platform};
pub use script_error::ScriptError;
pub use stacktrace::StackTrace;
