// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source-mapped stack traces for Loom mobile applications.
//!
//! Errors thrown by minified JavaScript bundles carry stack frames that
//! point into the generated bundle. This crate maps those frames back to
//! the original sources using the source map shipped with the app.
//!
//! # Example
//!
//! ```no_run
//! use loom_stacktrace::{AssetStorage, ScriptError, SourceMapOptions, SourceMapResolver};
//!
//! # async fn example() -> loom_stacktrace::Result<()> {
//! let resolver = SourceMapResolver::new(AssetStorage::new("/data/app/assets"));
//! resolver
//!     .init_source_maps(
//!         SourceMapOptions::new("index.android.bundle.map")
//!             .project_path("/src/")
//!             .collapse_in_line(true),
//!     )
//!     .await?;
//!
//! let error = ScriptError::new("TypeError", "undefined is not a function")
//!     .with_stack("    at render (address at index.android.bundle:1:1430)");
//! let trace = resolver.get_stack_trace(&error).await?;
//! println!("{trace}");
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod capture;
pub mod error;
pub mod loader;
pub mod parser;
pub mod pinpoint;
pub mod resolver;

pub use access::{AssetStorage, BundleResources, InMemoryAccess, PlatformAccess};
pub use capture::TraceCapture;
pub use error::{CaptureError, Result, StackTraceError};
pub use loader::load_position_mapper;
pub use parser::{parse_error, parse_stack};
pub use pinpoint::{guess_function_name, HttpScriptFetcher, ScriptFetcher};
pub use resolver::SourceMapResolver;

pub use loom_stacktrace_core::{
	load_options, BuildMode, CaptureMode, MinifiedFrame, Platform, ResolvedFrame, ScriptError,
	SourceMapOptions, StackTrace,
};
