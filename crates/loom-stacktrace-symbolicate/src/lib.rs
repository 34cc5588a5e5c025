// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map position lookup for Loom stack traces.
//!
//! This crate provides:
//! - [`PositionMapper`]: minified `(line, column)` to original position lookup
//!   over a parsed source map (regular, indexed or Hermes)
//! - [`resolve_frame`] / [`resolve_frames`]: turning minified frames into
//!   [`ResolvedFrame`](loom_stacktrace_core::ResolvedFrame) records
//!
//! # Example
//!
//! ```
//! use loom_stacktrace_core::MinifiedFrame;
//! use loom_stacktrace_symbolicate::{resolve_frame, PositionMapper};
//!
//! let mapper = PositionMapper::from_str(r#"{
//!     "version": 3,
//!     "sources": ["/home/dev/app/src/app.js"],
//!     "names": ["main"],
//!     "mappings": "UAyCIA"
//! }"#).unwrap();
//!
//! let frame = resolve_frame(&mapper, &MinifiedFrame::at(1, 10), Some("/src/"));
//! assert_eq!(frame.position, "main@app.js:42:4");
//! ```

pub mod error;
pub mod mapper;
pub mod resolve;

pub use error::{Result, SymbolicateError};
pub use mapper::PositionMapper;
pub use resolve::{resolve_frame, resolve_frames, strip_project_path};
