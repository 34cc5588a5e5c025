// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the stack trace SDK.

use loom_stacktrace_core::{BuildMode, ConfigError};
use loom_stacktrace_symbolicate::SymbolicateError;
use thiserror::Error;

/// Result type alias for stack trace operations.
pub type Result<T> = std::result::Result<T, StackTraceError>;

/// Errors that can occur while resolving stack traces.
#[derive(Debug, Error)]
pub enum StackTraceError {
	/// Options were missing a required field or could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// A stack trace was requested before `init_source_maps`.
	#[error("source maps are not initialized, call init_source_maps with options first")]
	NotInitialized,

	/// No source map exists at the resolved bundle path.
	#[error("{}", unavailable_message(.path, .mode))]
	SourceMapUnavailable {
		/// Platform-resolved location of the source map.
		path: String,
		/// Build mode the message was worded for.
		mode: BuildMode,
	},

	/// Reading the source map failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The source map could not be parsed.
	#[error(transparent)]
	Symbolicate(#[from] SymbolicateError),

	/// Frames could not be extracted from the error value.
	#[error(transparent)]
	Capture(#[from] CaptureError),

	/// The HTTP client used for online capture could not be built.
	#[error("HTTP client error: {0}")]
	Http(#[from] reqwest::Error),
}

/// Errors raised while extracting frames from an error value.
#[derive(Debug, Error)]
pub enum CaptureError {
	/// The error value carries no stack text.
	#[error("cannot parse given error object: {0}")]
	Unparseable(String),
}

fn unavailable_message(path: &str, mode: &BuildMode) -> String {
	if mode.is_development() {
		"Unable to read source maps in DEV mode".to_string()
	} else {
		format!(
			"Unable to read source maps, possibly invalid source map bundle file, please check that it exists here: {path}"
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unavailable_in_production_names_the_path() {
		let err = StackTraceError::SourceMapUnavailable {
			path: "/var/app/main.jsbundle.map".to_string(),
			mode: BuildMode::Production,
		};
		assert!(err.to_string().contains("/var/app/main.jsbundle.map"));
	}

	#[test]
	fn unavailable_in_development_is_a_fixed_hint() {
		let err = StackTraceError::SourceMapUnavailable {
			path: "/var/app/main.jsbundle.map".to_string(),
			mode: BuildMode::Development,
		};
		assert_eq!(err.to_string(), "Unable to read source maps in DEV mode");
	}

	#[test]
	fn config_errors_keep_their_message() {
		let err: StackTraceError = ConfigError::missing_field("source_map_bundle").into();
		assert!(err.to_string().contains("invalid configuration"));
	}
}
