// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating resolver options.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A required option is missing or empty.
	#[error("invalid configuration: missing required option `{0}`")]
	MissingField(String),

	/// An option was present but could not be interpreted.
	#[error("invalid configuration: invalid value for {field}: {message}")]
	InvalidValue { field: String, message: String },

	/// I/O error reading a config file.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// TOML parsing error.
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
}

impl ConfigError {
	/// Create a missing field error
	pub fn missing_field(field: impl Into<String>) -> Self {
		Self::MissingField(field.into())
	}

	/// Create an invalid value error
	pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
