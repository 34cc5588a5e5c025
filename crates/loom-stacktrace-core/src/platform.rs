// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Platform, capture mode and build mode switches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Mobile platform the application runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
	/// Source map shipped as an app-bundle resource
	Ios,
	/// Source map shipped in asset storage
	Android,
}

impl Platform {
	/// Capture mode used when extracting stack traces on this platform.
	///
	/// iOS may consult the network while pinpointing frames, Android is
	/// restricted to offline extraction.
	pub fn capture_mode(self) -> CaptureMode {
		match self {
			Self::Ios => CaptureMode::Online,
			Self::Android => CaptureMode::Offline,
		}
	}
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Ios => write!(f, "ios"),
			Self::Android => write!(f, "android"),
		}
	}
}

impl FromStr for Platform {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"ios" => Ok(Self::Ios),
			"android" => Ok(Self::Android),
			_ => Err(ConfigError::invalid_value(
				"platform",
				format!("unknown platform `{s}`, expected ios or android"),
			)),
		}
	}
}

/// How stack frames are extracted from an error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
	/// Extraction may fetch generated scripts to improve function names.
	Online,
	/// Extraction only uses the error's own stack text.
	Offline,
}

/// Build flavour of the host application.
///
/// Only affects the wording of the "source map unavailable" error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMode {
	Development,
	Production,
}

impl BuildMode {
	/// Build mode of the current compilation.
	pub fn current() -> Self {
		if cfg!(debug_assertions) {
			Self::Development
		} else {
			Self::Production
		}
	}

	pub fn is_development(self) -> bool {
		self == Self::Development
	}
}

impl Default for BuildMode {
	fn default() -> Self {
		Self::current()
	}
}

impl fmt::Display for BuildMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Development => write!(f, "development"),
			Self::Production => write!(f, "production"),
		}
	}
}

impl FromStr for BuildMode {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"development" | "dev" => Ok(Self::Development),
			"production" | "prod" => Ok(Self::Production),
			_ => Err(ConfigError::invalid_value(
				"build_mode",
				format!("unknown build mode `{s}`, expected development or production"),
			)),
		}
	}
}
