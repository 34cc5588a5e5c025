// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack frame types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Function name used when the source map has no symbol for a frame.
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// A frame extracted from a minified stack trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifiedFrame {
	/// Best-effort function name from the engine
	pub function_name: Option<String>,
	/// Generated script the frame points into
	pub file_name: Option<String>,
	/// 1-indexed
	pub line_number: Option<u32>,
	/// 0-indexed, as passed to the source map
	pub column_number: Option<u32>,
	/// Raw stack line this frame was parsed from
	pub source: Option<String>,
}

impl MinifiedFrame {
	/// Frame at a generated position with no other metadata.
	pub fn at(line_number: u32, column_number: u32) -> Self {
		Self {
			line_number: Some(line_number),
			column_number: Some(column_number),
			..Self::default()
		}
	}

	pub fn position(&self) -> Option<(u32, u32)> {
		Some((self.line_number?, self.column_number?))
	}
}

/// Original position returned by a source map lookup.
///
/// The default value (all fields `None`) is the result for positions the
/// source map does not cover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalPosition {
	/// Original source file path
	pub source: Option<String>,
	/// Original identifier name
	pub name: Option<String>,
	/// 1-indexed
	pub line: Option<u32>,
	/// 0-indexed
	pub column: Option<u32>,
}

impl OriginalPosition {
	pub fn is_mapped(&self) -> bool {
		self.source.is_some()
	}
}

/// A frame translated back to its original source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFrame {
	pub file_name: String,
	pub function_name: String,
	pub line_number: Option<u32>,
	pub column_number: Option<u32>,
	/// `function@file:line:column`
	pub position: String,
}

impl ResolvedFrame {
	pub fn new(
		file_name: impl Into<String>,
		function_name: impl Into<String>,
		line_number: Option<u32>,
		column_number: Option<u32>,
	) -> Self {
		let file_name = file_name.into();
		let function_name = function_name.into();
		let position = format!(
			"{}@{}:{}:{}",
			function_name,
			file_name,
			Coordinate(line_number),
			Coordinate(column_number)
		);

		Self {
			file_name,
			function_name,
			line_number,
			column_number,
			position,
		}
	}
}

impl fmt::Display for ResolvedFrame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.position)
	}
}

/// Renders an unknown line or column as `?`.
struct Coordinate(Option<u32>);

impl fmt::Display for Coordinate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			Some(value) => write!(f, "{value}"),
			None => f.write_str("?"),
		}
	}
}
