// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error values raised by the JavaScript runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An error thrown inside the JavaScript bundle, as forwarded by the host.
///
/// `stack` holds the engine's raw stack text (V8, JSC or Hermes format).
/// Without it no frames can be extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptError {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub stack: Option<String>,
}

impl ScriptError {
	pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			message: message.into(),
			stack: None,
		}
	}

	pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
		self.stack = Some(stack.into());
		self
	}
}

impl fmt::Display for ScriptError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.name.is_empty(), self.message.is_empty()) {
			(false, false) => write!(f, "{}: {}", self.name, self.message),
			(false, true) => write!(f, "{}", self.name),
			_ => write!(f, "{}", self.message),
		}
	}
}
