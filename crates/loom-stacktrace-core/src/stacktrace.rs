// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolver output.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::frame::ResolvedFrame;

/// A resolved stack trace, shaped by the `collapse_in_line` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StackTrace {
	/// Frame positions joined by newlines, innermost first
	Collapsed(String),
	/// Frame records in capture order
	Frames(Vec<ResolvedFrame>),
}

impl StackTrace {
	pub fn from_frames(frames: Vec<ResolvedFrame>, collapse: bool) -> Self {
		if collapse {
			Self::Collapsed(Self::collapse(&frames))
		} else {
			Self::Frames(frames)
		}
	}

	/// Join every frame's position with `\n`, keeping frame order.
	pub fn collapse(frames: &[ResolvedFrame]) -> String {
		frames
			.iter()
			.map(|frame| frame.position.as_str())
			.collect::<Vec<_>>()
			.join("\n")
	}

	pub fn is_collapsed(&self) -> bool {
		matches!(self, Self::Collapsed(_))
	}

	/// Frame records, if the trace was not collapsed.
	pub fn frames(&self) -> Option<&[ResolvedFrame]> {
		match self {
			Self::Frames(frames) => Some(frames),
			Self::Collapsed(_) => None,
		}
	}
}

impl fmt::Display for StackTrace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Collapsed(text) => f.write_str(text),
			Self::Frames(frames) => f.write_str(&Self::collapse(frames)),
		}
	}
}
