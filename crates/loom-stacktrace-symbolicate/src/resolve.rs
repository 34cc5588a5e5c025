// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turning minified frames into resolved frames.

use loom_stacktrace_core::{MinifiedFrame, OriginalPosition, ResolvedFrame, UNKNOWN_FUNCTION};
use tracing::trace;

use crate::mapper::PositionMapper;

/// Remove everything up to and including the last occurrence of `prefix`.
///
/// Sources that do not contain the prefix are returned unchanged. The last
/// occurrence is the one starting furthest right, so a self-overlapping
/// prefix consumes the tail: `"aaa"` with prefix `"aa"` yields `""`.
pub fn strip_project_path<'a>(source: &'a str, prefix: Option<&str>) -> &'a str {
	match prefix {
		Some(prefix) if !prefix.is_empty() => match source.rfind(prefix) {
			Some(idx) => &source[idx + prefix.len()..],
			None => source,
		},
		_ => source,
	}
}

/// Resolve a single minified frame through the mapper.
///
/// Frames without a generated line or column resolve like an unmapped
/// position: empty file name, `unknown` function, no coordinates.
pub fn resolve_frame(
	mapper: &PositionMapper,
	frame: &MinifiedFrame,
	project_path: Option<&str>,
) -> ResolvedFrame {
	let original = match frame.position() {
		Some((line, column)) => mapper.original_position_for(line, column),
		None => OriginalPosition::default(),
	};

	trace!(
		line = ?frame.line_number,
		column = ?frame.column_number,
		mapped = original.is_mapped(),
		"resolved frame"
	);

	let source = original.source.as_deref().unwrap_or("");
	let file_name = strip_project_path(source, project_path);
	let function_name = original
		.name
		.as_deref()
		.filter(|name| !name.is_empty())
		.unwrap_or(UNKNOWN_FUNCTION);

	ResolvedFrame::new(file_name, function_name, original.line, original.column)
}

/// Resolve every frame, preserving order.
pub fn resolve_frames(
	mapper: &PositionMapper,
	frames: &[MinifiedFrame],
	project_path: Option<&str>,
) -> Vec<ResolvedFrame> {
	frames
		.iter()
		.map(|frame| resolve_frame(mapper, frame, project_path))
		.collect()
}
