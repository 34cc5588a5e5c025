// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Position lookup over a parsed source map.

use sourcemap::{DecodedMap, Token};

use loom_stacktrace_core::OriginalPosition;

use crate::error::Result;

/// Maps generated positions back to original source positions.
///
/// Built once from a source map document and read-only afterwards.
pub struct PositionMapper {
	map: DecodedMap,
}

impl PositionMapper {
	/// Parse a source map from JSON bytes.
	pub fn from_slice(data: &[u8]) -> Result<Self> {
		let map = sourcemap::decode_slice(data)?;
		Ok(Self { map })
	}

	/// Parse a source map from a JSON string.
	#[allow(clippy::should_implement_trait)]
	pub fn from_str(data: &str) -> Result<Self> {
		Self::from_slice(data.as_bytes())
	}

	/// Lookup the original position for a generated line and column.
	///
	/// Lines are 1-indexed, columns are 0-indexed, for both the generated
	/// and the original position. Only mappings on the requested generated
	/// line are considered; the closest one at or before `column` wins.
	/// Positions without a mapping return [`OriginalPosition::default`].
	pub fn original_position_for(&self, line: u32, column: u32) -> OriginalPosition {
		let Some(line_0indexed) = line.checked_sub(1) else {
			return OriginalPosition::default();
		};

		let Some(token) = lookup_on_line(&self.map, line_0indexed, column) else {
			return OriginalPosition::default();
		};

		let Some(source) = token.get_source() else {
			return OriginalPosition::default();
		};

		OriginalPosition {
			source: Some(source.to_string()),
			name: token.get_name().map(str::to_string),
			line: Some(token.get_src_line() + 1),
			column: Some(token.get_src_col()),
		}
	}

	/// Number of original source files referenced by the map.
	pub fn source_count(&self) -> usize {
		source_count(&self.map)
	}

	/// Number of mapping segments in the map.
	pub fn token_count(&self) -> usize {
		token_count(&self.map)
	}
}

/// Closest token at or before `column` on generated line `line`, both
/// 0-indexed. Index maps are searched through the section covering the
/// position, with the position made relative to that section's offset.
fn lookup_on_line(map: &DecodedMap, line: u32, column: u32) -> Option<Token<'_>> {
	match map {
		DecodedMap::Regular(sm) => sm
			.lookup_token(line, column)
			.filter(|token| token.get_dst_line() == line),
		DecodedMap::Hermes(smh) => smh
			.lookup_token(line, column)
			.filter(|token| token.get_dst_line() == line),
		DecodedMap::Index(smi) => {
			let section = smi
				.sections()
				.filter(|section| section.get_offset() <= (line, column))
				.last()?;
			let (offset_line, offset_col) = section.get_offset();
			let column = if line == offset_line {
				column - offset_col
			} else {
				column
			};
			lookup_on_line(section.get_sourcemap()?, line - offset_line, column)
		}
	}
}

fn source_count(map: &DecodedMap) -> usize {
	match map {
		DecodedMap::Regular(sm) => sm.get_source_count() as usize,
		DecodedMap::Hermes(smh) => smh.get_source_count() as usize,
		DecodedMap::Index(smi) => smi
			.sections()
			.filter_map(|section| section.get_sourcemap())
			.map(source_count)
			.sum(),
	}
}

fn token_count(map: &DecodedMap) -> usize {
	match map {
		DecodedMap::Regular(sm) => sm.get_token_count() as usize,
		DecodedMap::Hermes(smh) => smh.get_token_count() as usize,
		DecodedMap::Index(smi) => smi
			.sections()
			.filter_map(|section| section.get_sourcemap())
			.map(token_count)
			.sum(),
	}
}

impl std::fmt::Debug for PositionMapper {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PositionMapper")
			.field("sources", &self.source_count())
			.field("tokens", &self.token_count())
			.finish()
	}
}
