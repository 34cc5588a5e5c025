// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map loading through platform access.

use loom_stacktrace_core::SourceMapOptions;
use loom_stacktrace_symbolicate::PositionMapper;
use tracing::{info, instrument, warn};

use crate::access::PlatformAccess;
use crate::error::{Result, StackTraceError};

/// Locate, read and parse the configured source map.
#[instrument(
	skip(access, options),
	fields(platform = %access.platform(), bundle = %options.source_map_bundle)
)]
pub async fn load_position_mapper<A>(access: &A, options: &SourceMapOptions) -> Result<PositionMapper>
where
	A: PlatformAccess + ?Sized,
{
	let path = access.resolve_bundle_path(&options.source_map_bundle);

	if !access.exists(&path).await? {
		warn!(path = %path, mode = %options.build_mode, "source map not found");
		return Err(StackTraceError::SourceMapUnavailable {
			path,
			mode: options.build_mode,
		});
	}

	let contents = access.read_text(&path).await?;
	let mapper = PositionMapper::from_str(&contents)?;

	info!(
		path = %path,
		bytes = contents.len(),
		sources = mapper.source_count(),
		tokens = mapper.token_count(),
		"loaded source map"
	);

	Ok(mapper)
}
