// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The source map resolver.

use std::sync::Arc;

use loom_stacktrace_core::{MinifiedFrame, ScriptError, SourceMapOptions, StackTrace};
use loom_stacktrace_symbolicate::{resolve_frames, PositionMapper};
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, instrument};

use crate::access::PlatformAccess;
use crate::error::{Result, StackTraceError};
use crate::loader::load_position_mapper;

/// Resolves script errors into original-source stack traces.
///
/// Options are supplied with [`init_source_maps`](Self::init_source_maps).
/// The source map is loaded on the first resolution and reused for the
/// lifetime of the resolver; concurrent first calls share a single load.
/// A failed load is not cached and is retried by the next call.
pub struct SourceMapResolver<A> {
	access: A,
	options: RwLock<Option<Arc<SourceMapOptions>>>,
	mapper: OnceCell<PositionMapper>,
}

impl<A: PlatformAccess> SourceMapResolver<A> {
	/// Create an uninitialized resolver.
	pub fn new(access: A) -> Self {
		Self {
			access,
			options: RwLock::new(None),
			mapper: OnceCell::new(),
		}
	}

	/// Create a resolver and initialize it with `options`.
	pub async fn with_options(access: A, options: SourceMapOptions) -> Result<Self> {
		let resolver = Self::new(access);
		resolver.init_source_maps(options).await?;
		Ok(resolver)
	}

	/// Store the options used by later resolutions.
	///
	/// Calling this again replaces the options. A source map that was
	/// already loaded stays in use.
	#[instrument(skip(self, options), fields(bundle = %options.source_map_bundle))]
	pub async fn init_source_maps(&self, options: SourceMapOptions) -> Result<()> {
		options.validate()?;

		info!(
			platform = %self.access.platform(),
			collapse_in_line = options.collapse_in_line,
			project_path = ?options.project_path,
			"source maps initialized"
		);

		*self.options.write().await = Some(Arc::new(options));
		Ok(())
	}

	/// Resolve the stack of `error` against the source map.
	#[instrument(skip(self, error), fields(error.name = %error.name))]
	pub async fn get_stack_trace(&self, error: &ScriptError) -> Result<StackTrace> {
		let options = self.require_options().await?;
		let mapper = self.position_mapper(&options).await?;
		let minified = self.access.capture_trace(error).await?;

		Ok(self.build_trace(mapper, &minified, &options))
	}

	/// Resolve already-captured frames against the source map.
	pub async fn resolve_frames(&self, frames: &[MinifiedFrame]) -> Result<StackTrace> {
		let options = self.require_options().await?;
		let mapper = self.position_mapper(&options).await?;

		Ok(self.build_trace(mapper, frames, &options))
	}

	/// Options from the latest `init_source_maps` call.
	pub async fn options(&self) -> Option<Arc<SourceMapOptions>> {
		self.options.read().await.clone()
	}

	/// Whether the source map has been loaded.
	pub fn is_loaded(&self) -> bool {
		self.mapper.initialized()
	}

	pub fn access(&self) -> &A {
		&self.access
	}

	async fn require_options(&self) -> Result<Arc<SourceMapOptions>> {
		self.options
			.read()
			.await
			.clone()
			.ok_or(StackTraceError::NotInitialized)
	}

	async fn position_mapper(&self, options: &SourceMapOptions) -> Result<&PositionMapper> {
		self.mapper
			.get_or_try_init(|| load_position_mapper(&self.access, options))
			.await
	}

	fn build_trace(
		&self,
		mapper: &PositionMapper,
		frames: &[MinifiedFrame],
		options: &SourceMapOptions,
	) -> StackTrace {
		let resolved = resolve_frames(mapper, frames, options.project_prefix());
		debug!(
			frames = resolved.len(),
			collapsed = options.collapse_in_line,
			"resolved stack trace"
		);
		StackTrace::from_frames(resolved, options.collapse_in_line)
	}
}
