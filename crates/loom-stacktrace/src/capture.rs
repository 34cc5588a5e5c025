// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Frame capture in online or offline mode.

use std::fmt;
use std::sync::Arc;

use loom_stacktrace_core::{CaptureMode, MinifiedFrame, ScriptError};

use crate::error::CaptureError;
use crate::parser::parse_error;
use crate::pinpoint::{pinpoint_frames, ScriptFetcher};

/// Extracts minified frames from script errors.
#[derive(Clone)]
pub struct TraceCapture {
	mode: CaptureMode,
	fetcher: Option<Arc<dyn ScriptFetcher>>,
}

impl TraceCapture {
	/// Capture that only reads the error's stack text.
	pub fn offline() -> Self {
		Self {
			mode: CaptureMode::Offline,
			fetcher: None,
		}
	}

	/// Capture that may fetch scripts to fill in missing function names.
	pub fn online(fetcher: Arc<dyn ScriptFetcher>) -> Self {
		Self {
			mode: CaptureMode::Online,
			fetcher: Some(fetcher),
		}
	}

	pub fn mode(&self) -> CaptureMode {
		self.mode
	}

	/// Extract the frames of `error`, innermost first.
	pub async fn capture(&self, error: &ScriptError) -> Result<Vec<MinifiedFrame>, CaptureError> {
		let frames = parse_error(error)?;

		match (&self.mode, &self.fetcher) {
			(CaptureMode::Online, Some(fetcher)) => Ok(pinpoint_frames(fetcher.as_ref(), frames).await),
			_ => Ok(frames),
		}
	}
}

impl fmt::Debug for TraceCapture {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TraceCapture")
			.field("mode", &self.mode)
			.field("fetcher", &self.fetcher.is_some())
			.finish()
	}
}
