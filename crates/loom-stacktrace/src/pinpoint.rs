// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Function name guessing for online capture.
//!
//! When the engine omits a function name, the generated script is fetched
//! and the lines above the failing one are scanned for a declaration.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use loom_stacktrace_core::MinifiedFrame;
use regex::Regex;
use tracing::debug;

/// How many lines above the failing line are scanned.
pub const MAX_LOOKBACK_LINES: usize = 20;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

static FUNCTION_SYNTAXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
	[
		// function name(args)
		r#"function\s+([^('"`]*?)\s*\(([^)]*)\)"#,
		// name = function / name: function
		r#"['"]?([$_A-Za-z][$_A-Za-z0-9]*)['"]?\s*[:=]\s*function\b"#,
		// name = eval(...) / name = new Function(...)
		r#"['"]?([$_A-Za-z][$_A-Za-z0-9]*)['"]?\s*[:=]\s*(?:eval|new Function)\b"#,
	]
	.iter()
	.map(|pattern| Regex::new(pattern).unwrap())
	.collect()
});

/// Source of generated script text, keyed by URL.
#[async_trait]
pub trait ScriptFetcher: Send + Sync {
	/// Fetch a script; `None` when it cannot be retrieved.
	async fn fetch(&self, url: &str) -> Option<String>;
}

/// Fetches scripts over HTTP, e.g. from the development bundler.
#[derive(Debug, Clone)]
pub struct HttpScriptFetcher {
	client: reqwest::Client,
}

impl HttpScriptFetcher {
	pub fn new() -> Result<Self, reqwest::Error> {
		Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
	}

	pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
		let client = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self { client })
	}
}

#[async_trait]
impl ScriptFetcher for HttpScriptFetcher {
	async fn fetch(&self, url: &str) -> Option<String> {
		let response = match self.client.get(url).send().await {
			Ok(response) => response,
			Err(e) => {
				debug!(url, error = %e, "script fetch failed");
				return None;
			}
		};

		if !response.status().is_success() {
			debug!(url, status = %response.status(), "script fetch rejected");
			return None;
		}

		match response.text().await {
			Ok(text) => Some(text),
			Err(e) => {
				debug!(url, error = %e, "script body unreadable");
				None
			}
		}
	}
}

/// Guess the enclosing function name for a 1-indexed line of `source`.
///
/// Scans up to [`MAX_LOOKBACK_LINES`] lines upward, accumulating them
/// with `//` comments removed, until a declaration pattern matches.
pub fn guess_function_name(source: &str, line_number: u32) -> Option<String> {
	let lines: Vec<&str> = source.split('\n').collect();
	let line_number = line_number as usize;
	let mut code = String::new();

	for offset in 0..line_number.min(MAX_LOOKBACK_LINES) {
		let Some(line) = lines.get(line_number - offset - 1) else {
			continue;
		};
		let line = match line.find("//") {
			Some(idx) => &line[..idx],
			None => line,
		};
		if line.is_empty() {
			continue;
		}

		code.insert_str(0, line);
		for syntax in FUNCTION_SYNTAXES.iter() {
			let name = syntax
				.captures(&code)
				.and_then(|caps| caps.get(1))
				.map(|m| m.as_str())
				.filter(|name| !name.is_empty());
			if let Some(name) = name {
				return Some(name.to_string());
			}
		}
	}

	None
}

/// Fill in missing function names by fetching the frames' scripts.
///
/// Only `http://` and `https://` files are fetched, each URL once.
/// Frames that already carry a name, and frames whose script cannot be
/// fetched, are returned unchanged.
pub async fn pinpoint_frames(
	fetcher: &dyn ScriptFetcher,
	mut frames: Vec<MinifiedFrame>,
) -> Vec<MinifiedFrame> {
	let urls: BTreeSet<String> = frames
		.iter()
		.filter(|frame| frame.function_name.is_none() && frame.line_number.is_some())
		.filter_map(|frame| frame.file_name.clone())
		.filter(|file| is_fetchable(file))
		.collect();

	if urls.is_empty() {
		return frames;
	}

	let fetched = join_all(urls.into_iter().map(|url| async move {
		let script = fetcher.fetch(&url).await;
		(url, script)
	}))
	.await;

	let scripts: HashMap<String, String> = fetched
		.into_iter()
		.filter_map(|(url, script)| script.map(|script| (url, script)))
		.collect();
	debug!(scripts = scripts.len(), "fetched scripts for name guessing");

	for frame in frames.iter_mut().filter(|frame| frame.function_name.is_none()) {
		let (Some(file), Some(line)) = (frame.file_name.as_deref(), frame.line_number) else {
			continue;
		};
		if let Some(source) = scripts.get(file) {
			frame.function_name = guess_function_name(source, line);
		}
	}

	frames
}

fn is_fetchable(file: &str) -> bool {
	file.starts_with("http://") || file.starts_with("https://")
}
