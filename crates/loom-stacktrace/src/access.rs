// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Platform access to source map files and frame capture.
//!
//! iOS ships the source map inside the application bundle and reads it
//! from the filesystem; Android ships it as an asset addressed by name.
//! Each platform also decides how frames are captured.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use loom_stacktrace_core::{MinifiedFrame, Platform, ScriptError};

use crate::capture::TraceCapture;
use crate::error::Result;
use crate::pinpoint::HttpScriptFetcher;

/// Bundle root used by [`InMemoryAccess`] for iOS paths.
pub const IN_MEMORY_BUNDLE_ROOT: &str = "/MainBundle";

/// Host capabilities needed to resolve stack traces.
#[async_trait]
pub trait PlatformAccess: Send + Sync {
	fn platform(&self) -> Platform;

	/// Turn the configured bundle name into a platform location.
	fn resolve_bundle_path(&self, bundle: &str) -> String;

	async fn exists(&self, path: &str) -> Result<bool>;

	async fn read_text(&self, path: &str) -> Result<String>;

	/// Extract minified frames from an error, innermost first.
	async fn capture_trace(&self, error: &ScriptError) -> Result<Vec<MinifiedFrame>>;
}

#[async_trait]
impl<T: PlatformAccess + ?Sized> PlatformAccess for Arc<T> {
	fn platform(&self) -> Platform {
		(**self).platform()
	}

	fn resolve_bundle_path(&self, bundle: &str) -> String {
		(**self).resolve_bundle_path(bundle)
	}

	async fn exists(&self, path: &str) -> Result<bool> {
		(**self).exists(path).await
	}

	async fn read_text(&self, path: &str) -> Result<String> {
		(**self).read_text(path).await
	}

	async fn capture_trace(&self, error: &ScriptError) -> Result<Vec<MinifiedFrame>> {
		(**self).capture_trace(error).await
	}
}

/// iOS access: files under the main application bundle, online capture.
#[derive(Debug, Clone)]
pub struct BundleResources {
	bundle_root: PathBuf,
	capture: TraceCapture,
}

impl BundleResources {
	/// Access rooted at `bundle_root`, fetching scripts over HTTP.
	pub fn new(bundle_root: impl Into<PathBuf>) -> Result<Self> {
		let fetcher = HttpScriptFetcher::new()?;
		Ok(Self::with_capture(bundle_root, TraceCapture::online(Arc::new(fetcher))))
	}

	pub fn with_capture(bundle_root: impl Into<PathBuf>, capture: TraceCapture) -> Self {
		Self {
			bundle_root: bundle_root.into(),
			capture,
		}
	}

	pub fn bundle_root(&self) -> &Path {
		&self.bundle_root
	}
}

#[async_trait]
impl PlatformAccess for BundleResources {
	fn platform(&self) -> Platform {
		Platform::Ios
	}

	fn resolve_bundle_path(&self, bundle: &str) -> String {
		self.bundle_root.join(bundle).to_string_lossy().into_owned()
	}

	async fn exists(&self, path: &str) -> Result<bool> {
		Ok(tokio::fs::try_exists(path).await?)
	}

	async fn read_text(&self, path: &str) -> Result<String> {
		Ok(tokio::fs::read_to_string(path).await?)
	}

	async fn capture_trace(&self, error: &ScriptError) -> Result<Vec<MinifiedFrame>> {
		Ok(self.capture.capture(error).await?)
	}
}

/// Android access: packaged assets addressed by name, offline capture.
#[derive(Debug, Clone)]
pub struct AssetStorage {
	asset_root: PathBuf,
	capture: TraceCapture,
}

impl AssetStorage {
	pub fn new(asset_root: impl Into<PathBuf>) -> Self {
		Self {
			asset_root: asset_root.into(),
			capture: TraceCapture::offline(),
		}
	}

	pub fn asset_root(&self) -> &Path {
		&self.asset_root
	}

	/// Location of an asset; names leaving the asset root have none.
	fn asset_path(&self, name: &str) -> Option<PathBuf> {
		let relative = Path::new(name);
		let contained = relative
			.components()
			.all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
		(contained && !name.is_empty()).then(|| self.asset_root.join(relative))
	}
}

#[async_trait]
impl PlatformAccess for AssetStorage {
	fn platform(&self) -> Platform {
		Platform::Android
	}

	fn resolve_bundle_path(&self, bundle: &str) -> String {
		bundle.to_string()
	}

	async fn exists(&self, path: &str) -> Result<bool> {
		match self.asset_path(path) {
			Some(file) => Ok(tokio::fs::try_exists(file).await?),
			None => Ok(false),
		}
	}

	async fn read_text(&self, path: &str) -> Result<String> {
		let file = self
			.asset_path(path)
			.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("asset not found: {path}")))?;
		Ok(tokio::fs::read_to_string(file).await?)
	}

	async fn capture_trace(&self, error: &ScriptError) -> Result<Vec<MinifiedFrame>> {
		Ok(self.capture.capture(error).await?)
	}
}

/// In-memory access for tests and hosts that embed the source map.
///
/// Counts reads so callers can observe how often the map is loaded.
#[derive(Debug)]
pub struct InMemoryAccess {
	platform: Platform,
	files: HashMap<String, String>,
	reads: AtomicUsize,
	capture: TraceCapture,
}

impl InMemoryAccess {
	pub fn new(platform: Platform) -> Self {
		Self {
			platform,
			files: HashMap::new(),
			reads: AtomicUsize::new(0),
			capture: TraceCapture::offline(),
		}
	}

	/// Add a file stored under its resolved path.
	pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
		self.files.insert(path.into(), contents.into());
		self
	}

	/// Add a source map under the path `bundle` resolves to.
	pub fn with_bundle(self, bundle: &str, contents: impl Into<String>) -> Self {
		let path = self.resolve_bundle_path(bundle);
		self.with_file(path, contents)
	}

	pub fn with_capture(mut self, capture: TraceCapture) -> Self {
		self.capture = capture;
		self
	}

	pub fn read_count(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl PlatformAccess for InMemoryAccess {
	fn platform(&self) -> Platform {
		self.platform
	}

	fn resolve_bundle_path(&self, bundle: &str) -> String {
		match self.platform {
			Platform::Ios => format!("{IN_MEMORY_BUNDLE_ROOT}/{bundle}"),
			Platform::Android => bundle.to_string(),
		}
	}

	async fn exists(&self, path: &str) -> Result<bool> {
		Ok(self.files.contains_key(path))
	}

	async fn read_text(&self, path: &str) -> Result<String> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		self.files.get(path).cloned().ok_or_else(|| {
			io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}")).into()
		})
	}

	async fn capture_trace(&self, error: &ScriptError) -> Result<Vec<MinifiedFrame>> {
		Ok(self.capture.capture(error).await?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::StackTraceError;

	#[test]
	fn test_bundle_path_is_joined_to_root() {
		let access = BundleResources::with_capture("/var/app/Main.app", TraceCapture::offline());
		assert_eq!(
			access.resolve_bundle_path("main.jsbundle.map"),
			"/var/app/Main.app/main.jsbundle.map"
		);
		assert_eq!(access.platform(), Platform::Ios);
	}

	#[test]
	fn test_asset_path_is_the_identifier() {
		let access = AssetStorage::new("/data/assets");
		assert_eq!(access.resolve_bundle_path("index.android.bundle.map"), "index.android.bundle.map");
		assert_eq!(access.platform(), Platform::Android);
	}

	#[test]
	fn test_asset_names_cannot_escape_root() {
		let access = AssetStorage::new("/data/assets");
		assert!(access.asset_path("maps/index.map").is_some());
		assert!(access.asset_path("../secrets").is_none());
		assert!(access.asset_path("/etc/passwd").is_none());
		assert!(access.asset_path("").is_none());
	}

	#[tokio::test]
	async fn test_escaping_asset_does_not_exist() {
		let access = AssetStorage::new("/data/assets");
		assert!(!access.exists("../index.map").await.unwrap());
		assert!(matches!(
			access.read_text("../index.map").await,
			Err(StackTraceError::Io(_))
		));
	}

	#[tokio::test]
	async fn test_in_memory_counts_reads() {
		let access = InMemoryAccess::new(Platform::Ios).with_bundle("main.jsbundle.map", "{}");

		assert!(access.exists("/MainBundle/main.jsbundle.map").await.unwrap());
		assert!(!access.exists("main.jsbundle.map").await.unwrap());
		assert_eq!(access.read_text("/MainBundle/main.jsbundle.map").await.unwrap(), "{}");
		assert!(access.read_text("missing").await.is_err());
		assert_eq!(access.read_count(), 2);
	}
}
