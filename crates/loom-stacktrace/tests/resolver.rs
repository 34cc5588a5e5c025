// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use loom_stacktrace::{
	AssetStorage, BuildMode, BundleResources, InMemoryAccess, MinifiedFrame, Platform, ResolvedFrame,
	ScriptError, SourceMapOptions, SourceMapResolver, StackTrace, StackTraceError, TraceCapture,
};
use proptest::prelude::*;

// Line 1: column 0 -> app.js 1:0 (no name), column 10 -> app.js 42:4 `main`.
const SOURCE_MAP: &str = r#"{
	"version": 3,
	"file": "main.jsbundle",
	"sources": ["/home/dev/app/src/app.js"],
	"names": ["main"],
	"mappings": "AAAA,UAyCIA"
}"#;

const BUNDLE: &str = "main.jsbundle.map";

const STACK: &str = "TypeError: undefined is not a function
    at main (index.bundle:1:10)
    at index.bundle:1:0
    at index.bundle:9:9";

fn boom() -> ScriptError {
	ScriptError::new("TypeError", "undefined is not a function").with_stack(STACK)
}

fn options() -> SourceMapOptions {
	SourceMapOptions::new(BUNDLE).project_path("/src/")
}

async fn resolver(options: SourceMapOptions) -> SourceMapResolver<InMemoryAccess> {
	let access = InMemoryAccess::new(Platform::Ios).with_bundle(BUNDLE, SOURCE_MAP);
	SourceMapResolver::with_options(access, options).await.unwrap()
}

#[tokio::test]
async fn test_stack_trace_before_init_fails() {
	let access = InMemoryAccess::new(Platform::Ios).with_bundle(BUNDLE, SOURCE_MAP);
	let resolver = SourceMapResolver::new(access);

	let err = resolver.get_stack_trace(&boom()).await.unwrap_err();
	assert!(matches!(err, StackTraceError::NotInitialized));
	assert_eq!(resolver.access().read_count(), 0);
}

#[tokio::test]
async fn test_init_without_bundle_fails() {
	let resolver = SourceMapResolver::new(InMemoryAccess::new(Platform::Ios));

	let err = resolver.init_source_maps(SourceMapOptions::default()).await.unwrap_err();
	assert!(matches!(err, StackTraceError::Config(_)));
	assert!(resolver.options().await.is_none());

	let err = resolver.get_stack_trace(&boom()).await.unwrap_err();
	assert!(matches!(err, StackTraceError::NotInitialized));
}

#[tokio::test]
async fn test_resolves_frames_in_order() {
	let resolver = resolver(options()).await;

	let trace = resolver.get_stack_trace(&boom()).await.unwrap();
	let frames = trace.frames().unwrap();

	assert_eq!(
		frames,
		&[
			ResolvedFrame::new("app.js", "main", Some(42), Some(4)),
			ResolvedFrame::new("app.js", "unknown", Some(1), Some(0)),
			ResolvedFrame::new("", "unknown", None, None),
		]
	);
	assert_eq!(frames[0].position, "main@app.js:42:4");
}

#[tokio::test]
async fn test_collapsed_trace_joins_positions() {
	let expanded = resolver(options()).await.get_stack_trace(&boom()).await.unwrap();
	let collapsed = resolver(options().collapse_in_line(true))
		.await
		.get_stack_trace(&boom())
		.await
		.unwrap();

	assert_eq!(
		collapsed,
		StackTrace::Collapsed("main@app.js:42:4\nunknown@app.js:1:0\nunknown@:?:?".to_string())
	);
	assert_eq!(collapsed.to_string(), StackTrace::collapse(expanded.frames().unwrap()));
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
	let resolver = resolver(options()).await;

	let first = resolver.get_stack_trace(&boom()).await.unwrap();
	let second = resolver.get_stack_trace(&boom()).await.unwrap();
	assert_eq!(first, second);
}

#[tokio::test]
async fn test_without_project_path_sources_are_kept() {
	let resolver = resolver(SourceMapOptions::new(BUNDLE)).await;

	let trace = resolver.get_stack_trace(&boom()).await.unwrap();
	assert_eq!(trace.frames().unwrap()[0].file_name, "/home/dev/app/src/app.js");
}

#[tokio::test]
async fn test_missing_map_in_production_names_path() {
	let resolver = SourceMapResolver::with_options(
		InMemoryAccess::new(Platform::Ios),
		options().build_mode(BuildMode::Production),
	)
	.await
	.unwrap();

	let err = resolver.get_stack_trace(&boom()).await.unwrap_err();
	assert!(matches!(err, StackTraceError::SourceMapUnavailable { .. }));
	assert!(err.to_string().contains("/MainBundle/main.jsbundle.map"));
	assert!(!resolver.is_loaded());
}

#[tokio::test]
async fn test_missing_map_in_development_is_a_hint() {
	let resolver = SourceMapResolver::with_options(
		InMemoryAccess::new(Platform::Android),
		options().build_mode(BuildMode::Development),
	)
	.await
	.unwrap();

	let err = resolver.get_stack_trace(&boom()).await.unwrap_err();
	assert_eq!(err.to_string(), "Unable to read source maps in DEV mode");
}

#[tokio::test]
async fn test_error_without_stack_fails_capture() {
	let resolver = resolver(options()).await;

	let err = resolver
		.get_stack_trace(&ScriptError::new("Error", "boom"))
		.await
		.unwrap_err();
	assert!(matches!(err, StackTraceError::Capture(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_load_map_once() {
	let access = Arc::new(InMemoryAccess::new(Platform::Ios).with_bundle(BUNDLE, SOURCE_MAP));
	let resolver = Arc::new(
		SourceMapResolver::with_options(Arc::clone(&access), options())
			.await
			.unwrap(),
	);

	let handles: Vec<_> = (0..16)
		.map(|_| {
			let resolver = Arc::clone(&resolver);
			tokio::spawn(async move { resolver.get_stack_trace(&boom()).await })
		})
		.collect();

	for handle in handles {
		let trace = handle.await.unwrap().unwrap();
		assert_eq!(trace.frames().unwrap()[0].position, "main@app.js:42:4");
	}

	assert_eq!(access.read_count(), 1);
	assert!(resolver.is_loaded());
}

#[tokio::test]
async fn test_bundle_resources_read_from_disk() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join(BUNDLE), SOURCE_MAP).unwrap();

	let access = BundleResources::with_capture(dir.path(), TraceCapture::offline());
	let resolver = SourceMapResolver::with_options(access, options().collapse_in_line(true))
		.await
		.unwrap();

	let trace = resolver.get_stack_trace(&boom()).await.unwrap();
	assert!(trace.to_string().starts_with("main@app.js:42:4\n"));
}

#[tokio::test]
async fn test_asset_storage_retries_after_failed_load() {
	let dir = tempfile::tempdir().unwrap();
	let resolver = SourceMapResolver::with_options(
		AssetStorage::new(dir.path()),
		SourceMapOptions::new("index.android.bundle.map").build_mode(BuildMode::Production),
	)
	.await
	.unwrap();

	let err = resolver.get_stack_trace(&boom()).await.unwrap_err();
	assert!(err.to_string().contains("index.android.bundle.map"));

	std::fs::write(dir.path().join("index.android.bundle.map"), SOURCE_MAP).unwrap();

	let trace = resolver.get_stack_trace(&boom()).await.unwrap();
	assert_eq!(trace.frames().unwrap()[0].function_name, "main");
	assert_eq!(trace.frames().unwrap()[0].file_name, "/home/dev/app/src/app.js");
}

#[tokio::test]
async fn test_frames_serialize_with_camel_case_keys() {
	let resolver = resolver(options()).await;

	let trace = resolver.get_stack_trace(&boom()).await.unwrap();
	let json = serde_json::to_value(&trace).unwrap();

	assert_eq!(json[0]["fileName"], "app.js");
	assert_eq!(json[0]["functionName"], "main");
	assert_eq!(json[0]["lineNumber"], 42);
	assert_eq!(json[0]["columnNumber"], 4);
	assert_eq!(json[0]["position"], "main@app.js:42:4");
}

proptest! {
	#[test]
	fn resolved_frames_follow_position_format(
		frames in prop::collection::vec((1u32..4, 0u32..40), 1..8),
		collapse in any::<bool>(),
	) {
		let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
		let minified: Vec<MinifiedFrame> =
			frames.iter().map(|&(line, column)| MinifiedFrame::at(line, column)).collect();

		let trace = runtime.block_on(async {
			resolver(options().collapse_in_line(collapse))
				.await
				.resolve_frames(&minified)
				.await
				.unwrap()
		});

		prop_assert_eq!(trace.is_collapsed(), collapse);
		let text = trace.to_string();
		let lines: Vec<&str> = text.split('\n').collect();
		prop_assert_eq!(lines.len(), minified.len());

		for (line, &(generated_line, column)) in lines.iter().zip(&frames) {
			let expected = match (generated_line, column) {
				(1, 0..=9) => "unknown@app.js:1:0",
				(1, _) => "main@app.js:42:4",
				_ => "unknown@:?:?",
			};
			prop_assert_eq!(*line, expected);
		}
	}
}
