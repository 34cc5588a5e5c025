// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolve a captured stack against a source map on disk.
//!
//! ```text
//! LOOM_SOURCEMAP_BUNDLE=index.android.bundle.map \
//!     cargo run -p loom-stacktrace --example resolve -- android ./assets stack.txt
//! ```
//!
//! Options come from `loom-stacktrace.toml` in the working directory when
//! present, overridden by `LOOM_SOURCEMAP_*` environment variables.

use std::path::{Path, PathBuf};

use loom_stacktrace::{
	load_options, AssetStorage, BundleResources, Platform, ScriptError, SourceMapResolver,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CONFIG_FILE: &str = "loom-stacktrace.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "loom_stacktrace=debug".into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let mut args = std::env::args().skip(1);
	let platform: Platform = args.next().unwrap_or_else(|| "android".to_string()).parse()?;
	let root = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
	let stack = match args.next() {
		Some(path) => std::fs::read_to_string(path)?,
		None => anyhow::bail!("usage: resolve <ios|android> <bundle-root> <stack-file>"),
	};

	let config = Path::new(CONFIG_FILE);
	let options = load_options(config.exists().then_some(config))?;
	let error = ScriptError::new("Error", "captured stack").with_stack(stack);

	let trace = match platform {
		Platform::Ios => {
			let resolver = SourceMapResolver::with_options(BundleResources::new(root)?, options).await?;
			resolver.get_stack_trace(&error).await?
		}
		Platform::Android => {
			let resolver = SourceMapResolver::with_options(AssetStorage::new(root), options).await?;
			resolver.get_stack_trace(&error).await?
		}
	};

	println!("{trace}");
	Ok(())
}
