// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolver options and their layered loading.
//!
//! Options are resolved in this order, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. `LOOM_SOURCEMAP_*` environment variables
//!
//! The result is validated before it is handed to a resolver.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::platform::BuildMode;

pub const ENV_BUNDLE: &str = "LOOM_SOURCEMAP_BUNDLE";
pub const ENV_PROJECT_PATH: &str = "LOOM_SOURCEMAP_PROJECT_PATH";
pub const ENV_COLLAPSE_IN_LINE: &str = "LOOM_SOURCEMAP_COLLAPSE_IN_LINE";
pub const ENV_BUILD_MODE: &str = "LOOM_SOURCEMAP_BUILD_MODE";

/// Options supplied when initializing source map resolution.
///
/// Keys are snake_case; the camelCase spellings used by JavaScript hosts
/// (`sourceMapBundle`, `projectPath`, `collapseInLine`) are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMapOptions {
	/// Source map file name, e.g. `main.jsbundle.map`
	#[serde(default, alias = "sourceMapBundle")]
	pub source_map_bundle: String,
	/// Prefix removed from original source paths
	#[serde(default, alias = "projectPath")]
	pub project_path: Option<String>,
	/// Return one newline-joined string instead of frame records
	#[serde(default, alias = "collapseInLine")]
	pub collapse_in_line: bool,
	#[serde(default, alias = "buildMode")]
	pub build_mode: BuildMode,
}

impl SourceMapOptions {
	pub fn new(source_map_bundle: impl Into<String>) -> Self {
		Self {
			source_map_bundle: source_map_bundle.into(),
			..Self::default()
		}
	}

	pub fn project_path(mut self, project_path: impl Into<String>) -> Self {
		self.project_path = Some(project_path.into());
		self
	}

	pub fn collapse_in_line(mut self, collapse: bool) -> Self {
		self.collapse_in_line = collapse;
		self
	}

	pub fn build_mode(mut self, mode: BuildMode) -> Self {
		self.build_mode = mode;
		self
	}

	/// Configured project prefix; an empty prefix counts as unset.
	pub fn project_prefix(&self) -> Option<&str> {
		self.project_path.as_deref().filter(|p| !p.is_empty())
	}

	/// Check that the source map bundle is present.
	pub fn validate(&self) -> Result<()> {
		if self.source_map_bundle.trim().is_empty() {
			return Err(ConfigError::missing_field("source_map_bundle"));
		}
		Ok(())
	}

	/// Parse options from TOML text.
	pub fn from_toml_str(content: &str) -> Result<Self> {
		toml::from_str(content).map_err(|source| ConfigError::TomlParse {
			path: PathBuf::from("<string>"),
			source,
		})
	}

	/// Parse options from a TOML file.
	pub fn from_file(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)?;
		toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Apply `LOOM_SOURCEMAP_*` overrides using the given variable lookup.
	pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(bundle) = lookup(ENV_BUNDLE) {
			self.source_map_bundle = bundle;
		}
		if let Some(project_path) = lookup(ENV_PROJECT_PATH) {
			self.project_path = Some(project_path);
		}
		if let Some(collapse) = lookup(ENV_COLLAPSE_IN_LINE) {
			self.collapse_in_line = parse_bool(ENV_COLLAPSE_IN_LINE, &collapse)?;
		}
		if let Some(mode) = lookup(ENV_BUILD_MODE) {
			self.build_mode = mode.parse()?;
		}
		Ok(())
	}
}

/// Load options from defaults, an optional TOML file and the process
/// environment, then validate them.
pub fn load_options(path: Option<&Path>) -> Result<SourceMapOptions> {
	let mut options = match path {
		Some(path) => SourceMapOptions::from_file(path)?,
		None => SourceMapOptions::default(),
	};
	options.apply_env_overrides(|key| std::env::var(key).ok())?;
	options.validate()?;
	Ok(options)
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
	match value.trim().to_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		other => Err(ConfigError::invalid_value(
			field,
			format!("expected a boolean, got `{other}`"),
		)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;

	fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| map.get(key).cloned()
	}

	#[test]
	fn validate_requires_bundle() {
		let options = SourceMapOptions::default().project_path("/src/");
		assert!(matches!(
			options.validate(),
			Err(ConfigError::MissingField(field)) if field == "source_map_bundle"
		));

		let blank = SourceMapOptions::new("   ").collapse_in_line(true);
		assert!(blank.validate().is_err());

		assert!(SourceMapOptions::new("main.jsbundle.map").validate().is_ok());
	}

	#[test]
	fn empty_project_path_counts_as_unset() {
		let options = SourceMapOptions::new("main.jsbundle.map").project_path("");
		assert_eq!(options.project_prefix(), None);

		let options = SourceMapOptions::new("main.jsbundle.map").project_path("/src/");
		assert_eq!(options.project_prefix(), Some("/src/"));
	}

	#[test]
	fn parses_snake_case_toml() {
		let options = SourceMapOptions::from_toml_str(
			r#"
			source_map_bundle = "main.jsbundle.map"
			project_path = "/Users/dev/app/"
			collapse_in_line = true
			build_mode = "production"
			"#,
		)
		.unwrap();

		assert_eq!(options.source_map_bundle, "main.jsbundle.map");
		assert_eq!(options.project_path.as_deref(), Some("/Users/dev/app/"));
		assert!(options.collapse_in_line);
		assert_eq!(options.build_mode, BuildMode::Production);
	}

	#[test]
	fn accepts_camel_case_json_from_hosts() {
		let options: SourceMapOptions = serde_json::from_str(
			r#"{"sourceMapBundle": "index.android.bundle.map", "projectPath": "/src/", "collapseInLine": true}"#,
		)
		.unwrap();

		assert_eq!(options.source_map_bundle, "index.android.bundle.map");
		assert_eq!(options.project_prefix(), Some("/src/"));
		assert!(options.collapse_in_line);
	}

	#[test]
	fn missing_bundle_deserializes_then_fails_validation() {
		let options: SourceMapOptions = serde_json::from_str(r#"{"collapseInLine": true}"#).unwrap();
		assert!(options.validate().is_err());
	}

	#[test]
	fn invalid_toml_reports_parse_error() {
		let result = SourceMapOptions::from_toml_str("source_map_bundle = ");
		assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
	}

	#[test]
	fn from_file_reads_toml() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "source_map_bundle = \"main.jsbundle.map\"").unwrap();

		let options = SourceMapOptions::from_file(file.path()).unwrap();
		assert_eq!(options.source_map_bundle, "main.jsbundle.map");
		assert!(!options.collapse_in_line);
	}

	#[test]
	fn from_file_missing_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let result = SourceMapOptions::from_file(&dir.path().join("absent.toml"));
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}

	#[test]
	fn env_overrides_file_values() {
		let mut options = SourceMapOptions::new("from-file.map").project_path("/file/");
		options
			.apply_env_overrides(env(&[
				(ENV_BUNDLE, "from-env.map"),
				(ENV_COLLAPSE_IN_LINE, "yes"),
				(ENV_BUILD_MODE, "dev"),
			]))
			.unwrap();

		assert_eq!(options.source_map_bundle, "from-env.map");
		assert_eq!(options.project_path.as_deref(), Some("/file/"));
		assert!(options.collapse_in_line);
		assert_eq!(options.build_mode, BuildMode::Development);
	}

	#[test]
	fn env_rejects_bad_boolean() {
		let mut options = SourceMapOptions::new("main.jsbundle.map");
		let result = options.apply_env_overrides(env(&[(ENV_COLLAPSE_IN_LINE, "maybe")]));
		assert!(matches!(result, Err(ConfigError::InvalidValue { field, .. }) if field == ENV_COLLAPSE_IN_LINE));
	}
}
