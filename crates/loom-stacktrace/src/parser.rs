// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack text extraction.
//!
//! Two formats are recognized:
//! - V8 style (`    at fn (file:line:col)`), also used by Hermes which
//!   prefixes bytecode locations with `address at `
//! - JavaScriptCore / Firefox style (`fn@file:line:col`)

use std::sync::LazyLock;

use loom_stacktrace_core::{MinifiedFrame, ScriptError};
use regex::Regex;

use crate::error::CaptureError;

static V8_FRAME: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?m)^\s*at .*(\S+:\d+|\(native\))").unwrap());

static NATIVE_CODE_LINE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(eval@)?(\[native code\])?$").unwrap());

static LOCATION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(.+?)(?::(\d+))?(?::(\d+))?$").unwrap());

static EVAL_WRAPPER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(\(eval at [^()]*)|(,.*$)").unwrap());

static LEADING_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.*?\s+").unwrap());

static TRAILING_LOCATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" (\(.+\)$)").unwrap());

static FUNCTION_AT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"((.*".+"[^@]*)?[^@]*)(?:@)"#).unwrap());

static NESTED_EVAL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r" line (\d+)(?: > eval line \d+)* > eval:\d+:\d+").unwrap());

const HERMES_ADDRESS_PREFIX: &str = "address at ";

/// Extract minified frames from an error's stack text.
///
/// Fails when the error carries no stack at all.
pub fn parse_error(error: &ScriptError) -> Result<Vec<MinifiedFrame>, CaptureError> {
	let stack = error
		.stack
		.as_deref()
		.filter(|stack| !stack.trim().is_empty())
		.ok_or_else(|| CaptureError::Unparseable(error.to_string()))?;

	Ok(parse_stack(stack))
}

/// Extract minified frames from raw stack text, detecting the format.
pub fn parse_stack(stack: &str) -> Vec<MinifiedFrame> {
	if V8_FRAME.is_match(stack) {
		parse_v8(stack)
	} else {
		parse_jsc(stack)
	}
}

fn parse_v8(stack: &str) -> Vec<MinifiedFrame> {
	stack
		.lines()
		.filter(|line| V8_FRAME.is_match(line))
		.map(parse_v8_line)
		.collect()
}

fn parse_v8_line(raw: &str) -> MinifiedFrame {
	let mut line = raw.to_string();
	if line.contains("(eval ") {
		line = line.replace("eval code", "eval");
		line = EVAL_WRAPPER.replace_all(&line, "").into_owned();
	}

	let sanitized = line.trim_start().replace("(eval code", "(");
	let sanitized = LEADING_TOKEN.replace(&sanitized, "").into_owned();

	let trailing = TRAILING_LOCATION
		.captures(&sanitized)
		.and_then(|caps| Some((caps.get(0)?.start(), caps.get(1)?.as_str())));

	let (function_name, location) = match trailing {
		Some((start, location)) => (Some(sanitized[..start].to_string()), location),
		None => (None, sanitized.as_str()),
	};

	let (file_name, line_number, column_number) = extract_location(location);

	MinifiedFrame {
		function_name: function_name.filter(|name| !name.is_empty()),
		file_name: file_name.filter(|file| file != "eval" && file != "<anonymous>"),
		line_number,
		column_number,
		source: Some(raw.to_string()),
	}
}

fn parse_jsc(stack: &str) -> Vec<MinifiedFrame> {
	stack
		.lines()
		.filter(|line| !NATIVE_CODE_LINE.is_match(line))
		.map(parse_jsc_line)
		.collect()
}

fn parse_jsc_line(raw: &str) -> MinifiedFrame {
	let mut line = raw.to_string();
	if line.contains(" > eval") {
		line = NESTED_EVAL.replace_all(&line, ":${1}").into_owned();
	}

	if !line.contains('@') && !line.contains(':') {
		return MinifiedFrame {
			function_name: Some(line),
			source: Some(raw.to_string()),
			..MinifiedFrame::default()
		};
	}

	let function_name = FUNCTION_AT
		.captures(&line)
		.and_then(|caps| caps.get(1))
		.map(|m| m.as_str().to_string())
		.filter(|name| !name.is_empty());
	let location = FUNCTION_AT.replace(&line, "");
	let (file_name, line_number, column_number) = extract_location(&location);

	MinifiedFrame {
		function_name,
		file_name,
		line_number,
		column_number,
		source: Some(raw.to_string()),
	}
}

/// Split `file:line:col` into its parts.
fn extract_location(location: &str) -> (Option<String>, Option<u32>, Option<u32>) {
	if !location.contains(':') {
		return (Some(location.to_string()), None, None);
	}

	let cleaned = location.replace(['(', ')'], "");
	let cleaned = cleaned.strip_prefix(HERMES_ADDRESS_PREFIX).unwrap_or(&cleaned);

	match LOCATION.captures(cleaned) {
		Some(caps) => (
			caps.get(1).map(|m| m.as_str().to_string()),
			caps.get(2).and_then(|m| m.as_str().parse().ok()),
			caps.get(3).and_then(|m| m.as_str().parse().ok()),
		),
		None => (None, None, None),
	}
}
