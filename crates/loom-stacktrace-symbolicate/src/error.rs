// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for symbolication operations.

use thiserror::Error;

/// Errors that can occur during symbolication.
#[derive(Debug, Error)]
pub enum SymbolicateError {
	#[error("invalid source map: {0}")]
	InvalidSourceMap(#[from] sourcemap::Error),
}

pub type Result<T> = std::result::Result<T, SymbolicateError>;
