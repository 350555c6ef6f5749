// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for core attribution operations.

use thiserror::Error;

/// Errors produced by the core attribution types.
#[derive(Debug, Error)]
pub enum CoreError {
	/// The base URL could not be parsed as an absolute URL.
	#[error("invalid URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	/// A tracker id was not a positive integer.
	#[error("invalid tracker id: {0}")]
	InvalidTrackerId(String),

	/// A tracker platform name was not recognised.
	#[error("unknown tracker platform: {0}")]
	InvalidPlatform(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
