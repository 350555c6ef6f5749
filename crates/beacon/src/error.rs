// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the tracking SDK.

use beacon_core::CoreError;
use thiserror::Error;

/// Tracking SDK errors.
#[derive(Debug, Error)]
pub enum TrackingError {
	/// A backend or page URL could not be parsed.
	#[error("invalid URL: {0}")]
	InvalidUrl(String),

	/// HTTP client could not be constructed.
	#[error("failed to build HTTP client: {0}")]
	HttpClient(String),

	/// HTTP request failed before a response arrived.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Server returned an error response.
	#[error("server error ({status}): {message}")]
	ServerError { status: u16, message: String },

	/// Session storage rejected a read or write.
	#[error(transparent)]
	Storage(#[from] StorageError),

	/// A core attribution operation failed.
	#[error(transparent)]
	Core(#[from] CoreError),

	/// The manager was built without a required component.
	#[error("tracking manager is missing {0}")]
	MissingComponent(&'static str),
}

/// Errors raised by a [`crate::SessionStorage`] backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
	/// Storage is disabled or inaccessible (private browsing, quota, etc.).
	#[error("session storage unavailable: {0}")]
	Unavailable(String),
}

/// Result type alias for tracking operations.
pub type Result<T> = std::result::Result<T, TrackingError>;
