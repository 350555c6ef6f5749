// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the ad-tracker backend.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use beacon_core::{CoreError, ErrorResponse, TrackerId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BeaconServerError {
	#[error("Tracker not found")]
	TrackerNotFound(TrackerId),

	#[error("Tracker is not active")]
	TrackerInactive(TrackerId),

	#[error("{0}")]
	Validation(String),

	#[error("Method not allowed")]
	MethodNotAllowed,

	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("corrupt row: {0}")]
	CorruptRow(String),

	#[error(transparent)]
	Core(#[from] CoreError),
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, BeaconServerError>;

impl BeaconServerError {
	pub fn status(&self) -> StatusCode {
		match self {
			BeaconServerError::TrackerNotFound(_) | BeaconServerError::TrackerInactive(_) => {
				StatusCode::NOT_FOUND
			}
			BeaconServerError::Validation(_) | BeaconServerError::Core(_) => StatusCode::BAD_REQUEST,
			BeaconServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
			BeaconServerError::Database(_) | BeaconServerError::CorruptRow(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl IntoResponse for BeaconServerError {
	fn into_response(self) -> Response {
		let status = self.status();
		let message = if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
			"Internal server error".to_string()
		} else {
			self.to_string()
		};
		(status, Json(ErrorResponse::new(message))).into_response()
	}
}
