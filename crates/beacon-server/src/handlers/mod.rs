// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP handlers for the ad-tracker API.

pub mod config;
pub mod conversions;
pub mod hits;
pub mod trackers;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use beacon_core::TrackerId;

use crate::error::{BeaconServerError, Result};
use crate::state::AppState;

/// Parses the `{id}` path segment.
pub(crate) fn parse_tracker_id(raw: &str) -> Result<TrackerId> {
	Ok(raw.parse::<TrackerId>()?)
}

/// Unwraps a JSON body, turning extractor rejections into `400 {error}`.
pub(crate) fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
	body.map(|Json(value)| value)
		.map_err(|rejection| BeaconServerError::Validation(rejection.body_text()))
}

/// Loads a tracker that may accept events: it must exist and be active.
pub(crate) async fn active_tracker(state: &AppState, id: TrackerId) -> Result<()> {
	let tracker = state
		.repo
		.get_tracker(id)
		.await?
		.ok_or(BeaconServerError::TrackerNotFound(id))?;
	if !tracker.is_active {
		return Err(BeaconServerError::TrackerInactive(id));
	}
	Ok(())
}

/// Answers any method a route does not declare.
pub async fn method_not_allowed() -> BeaconServerError {
	BeaconServerError::MethodNotAllowed
}
