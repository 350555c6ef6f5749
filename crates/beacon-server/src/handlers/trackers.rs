// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ad tracker administration.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use beacon_core::MessageResponse;
use tracing::instrument;

use super::{json_body, parse_tracker_id};
use crate::error::{BeaconServerError, Result};
use crate::state::AppState;
use crate::types::{
	AdTracker, CreateTrackerRequest, ListTrackersResponse, TrackerStats, UpdateTrackerRequest,
};

/// GET /api/ad-trackers
pub async fn list_trackers(State(state): State<AppState>) -> Result<Json<ListTrackersResponse>> {
	let trackers = state.repo.list_trackers().await?;
	Ok(Json(ListTrackersResponse { trackers }))
}

/// POST /api/ad-trackers
#[instrument(skip(state, body))]
pub async fn create_tracker(
	State(state): State<AppState>,
	body: std::result::Result<Json<CreateTrackerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AdTracker>)> {
	let request = json_body(body)?;
	request.validate()?;

	let tracker = state.repo.create_tracker(&request).await?;
	tracing::info!(tracker_id = %tracker.id, platform = %tracker.platform, "Tracker created");

	Ok((StatusCode::CREATED, Json(tracker)))
}

/// GET /api/ad-trackers/{id}
pub async fn get_tracker(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<AdTracker>> {
	let id = parse_tracker_id(&id)?;
	state
		.repo
		.get_tracker(id)
		.await?
		.map(Json)
		.ok_or(BeaconServerError::TrackerNotFound(id))
}

/// PUT /api/ad-trackers/{id}
#[instrument(skip(state, body), fields(tracker_id = %id))]
pub async fn update_tracker(
	State(state): State<AppState>,
	Path(id): Path<String>,
	body: std::result::Result<Json<UpdateTrackerRequest>, JsonRejection>,
) -> Result<Json<AdTracker>> {
	let id = parse_tracker_id(&id)?;
	let request = json_body(body)?;
	request.validate()?;

	state
		.repo
		.update_tracker(id, request)
		.await?
		.map(Json)
		.ok_or(BeaconServerError::TrackerNotFound(id))
}

/// DELETE /api/ad-trackers/{id}
#[instrument(skip(state), fields(tracker_id = %id))]
pub async fn delete_tracker(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
	let id = parse_tracker_id(&id)?;
	if !state.repo.delete_tracker(id).await? {
		return Err(BeaconServerError::TrackerNotFound(id));
	}
	tracing::info!(tracker_id = %id, "Tracker deleted");
	Ok(Json(MessageResponse::new("Tracker deleted")))
}

/// GET /api/ad-trackers/{id}/stats
pub async fn tracker_stats(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<TrackerStats>> {
	let id = parse_tracker_id(&id)?;
	if state.repo.get_tracker(id).await?.is_none() {
		return Err(BeaconServerError::TrackerNotFound(id));
	}
	Ok(Json(state.repo.tracker_stats(id).await?))
}
