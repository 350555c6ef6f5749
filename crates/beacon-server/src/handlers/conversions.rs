// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `POST /api/ad-trackers/{id}/conversion`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use beacon_core::{ConversionPayload, MessageResponse};
use tracing::instrument;

use super::{active_tracker, json_body, parse_tracker_id};
use crate::error::{BeaconServerError, Result};
use crate::state::AppState;
use crate::types::{validate_conversion_type, validate_session_id};

/// Records one conversion against a tracker.
#[instrument(skip(state, body), fields(tracker_id = %id))]
pub async fn record_conversion(
	State(state): State<AppState>,
	Path(id): Path<String>,
	body: std::result::Result<Json<ConversionPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
	let tracker_id = parse_tracker_id(&id)?;
	let conversion = json_body(body)?;
	validate_session_id(&conversion.session_id)?;
	validate_conversion_type(&conversion.conversion_type)?;
	if conversion.value.is_some_and(|v| !v.is_finite()) {
		return Err(BeaconServerError::Validation(
			"value must be a finite number".to_string(),
		));
	}
	active_tracker(&state, tracker_id).await?;

	let conversion_id = state.repo.insert_conversion(tracker_id, &conversion).await?;
	tracing::info!(
		conversion_id,
		session_id = %conversion.session_id,
		conversion_type = %conversion.conversion_type,
		value = ?conversion.value,
		"Conversion recorded"
	);

	Ok(Json(MessageResponse::new("Conversion recorded")))
}
