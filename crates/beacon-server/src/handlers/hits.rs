// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `POST /api/ad-trackers/{id}/hit`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use beacon_core::{HitPayload, MessageResponse};
use tracing::instrument;

use super::{active_tracker, json_body, parse_tracker_id};
use crate::error::Result;
use crate::state::AppState;
use crate::types::validate_session_id;

/// Records one landing-page visit against a tracker.
#[instrument(skip(state, headers, body), fields(tracker_id = %id))]
pub async fn record_hit(
	State(state): State<AppState>,
	Path(id): Path<String>,
	headers: HeaderMap,
	body: std::result::Result<Json<HitPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
	let tracker_id = parse_tracker_id(&id)?;
	let mut hit = json_body(body)?;
	validate_session_id(&hit.session_id)?;
	active_tracker(&state, tracker_id).await?;

	if hit.device.is_empty() {
		if let Some(agent) = headers
			.get(header::USER_AGENT)
			.and_then(|value| value.to_str().ok())
		{
			hit.device = agent.to_string();
		}
	}

	let hit_id = state.repo.insert_hit(tracker_id, &hit).await?;
	tracing::info!(
		hit_id,
		session_id = %hit.session_id,
		source = %hit.source,
		campaign = %hit.campaign,
		"Hit recorded"
	);

	Ok(Json(MessageResponse::new("Hit recorded")))
}
