// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Public tracking configuration and health.

use axum::extract::State;
use axum::Json;
use beacon_core::PublicPlatformIds;

use crate::error::Result;
use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /api/tracking-config - platform ids the page should bootstrap.
///
/// Placeholder ids are reported as `null`.
pub async fn tracking_config(State(state): State<AppState>) -> Json<PublicPlatformIds> {
	Json(state.platforms.to_public())
}

/// GET /health - succeeds once the database answers.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
	state.repo.ping().await?;
	Ok(Json(HealthResponse {
		status: "ok".to_string(),
	}))
}
