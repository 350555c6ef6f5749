// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ad tracker records and API bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use beacon_core::{TrackerId, TrackerPlatform};

use crate::error::{BeaconServerError, Result};

const MAX_NAME_LENGTH: usize = 200;
const MAX_SESSION_ID_LENGTH: usize = 200;
const MAX_CONVERSION_TYPE_LENGTH: usize = 100;

/// An ad tracker: one campaign link whose visits and conversions are counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdTracker {
	pub id: TrackerId,
	pub name: String,
	pub platform: TrackerPlatform,
	pub campaign: String,
	pub target_url: Option<String>,
	pub is_active: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/ad-trackers`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrackerRequest {
	pub name: String,
	pub platform: TrackerPlatform,
	pub campaign: String,
	#[serde(default)]
	pub target_url: Option<String>,
	#[serde(default)]
	pub is_active: Option<bool>,
}

impl CreateTrackerRequest {
	pub fn validate(&self) -> Result<()> {
		validate_name(&self.name)?;
		if self.campaign.trim().is_empty() {
			return Err(BeaconServerError::Validation("campaign is required".to_string()));
		}
		Ok(())
	}
}

/// Body of `PUT /api/ad-trackers/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrackerRequest {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub platform: Option<TrackerPlatform>,
	#[serde(default)]
	pub campaign: Option<String>,
	#[serde(default)]
	pub target_url: Option<String>,
	#[serde(default)]
	pub is_active: Option<bool>,
}

impl UpdateTrackerRequest {
	pub fn validate(&self) -> Result<()> {
		if let Some(name) = &self.name {
			validate_name(name)?;
		}
		if self.campaign.as_deref().is_some_and(|c| c.trim().is_empty()) {
			return Err(BeaconServerError::Validation("campaign must not be empty".to_string()));
		}
		Ok(())
	}
}

/// Body of `GET /api/ad-trackers/{id}/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerStats {
	pub tracker_id: TrackerId,
	pub hits: i64,
	pub conversions: i64,
	/// Conversions per hit, zero when there are no hits.
	pub conversion_rate: f64,
	pub unique_sessions: i64,
}

impl TrackerStats {
	pub fn new(tracker_id: TrackerId, hits: i64, conversions: i64, unique_sessions: i64) -> Self {
		let conversion_rate = if hits > 0 {
			conversions as f64 / hits as f64
		} else {
			0.0
		};
		Self {
			tracker_id,
			hits,
			conversions,
			conversion_rate,
			unique_sessions,
		}
	}
}

/// Body of `GET /api/ad-trackers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTrackersResponse {
	pub trackers: Vec<AdTracker>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
}

fn validate_name(name: &str) -> Result<()> {
	if name.trim().is_empty() {
		return Err(BeaconServerError::Validation("name is required".to_string()));
	}
	if name.len() > MAX_NAME_LENGTH {
		return Err(BeaconServerError::Validation("name exceeds maximum length".to_string()));
	}
	Ok(())
}

pub(crate) fn validate_session_id(session_id: &str) -> Result<()> {
	if session_id.trim().is_empty() {
		return Err(BeaconServerError::Validation("sessionId is required".to_string()));
	}
	if session_id.len() > MAX_SESSION_ID_LENGTH {
		return Err(BeaconServerError::Validation(
			"sessionId exceeds maximum length".to_string(),
		));
	}
	Ok(())
}

pub(crate) fn validate_conversion_type(conversion_type: &str) -> Result<()> {
	if conversion_type.trim().is_empty() {
		return Err(BeaconServerError::Validation("conversionType is required".to_string()));
	}
	if conversion_type.len() > MAX_CONVERSION_TYPE_LENGTH {
		return Err(BeaconServerError::Validation(
			"conversionType exceeds maximum length".to_string(),
		));
	}
	Ok(())
}
