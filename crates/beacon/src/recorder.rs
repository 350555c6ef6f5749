// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hit and conversion recording against the ad-tracker backend.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use beacon_core::{ConversionEvent, HitPayload, MessageResponse, SessionId, TrackerId};

use crate::backend::SharedTrackerBackend;
use crate::error::Result;
use crate::page::PageContext;
use crate::session::SessionStore;

/// Sends tracker hits and conversions, tagged with the visit's session id.
///
/// Each call makes exactly one request. Failures are logged and returned;
/// nothing is retried.
pub struct TrackerRecorder {
	sessions: Arc<SessionStore>,
	backend: SharedTrackerBackend,
}

impl TrackerRecorder {
	pub fn new(sessions: Arc<SessionStore>, backend: SharedTrackerBackend) -> Self {
		Self { sessions, backend }
	}

	/// Resolves the session id for a page view.
	pub fn session_id(&self, page: &PageContext) -> SessionId {
		self.sessions.resolve(&page.campaign_params())
	}

	/// Builds the hit body for a page view, applying attribution defaults.
	pub fn build_hit_payload(&self, page: &PageContext) -> HitPayload {
		let params = page.campaign_params();
		let session_id = self.sessions.resolve(&params);
		HitPayload::new(
			&session_id,
			params.attribution(),
			page.referrer(),
			page.user_agent(),
		)
	}

	/// Records a page view against a tracker.
	#[instrument(skip(self, page), fields(tracker_id = %tracker_id))]
	pub async fn record_hit(&self, tracker_id: TrackerId, page: &PageContext) -> Result<MessageResponse> {
		let payload = self.build_hit_payload(page);
		match self.backend.send_hit(tracker_id, &payload).await {
			Ok(response) => {
				info!(session_id = %payload.session_id, source = %payload.source, "recorded tracker hit");
				Ok(response)
			}
			Err(e) => {
				warn!(error = %e, session_id = %payload.session_id, "failed to record tracker hit");
				Err(e)
			}
		}
	}

	/// Records a conversion with the backend only.
	#[instrument(skip(self, event, page), fields(tracker_id = %event.tracker_id, conversion_type = %event.conversion_type))]
	pub async fn record_conversion(
		&self,
		event: &ConversionEvent,
		page: &PageContext,
	) -> Result<MessageResponse> {
		let session_id = self.session_id(page);
		let payload = event.to_payload(&session_id);
		match self.backend.send_conversion(event.tracker_id, &payload).await {
			Ok(response) => {
				info!(session_id = %session_id, "recorded conversion");
				Ok(response)
			}
			Err(e) => {
				warn!(error = %e, session_id = %session_id, "failed to record conversion");
				Err(e)
			}
		}
	}
}
