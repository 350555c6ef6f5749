// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{self, config, conversions, hits, trackers};
use crate::state::AppState;

/// Builds the ad-tracker API router.
///
/// Every route answers undeclared methods with `405 {error}`.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route(
			"/health",
			get(config::health_check).fallback(handlers::method_not_allowed),
		)
		.route(
			"/api/tracking-config",
			get(config::tracking_config).fallback(handlers::method_not_allowed),
		)
		// Event ingestion
		.route(
			"/api/ad-trackers/{id}/hit",
			post(hits::record_hit).fallback(handlers::method_not_allowed),
		)
		.route(
			"/api/ad-trackers/{id}/conversion",
			post(conversions::record_conversion).fallback(handlers::method_not_allowed),
		)
		// Administration
		.route(
			"/api/ad-trackers",
			get(trackers::list_trackers)
				.post(trackers::create_tracker)
				.fallback(handlers::method_not_allowed),
		)
		.route(
			"/api/ad-trackers/{id}",
			get(trackers::get_tracker)
				.put(trackers::update_tracker)
				.delete(trackers::delete_tracker)
				.fallback(handlers::method_not_allowed),
		)
		.route(
			"/api/ad-trackers/{id}/stats",
			get(trackers::tracker_stats).fallback(handlers::method_not_allowed),
		)
		.with_state(state)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use axum::body::Body;
	use axum::http::{Request, StatusCode};
	use beacon_core::PlatformIds;
	use tower::ServiceExt;

	use super::*;
	use crate::db::create_test_pool;
	use crate::repository::SqliteTrackerRepository;

	async fn app() -> Router {
		let repo = SqliteTrackerRepository::new(create_test_pool().await);
		create_router(AppState::new(Arc::new(repo), PlatformIds::default()))
	}

	#[tokio::test]
	async fn test_health_ok() {
		let response = app()
			.await
			.oneshot(Request::get("/health").body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
	}

	#[tokio::test]
	async fn test_get_on_hit_is_method_not_allowed() {
		let response = app()
			.await
			.oneshot(
				Request::get("/api/ad-trackers/1/hit")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
	}
}
