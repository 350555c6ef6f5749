// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ad-tracker backend for Beacon.
//!
//! Persists landing-page hits and conversions per ad tracker in SQLite and
//! exposes them over a small JSON API:
//!
//! - `POST /api/ad-trackers/{id}/hit` and `POST /api/ad-trackers/{id}/conversion`
//! - tracker administration and per-tracker stats under `/api/ad-trackers`
//! - `GET /api/tracking-config` for the page's platform identifiers

pub mod db;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod state;
pub mod types;

pub use db::{create_pool, run_migrations};
pub use error::{BeaconServerError, Result};
pub use repository::{SqliteTrackerRepository, TrackerRepository};
pub use routes::create_router;
pub use state::AppState;
pub use types::{
	AdTracker, CreateTrackerRequest, HealthResponse, ListTrackersResponse, TrackerStats,
	UpdateTrackerRequest,
};
