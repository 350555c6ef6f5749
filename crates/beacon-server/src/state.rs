// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use beacon_core::PlatformIds;

use crate::repository::TrackerRepository;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub repo: Arc<dyn TrackerRepository>,
	pub platforms: PlatformIds,
}

impl AppState {
	pub fn new(repo: Arc<dyn TrackerRepository>, platforms: PlatformIds) -> Self {
		Self { repo, platforms }
	}
}
