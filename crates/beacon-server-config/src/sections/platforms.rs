// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ad platform identifiers.
//!
//! Every id defaults to an inert placeholder, which disables that platform on
//! the site without any other configuration.

use beacon_core::PlatformIds;
use serde::Deserialize;

/// Platform identifiers layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformsConfigLayer {
	#[serde(default)]
	pub google_analytics_id: Option<String>,
	#[serde(default)]
	pub google_ads_id: Option<String>,
	#[serde(default)]
	pub facebook_pixel_id: Option<String>,
	#[serde(default)]
	pub microsoft_ads_id: Option<String>,
}

impl PlatformsConfigLayer {
	pub fn merge(&mut self, other: PlatformsConfigLayer) {
		if other.google_analytics_id.is_some() {
			self.google_analytics_id = other.google_analytics_id;
		}
		if other.google_ads_id.is_some() {
			self.google_ads_id = other.google_ads_id;
		}
		if other.facebook_pixel_id.is_some() {
			self.facebook_pixel_id = other.facebook_pixel_id;
		}
		if other.microsoft_ads_id.is_some() {
			self.microsoft_ads_id = other.microsoft_ads_id;
		}
	}

	pub fn finalize(self) -> PlatformIds {
		let defaults = PlatformIds::default();
		PlatformIds {
			google_analytics_id: self
				.google_analytics_id
				.unwrap_or(defaults.google_analytics_id),
			google_ads_id: self.google_ads_id.unwrap_or(defaults.google_ads_id),
			facebook_pixel_id: self.facebook_pixel_id.unwrap_or(defaults.facebook_pixel_id),
			microsoft_ads_id: self.microsoft_ads_id.unwrap_or(defaults.microsoft_ads_id),
		}
	}
}
