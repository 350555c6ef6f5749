// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Advertising platform identifiers.
//!
//! Every identifier defaults to an inert placeholder. A placeholder disables
//! the platform entirely so that test traffic never reaches a live ad account.

use serde::{Deserialize, Serialize};

pub const GOOGLE_ANALYTICS_PLACEHOLDER: &str = "G-XXXXXXXXXX";
pub const GOOGLE_ADS_PLACEHOLDER: &str = "AW-XXXXXXXXXX";
pub const FACEBOOK_PIXEL_PLACEHOLDER: &str = "XXXXXXXXXXXXXXX";
pub const MICROSOFT_ADS_PLACEHOLDER: &str = "XXXXXXXXX";

/// Client-side advertising platforms the tracking layer integrates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
	GoogleTag,
	FacebookPixel,
	MicrosoftUet,
}

impl PlatformKind {
	pub const ALL: [PlatformKind; 3] = [
		PlatformKind::GoogleTag,
		PlatformKind::FacebookPixel,
		PlatformKind::MicrosoftUet,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			PlatformKind::GoogleTag => "google_tag",
			PlatformKind::FacebookPixel => "facebook_pixel",
			PlatformKind::MicrosoftUet => "microsoft_uet",
		}
	}

	/// Name of the page global the platform's script installs.
	pub fn global_name(&self) -> &'static str {
		match self {
			PlatformKind::GoogleTag => "gtag",
			PlatformKind::FacebookPixel => "fbq",
			PlatformKind::MicrosoftUet => "uetq",
		}
	}
}

impl std::fmt::Display for PlatformKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returns true for empty identifiers and the documented `X`-filled placeholders.
pub fn is_placeholder_id(id: &str) -> bool {
	let id = id.trim();
	let body = id
		.strip_prefix("AW-")
		.or_else(|| id.strip_prefix("G-"))
		.unwrap_or(id);
	body.is_empty() || body.chars().all(|c| c == 'X')
}

/// Configured identifiers for each advertising platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformIds {
	pub google_analytics_id: String,
	pub google_ads_id: String,
	pub facebook_pixel_id: String,
	pub microsoft_ads_id: String,
}

impl Default for PlatformIds {
	fn default() -> Self {
		Self {
			google_analytics_id: GOOGLE_ANALYTICS_PLACEHOLDER.to_string(),
			google_ads_id: GOOGLE_ADS_PLACEHOLDER.to_string(),
			facebook_pixel_id: FACEBOOK_PIXEL_PLACEHOLDER.to_string(),
			microsoft_ads_id: MICROSOFT_ADS_PLACEHOLDER.to_string(),
		}
	}
}

fn live(id: &str) -> Option<&str> {
	if is_placeholder_id(id) {
		None
	} else {
		Some(id.trim())
	}
}

impl PlatformIds {
	/// Google Analytics measurement id, unless it is a placeholder.
	pub fn google_analytics(&self) -> Option<&str> {
		live(&self.google_analytics_id)
	}

	/// Google Ads conversion id, unless it is a placeholder.
	pub fn google_ads(&self) -> Option<&str> {
		live(&self.google_ads_id)
	}

	pub fn facebook_pixel(&self) -> Option<&str> {
		live(&self.facebook_pixel_id)
	}

	pub fn microsoft_ads(&self) -> Option<&str> {
		live(&self.microsoft_ads_id)
	}

	/// Returns true if the given platform has at least one live identifier.
	pub fn is_enabled(&self, kind: PlatformKind) -> bool {
		match kind {
			PlatformKind::GoogleTag => self.google_analytics().is_some() || self.google_ads().is_some(),
			PlatformKind::FacebookPixel => self.facebook_pixel().is_some(),
			PlatformKind::MicrosoftUet => self.microsoft_ads().is_some(),
		}
	}

	/// Identifiers safe to publish to browsers, with placeholders as `None`.
	pub fn to_public(&self) -> PublicPlatformIds {
		PublicPlatformIds {
			google_analytics_id: self.google_analytics().map(str::to_string),
			google_ads_id: self.google_ads().map(str::to_string),
			facebook_pixel_id: self.facebook_pixel().map(str::to_string),
			microsoft_ads_id: self.microsoft_ads().map(str::to_string),
		}
	}
}

/// Body of `GET /api/tracking-config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPlatformIds {
	pub google_analytics_id: Option<String>,
	pub google_ads_id: Option<String>,
	pub facebook_pixel_id: Option<String>,
	pub microsoft_ads_id: Option<String>,
}

impl From<PublicPlatformIds> for PlatformIds {
	fn from(public: PublicPlatformIds) -> Self {
		let defaults = PlatformIds::default();
		Self {
			google_analytics_id: public
				.google_analytics_id
				.unwrap_or(defaults.google_analytics_id),
			google_ads_id: public.google_ads_id.unwrap_or(defaults.google_ads_id),
			facebook_pixel_id: public.facebook_pixel_id.unwrap_or(defaults.facebook_pixel_id),
			microsoft_ads_id: public.microsoft_ads_id.unwrap_or(defaults.microsoft_ads_id),
		}
	}
}
