// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Campaign attribution core types for Beacon.
//!
//! This crate holds the pieces shared by the tracking SDK and the ad-tracker
//! server:
//!
//! - [`CampaignParams`]: UTM parameters extracted from a page URL
//! - [`SessionId`]: the visit-scoped identifier that correlates hits and conversions
//! - [`generate_tracking_url`]: outbound campaign link construction
//! - [`HitPayload`] / [`ConversionPayload`]: the ad-tracker wire format
//! - [`PlatformIds`]: per-platform advertising identifiers and placeholder detection
//!
//! # Example
//!
//! ```
//! use beacon_core::{CampaignParams, generate_tracking_url_with_session, SessionId};
//!
//! let params = CampaignParams::default().with_source("facebook");
//! let url = generate_tracking_url_with_session(
//!     "https://example.com",
//!     &params,
//!     &SessionId::new("session_abc123defg"),
//! )
//! .unwrap();
//! assert!(url.contains("utm_source=facebook"));
//! ```

pub mod campaign;
pub mod error;
pub mod payload;
pub mod platform;
pub mod session;
pub mod tracker;
pub mod tracking_url;

pub use campaign::{
	Attribution, CampaignParams, DEFAULT_ATTRIBUTION_CAMPAIGN, DEFAULT_ATTRIBUTION_MEDIUM,
	DEFAULT_ATTRIBUTION_SOURCE, UTM_CAMPAIGN, UTM_CONTENT, UTM_ID, UTM_KEYS, UTM_MEDIUM,
	UTM_SESSION, UTM_SOURCE, UTM_TERM,
};
pub use error::{CoreError, Result};
pub use payload::{ConversionEvent, ConversionPayload, ErrorResponse, HitPayload, MessageResponse};
pub use platform::{
	is_placeholder_id, PlatformIds, PlatformKind, PublicPlatformIds, FACEBOOK_PIXEL_PLACEHOLDER,
	GOOGLE_ADS_PLACEHOLDER, GOOGLE_ANALYTICS_PLACEHOLDER, MICROSOFT_ADS_PLACEHOLDER,
};
pub use session::{SessionId, SESSION_PREFIX, SESSION_SUFFIX_LEN};
pub use tracker::{TrackerId, TrackerPlatform};
pub use tracking_url::{
	generate_tracking_url, generate_tracking_url_with_session, DEFAULT_UTM_CAMPAIGN,
	DEFAULT_UTM_ID, DEFAULT_UTM_SOURCE,
};
