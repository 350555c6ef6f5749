// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Campaign attribution and ad-platform tracking SDK for Beacon.
//!
//! The [`TrackingManager`] owns everything a page needs for attribution:
//! the visit's session id, the per-platform script state machines, and the
//! recorder that reports hits and conversions to the ad-tracker backend.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use beacon::{ConversionEvent, DocumentHost, PageContext, PlatformIds, TrackerId, TrackingManager};
//!
//! # async fn example() -> beacon::Result<()> {
//! let host = Arc::new(DocumentHost::new());
//! let manager = Arc::new(
//! 	TrackingManager::builder()
//! 		.backend_url("https://example.com")
//! 		.platform_ids(PlatformIds {
//! 			google_analytics_id: "G-ABC123".to_string(),
//! 			..Default::default()
//! 		})
//! 		.host(host.clone())
//! 		.build()?,
//! );
//!
//! manager.bootstrap();
//!
//! let page = PageContext::parse("https://example.com/?utm_source=linkedin")?
//! 	.with_user_agent("Mozilla/5.0");
//! manager.record_tracker_hit(TrackerId(1), &page).await?;
//!
//! let event = ConversionEvent::new(TrackerId(1), "quote_request").with_value(250.0, "USD");
//! manager.record_conversion(&event, &page).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod bootstrap;
pub mod error;
pub mod host;
pub mod http;
pub mod manager;
pub mod page;
pub mod platform;
pub mod recorder;
pub mod session;
pub mod storage;

pub use backend::{HttpTrackerBackend, SharedTrackerBackend, TrackerBackend};
pub use bootstrap::{PlatformState, ScriptBootstrapper};
pub use error::{Result, StorageError, TrackingError};
pub use host::{DocumentHost, HostCommand, ScriptHost, ScriptTag};
pub use manager::{FanOutReport, TrackingManager, TrackingManagerBuilder, DEFAULT_CURRENCY};
pub use page::PageContext;
pub use platform::{
	platforms_from_ids, AdPlatform, FacebookPixel, GoogleTag, MicrosoftUet, PresetConversion,
	SharedAdPlatform,
};
pub use recorder::TrackerRecorder;
pub use session::{SessionStore, SESSION_STORAGE_KEY};
pub use storage::{MemorySessionStorage, SessionStorage, SharedSessionStorage, UnavailableSessionStorage};

pub use beacon_core::{
	CampaignParams, ConversionEvent, ConversionPayload, HitPayload, MessageResponse, PlatformIds,
	PlatformKind, SessionId, TrackerId,
};
