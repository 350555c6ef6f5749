// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Advertising platform integrations.
//!
//! Each platform implements [`AdPlatform`] and talks to the page only through a
//! [`ScriptHost`]. Platforms are constructed from [`PlatformIds`]; a platform
//! whose identifiers are placeholders is never constructed, so nothing is
//! injected for it and no call ever reaches it.

mod facebook;
mod google;
mod microsoft;

pub use facebook::FacebookPixel;
pub use google::GoogleTag;
pub use microsoft::MicrosoftUet;

use std::sync::Arc;

use serde_json::{Map, Value};

use beacon_core::{PlatformIds, PlatformKind};

use crate::host::{ScriptHost, ScriptTag};

/// A client-side advertising SDK.
pub trait AdPlatform: Send + Sync {
	fn kind(&self) -> PlatformKind;

	/// The loader script injected on first bootstrap.
	fn script(&self) -> ScriptTag;

	/// Runs once the loader script has finished loading.
	fn initialize(&self, host: &dyn ScriptHost);

	fn track_page_view(&self, host: &dyn ScriptHost, path: &str);

	fn track_event(&self, host: &dyn ScriptHost, name: &str, params: &Map<String, Value>);

	/// Emits the platform's own conversion for a pre-configured conversion.
	///
	/// Returns true if anything was sent. The default sends nothing.
	fn track_preset_conversion(&self, _host: &dyn ScriptHost, _conversion: &PresetConversion) -> bool {
		false
	}
}

/// Type alias for a shared platform.
pub type SharedAdPlatform = Arc<dyn AdPlatform>;

/// Builds the platforms whose identifiers are real, in a fixed order.
pub fn platforms_from_ids(ids: &PlatformIds) -> Vec<SharedAdPlatform> {
	let mut platforms: Vec<SharedAdPlatform> = Vec::new();
	if let Some(google) = GoogleTag::from_ids(ids) {
		platforms.push(Arc::new(google));
	}
	if let Some(facebook) = FacebookPixel::from_ids(ids) {
		platforms.push(Arc::new(facebook));
	}
	if let Some(microsoft) = MicrosoftUet::from_ids(ids) {
		platforms.push(Arc::new(microsoft));
	}
	platforms
}

/// Conversions with platform-specific reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum PresetConversion {
	ContactForm {
		value: f64,
		currency: String,
	},
	ServiceRequest {
		service_id: String,
		value: f64,
		currency: String,
	},
}

impl PresetConversion {
	/// Generic event name fanned out to every platform.
	pub fn event_name(&self) -> &'static str {
		match self {
			PresetConversion::ContactForm { .. } => "contact_form_submission",
			PresetConversion::ServiceRequest { .. } => "service_request",
		}
	}

	/// Conversion label appended to the Google Ads id in `send_to`.
	pub fn ads_label(&self) -> &'static str {
		match self {
			PresetConversion::ContactForm { .. } => "contact",
			PresetConversion::ServiceRequest { .. } => "service_request",
		}
	}

	pub fn value(&self) -> f64 {
		match self {
			PresetConversion::ContactForm { value, .. }
			| PresetConversion::ServiceRequest { value, .. } => *value,
		}
	}

	pub fn currency(&self) -> &str {
		match self {
			PresetConversion::ContactForm { currency, .. }
			| PresetConversion::ServiceRequest { currency, .. } => currency,
		}
	}

	/// Parameters of the generic event.
	pub fn params(&self) -> Map<String, Value> {
		let mut params = Map::new();
		if let PresetConversion::ServiceRequest { service_id, .. } = self {
			params.insert("service_id".to_string(), Value::from(service_id.clone()));
		}
		params.insert("value".to_string(), Value::from(self.value()));
		params.insert("currency".to_string(), Value::from(self.currency()));
		params
	}
}
