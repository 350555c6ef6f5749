// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Google tag (gtag.js) covering Google Analytics and Google Ads.

use chrono::Utc;
use serde_json::{json, Map, Value};

use beacon_core::{PlatformIds, PlatformKind};

use super::{AdPlatform, PresetConversion};
use crate::host::{HostCommand, ScriptHost, ScriptTag};

const GTAG_SRC: &str = "https://www.googletagmanager.com/gtag/js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleTag {
	analytics_id: Option<String>,
	ads_id: Option<String>,
}

impl GoogleTag {
	/// Returns `None` when both the Analytics and Ads ids are placeholders.
	pub fn from_ids(ids: &PlatformIds) -> Option<Self> {
		let analytics_id = ids.google_analytics().map(str::to_string);
		let ads_id = ids.google_ads().map(str::to_string);
		if analytics_id.is_none() && ads_id.is_none() {
			return None;
		}
		Some(Self {
			analytics_id,
			ads_id,
		})
	}

	/// The id page views are attributed to: Analytics first, Ads otherwise.
	fn primary_id(&self) -> &str {
		self
			.analytics_id
			.as_deref()
			.or(self.ads_id.as_deref())
			.unwrap_or_default()
	}

	fn gtag(host: &dyn ScriptHost, args: Vec<Value>) {
		host.execute(HostCommand::call(PlatformKind::GoogleTag.global_name(), args));
	}
}

impl AdPlatform for GoogleTag {
	fn kind(&self) -> PlatformKind {
		PlatformKind::GoogleTag
	}

	fn script(&self) -> ScriptTag {
		ScriptTag {
			platform: PlatformKind::GoogleTag,
			src: format!("{GTAG_SRC}?id={}", self.primary_id()),
			is_async: true,
		}
	}

	fn initialize(&self, host: &dyn ScriptHost) {
		Self::gtag(host, vec![json!("js"), json!(Utc::now().to_rfc3339())]);
		if let Some(analytics_id) = &self.analytics_id {
			Self::gtag(host, vec![json!("config"), json!(analytics_id)]);
		}
		if let Some(ads_id) = &self.ads_id {
			Self::gtag(host, vec![json!("config"), json!(ads_id)]);
		}
	}

	fn track_page_view(&self, host: &dyn ScriptHost, path: &str) {
		Self::gtag(
			host,
			vec![
				json!("config"),
				json!(self.primary_id()),
				json!({ "page_path": path }),
			],
		);
	}

	fn track_event(&self, host: &dyn ScriptHost, name: &str, params: &Map<String, Value>) {
		Self::gtag(
			host,
			vec![json!("event"), json!(name), Value::Object(params.clone())],
		);
	}

	fn track_preset_conversion(&self, host: &dyn ScriptHost, conversion: &PresetConversion) -> bool {
		let Some(ads_id) = &self.ads_id else {
			return false;
		};
		Self::gtag(
			host,
			vec![
				json!("event"),
				json!("conversion"),
				json!({
					"send_to": format!("{ads_id}/{}", conversion.ads_label()),
					"value": conversion.value(),
					"currency": conversion.currency(),
				}),
			],
		);
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::DocumentHost;

	fn ids(analytics: &str, ads: &str) -> PlatformIds {
		PlatformIds {
			google_analytics_id: analytics.to_string(),
			google_ads_id: ads.to_string(),
			..Default::default()
		}
	}

	#[test]
	fn placeholders_disable_google_tag() {
		assert!(GoogleTag::from_ids(&PlatformIds::default()).is_none());
	}

	#[test]
	fn script_uses_analytics_id_first() {
		let tag = GoogleTag::from_ids(&ids("G-ABC", "AW-123")).unwrap();
		assert_eq!(
			tag.script().src,
			"https://www.googletagmanager.com/gtag/js?id=G-ABC"
		);

		let ads_only = GoogleTag::from_ids(&ids("G-XXXXXXXXXX", "AW-123")).unwrap();
		assert!(ads_only.script().src.ends_with("id=AW-123"));
	}

	#[test]
	fn initialize_configures_every_live_id() {
		let host = DocumentHost::new();
		GoogleTag::from_ids(&ids("G-ABC", "AW-123"))
			.unwrap()
			.initialize(&host);

		let commands = host.commands_for("gtag");
		assert_eq!(commands.len(), 3);
		assert_eq!(commands[0].args()[0], "js");
		assert_eq!(commands[1].args(), &[json!("config"), json!("G-ABC")]);
		assert_eq!(commands[2].args(), &[json!("config"), json!("AW-123")]);
	}

	#[test]
	fn page_view_sets_page_path() {
		let host = DocumentHost::new();
		GoogleTag::from_ids(&ids("G-ABC", ""))
			.unwrap()
			.track_page_view(&host, "/portfolio");

		let args = host.commands_for("gtag")[0].args().to_vec();
		assert_eq!(args[1], "G-ABC");
		assert_eq!(args[2]["page_path"], "/portfolio");
	}

	#[test]
	fn ads_conversion_targets_label() {
		let host = DocumentHost::new();
		let sent = GoogleTag::from_ids(&ids("G-ABC", "AW-123"))
			.unwrap()
			.track_preset_conversion(
				&host,
				&PresetConversion::ContactForm {
					value: 1.0,
					currency: "USD".to_string(),
				},
			);

		assert!(sent);
		let args = host.commands_for("gtag")[0].args().to_vec();
		assert_eq!(args[1], "conversion");
		assert_eq!(args[2]["send_to"], "AW-123/contact");
		assert_eq!(args[2]["value"], 1.0);
	}

	#[test]
	fn ads_conversion_requires_ads_id() {
		let host = DocumentHost::new();
		let sent = GoogleTag::from_ids(&ids("G-ABC", "AW-XXXXXXXXXX"))
			.unwrap()
			.track_preset_conversion(
				&host,
				&PresetConversion::ContactForm {
					value: 1.0,
					currency: "USD".to_string(),
				},
			);

		assert!(!sent);
		assert!(host.commands().is_empty());
	}
}
