// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Facebook (Meta) Pixel.

use serde_json::{json, Map, Value};

use beacon_core::{PlatformIds, PlatformKind};

use super::{AdPlatform, PresetConversion};
use crate::host::{HostCommand, ScriptHost, ScriptTag};

const FBEVENTS_SRC: &str = "https://connect.facebook.net/en_US/fbevents.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookPixel {
	pixel_id: String,
}

impl FacebookPixel {
	pub fn from_ids(ids: &PlatformIds) -> Option<Self> {
		ids.facebook_pixel().map(|id| Self {
			pixel_id: id.to_string(),
		})
	}

	fn fbq(host: &dyn ScriptHost, args: Vec<Value>) {
		host.execute(HostCommand::call(PlatformKind::FacebookPixel.global_name(), args));
	}
}

impl AdPlatform for FacebookPixel {
	fn kind(&self) -> PlatformKind {
		PlatformKind::FacebookPixel
	}

	fn script(&self) -> ScriptTag {
		ScriptTag {
			platform: PlatformKind::FacebookPixel,
			src: FBEVENTS_SRC.to_string(),
			is_async: true,
		}
	}

	fn initialize(&self, host: &dyn ScriptHost) {
		Self::fbq(host, vec![json!("init"), json!(self.pixel_id)]);
	}

	fn track_page_view(&self, host: &dyn ScriptHost, _path: &str) {
		Self::fbq(host, vec![json!("track"), json!("PageView")]);
	}

	fn track_event(&self, host: &dyn ScriptHost, name: &str, params: &Map<String, Value>) {
		Self::fbq(
			host,
			vec![json!("track"), json!(name), Value::Object(params.clone())],
		);
	}

	/// Reports the conversion as a standard `Lead` event.
	fn track_preset_conversion(&self, host: &dyn ScriptHost, conversion: &PresetConversion) -> bool {
		let mut params = Map::new();
		params.insert("content_name".to_string(), json!(conversion.event_name()));
		params.insert("value".to_string(), json!(conversion.value()));
		params.insert("currency".to_string(), json!(conversion.currency()));
		Self::fbq(host, vec![json!("track"), json!("Lead"), Value::Object(params)]);
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::DocumentHost;

	fn pixel() -> FacebookPixel {
		FacebookPixel::from_ids(&PlatformIds {
			facebook_pixel_id: "123456789012345".to_string(),
			..Default::default()
		})
		.unwrap()
	}

	#[test]
	fn placeholder_disables_pixel() {
		assert!(FacebookPixel::from_ids(&PlatformIds::default()).is_none());
	}

	#[test]
	fn initialize_inits_pixel_id() {
		let host = DocumentHost::new();
		pixel().initialize(&host);
		assert_eq!(
			host.commands_for("fbq")[0].args(),
			&[json!("init"), json!("123456789012345")]
		);
	}

	#[test]
	fn events_are_tracked_with_params() {
		let host = DocumentHost::new();
		let mut params = Map::new();
		params.insert("form".to_string(), json!("quote"));
		pixel().track_event(&host, "lead", &params);

		let args = host.commands_for("fbq")[0].args().to_vec();
		assert_eq!(args[0], "track");
		assert_eq!(args[1], "lead");
		assert_eq!(args[2]["form"], "quote");
	}

	#[test]
	fn preset_conversion_is_a_lead() {
		let host = DocumentHost::new();
		assert!(pixel().track_preset_conversion(
			&host,
			&PresetConversion::ContactForm {
				value: 5.0,
				currency: "EUR".to_string(),
			},
		));
		let args = host.commands_for("fbq")[0].args().to_vec();
		assert_eq!(args[1], "Lead");
		assert_eq!(args[2]["currency"], "EUR");
		assert_eq!(args[2]["content_name"], "contact_form_submission");
	}
}
