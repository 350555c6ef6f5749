// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Microsoft Advertising Universal Event Tracking (UET).
//!
//! Unlike the other platforms the UET object cannot be created until `bat.js`
//! has loaded; until then calls accumulate in the plain `uetq` array.

use serde_json::{json, Map, Value};

use beacon_core::{PlatformIds, PlatformKind};

use super::{AdPlatform, PresetConversion};
use crate::host::{HostCommand, ScriptHost, ScriptTag};

const BAT_SRC: &str = "https://bat.bing.com/bat.js";
const CONVERSION_ACTION: &str = "conversion";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicrosoftUet {
	tag_id: String,
}

impl MicrosoftUet {
	pub fn from_ids(ids: &PlatformIds) -> Option<Self> {
		ids.microsoft_ads().map(|id| Self {
			tag_id: id.to_string(),
		})
	}

	fn push(host: &dyn ScriptHost, args: Vec<Value>) {
		host.execute(HostCommand::push(PlatformKind::MicrosoftUet.global_name(), args));
	}
}

impl AdPlatform for MicrosoftUet {
	fn kind(&self) -> PlatformKind {
		PlatformKind::MicrosoftUet
	}

	fn script(&self) -> ScriptTag {
		ScriptTag {
			platform: PlatformKind::MicrosoftUet,
			src: BAT_SRC.to_string(),
			is_async: true,
		}
	}

	fn initialize(&self, host: &dyn ScriptHost) {
		host.execute(HostCommand::Construct {
			global: PlatformKind::MicrosoftUet.global_name().to_string(),
			constructor: "UET".to_string(),
			options: json!({ "ti": self.tag_id, "enableAutoSpaTracking": true }),
		});
	}

	fn track_page_view(&self, host: &dyn ScriptHost, _path: &str) {
		Self::push(host, vec![json!("pageLoad")]);
	}

	/// Pushes `{event: name, ...params}`.
	fn track_event(&self, host: &dyn ScriptHost, name: &str, params: &Map<String, Value>) {
		let mut payload = Map::new();
		payload.insert("event".to_string(), json!(name));
		for (key, value) in params {
			payload.insert(key.clone(), value.clone());
		}
		Self::push(host, vec![Value::Object(payload)]);
	}

	/// Pushes a `conversion` goal action labelled with the preset's event name,
	/// so it never repeats the generic event's action.
	fn track_preset_conversion(&self, host: &dyn ScriptHost, conversion: &PresetConversion) -> bool {
		Self::push(
			host,
			vec![
				json!("event"),
				json!(CONVERSION_ACTION),
				json!({
					"event_category": "conversion",
					"event_label": conversion.event_name(),
					"revenue_value": conversion.value(),
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

	fn uet() -> MicrosoftUet {
		MicrosoftUet::from_ids(&PlatformIds {
			microsoft_ads_id: "187000000".to_string(),
			..Default::default()
		})
		.unwrap()
	}

	#[test]
	fn placeholder_disables_uet() {
		assert!(MicrosoftUet::from_ids(&PlatformIds::default()).is_none());
	}

	#[test]
	fn initialize_constructs_uet_object() {
		let host = DocumentHost::new();
		uet().initialize(&host);

		match &host.commands()[0] {
			HostCommand::Construct {
				global,
				constructor,
				options,
			} => {
				assert_eq!(global, "uetq");
				assert_eq!(constructor, "UET");
				assert_eq!(options["ti"], "187000000");
			}
			other => panic!("expected construct, got {other:?}"),
		}
	}

	#[test]
	fn event_is_flattened_into_push() {
		let host = DocumentHost::new();
		let mut params = Map::new();
		params.insert("value".to_string(), json!(20));
		uet().track_event(&host, "lead", &params);

		let pushed = host.commands_for("uetq")[0].args()[0].clone();
		assert_eq!(pushed, json!({"event": "lead", "value": 20}));
	}

	#[test]
	fn preset_conversion_uses_its_own_action() {
		let host = DocumentHost::new();
		let preset = PresetConversion::ContactForm {
			value: 1.0,
			currency: "USD".to_string(),
		};
		let platform = uet();
		platform.track_event(&host, preset.event_name(), &preset.params());
		assert!(platform.track_preset_conversion(&host, &preset));

		let commands = host.commands_for("uetq");
		assert_eq!(commands.len(), 2);
		let with_event_action = commands
			.iter()
			.filter(|c| {
				c.args()
					.iter()
					.any(|arg| arg == "contact_form_submission" || arg["event"] == "contact_form_submission")
			})
			.count();
		assert_eq!(with_event_action, 1);

		let goal = commands[1].args();
		assert_eq!(goal[0], "event");
		assert_eq!(goal[1], "conversion");
		assert_eq!(goal[2]["event_label"], "contact_form_submission");
		assert_eq!(goal[2]["revenue_value"], 1.0);
	}

	#[test]
	fn page_view_pushes_page_load() {
		let host = DocumentHost::new();
		uet().track_page_view(&host, "/blog");
		assert_eq!(host.commands_for("uetq")[0].args(), &[json!("pageLoad")]);
	}
}
