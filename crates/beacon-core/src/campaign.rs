// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! UTM campaign parameters.
//!
//! Parameters are read from a fixed allow-list of query keys. Values are taken
//! verbatim (after percent-decoding); no format validation is applied.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

pub const UTM_ID: &str = "utm_id";
pub const UTM_SOURCE: &str = "utm_source";
pub const UTM_CAMPAIGN: &str = "utm_campaign";
pub const UTM_MEDIUM: &str = "utm_medium";
pub const UTM_CONTENT: &str = "utm_content";
pub const UTM_TERM: &str = "utm_term";
pub const UTM_SESSION: &str = "utm_session";

/// Query keys recognised as campaign parameters.
pub const UTM_KEYS: [&str; 7] = [
	UTM_ID,
	UTM_SOURCE,
	UTM_CAMPAIGN,
	UTM_MEDIUM,
	UTM_CONTENT,
	UTM_TERM,
	UTM_SESSION,
];

/// Source recorded for hits that arrive without `utm_source`.
pub const DEFAULT_ATTRIBUTION_SOURCE: &str = "direct";
/// Campaign recorded for hits that arrive without `utm_campaign`.
pub const DEFAULT_ATTRIBUTION_CAMPAIGN: &str = "unknown";
/// Medium recorded for hits that arrive without `utm_medium`.
pub const DEFAULT_ATTRIBUTION_MEDIUM: &str = "website";

/// Campaign parameters present on a URL.
///
/// Absent keys are `None`. Once extracted the parameters are treated as
/// read-only; defaults are layered on top through [`CampaignParams::attribution`]
/// or the tracking URL builder, never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignParams {
	#[serde(rename = "utm_id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(rename = "utm_source", default, skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
	#[serde(rename = "utm_campaign", default, skip_serializing_if = "Option::is_none")]
	pub campaign: Option<String>,
	#[serde(rename = "utm_medium", default, skip_serializing_if = "Option::is_none")]
	pub medium: Option<String>,
	#[serde(rename = "utm_content", default, skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	#[serde(rename = "utm_term", default, skip_serializing_if = "Option::is_none")]
	pub term: Option<String>,
	#[serde(rename = "utm_session", default, skip_serializing_if = "Option::is_none")]
	pub session: Option<String>,
}

impl CampaignParams {
	/// Extracts campaign parameters from a parsed URL.
	pub fn from_url(url: &Url) -> Self {
		Self::from_pairs(url.query_pairs())
	}

	/// Extracts campaign parameters from a raw query string.
	///
	/// A leading `?` is ignored.
	pub fn from_query(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
	}

	fn from_pairs<'a>(pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>) -> Self {
		let mut params = Self::default();
		for (key, value) in pairs {
			let Some(slot) = params.slot_mut(&key) else {
				continue;
			};
			// First occurrence wins, like URLSearchParams.get().
			if slot.is_none() {
				*slot = Some(value.into_owned());
			}
		}
		params
	}

	fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
		match key {
			UTM_ID => Some(&mut self.id),
			UTM_SOURCE => Some(&mut self.source),
			UTM_CAMPAIGN => Some(&mut self.campaign),
			UTM_MEDIUM => Some(&mut self.medium),
			UTM_CONTENT => Some(&mut self.content),
			UTM_TERM => Some(&mut self.term),
			UTM_SESSION => Some(&mut self.session),
			_ => None,
		}
	}

	/// Returns the value for an allow-listed key, if present.
	pub fn get(&self, key: &str) -> Option<&str> {
		match key {
			UTM_ID => self.id.as_deref(),
			UTM_SOURCE => self.source.as_deref(),
			UTM_CAMPAIGN => self.campaign.as_deref(),
			UTM_MEDIUM => self.medium.as_deref(),
			UTM_CONTENT => self.content.as_deref(),
			UTM_TERM => self.term.as_deref(),
			UTM_SESSION => self.session.as_deref(),
			_ => None,
		}
	}

	/// Returns the present parameters keyed by their query names.
	pub fn to_map(&self) -> BTreeMap<&'static str, &str> {
		UTM_KEYS
			.iter()
			.filter_map(|key| self.get(key).map(|value| (*key, value)))
			.collect()
	}

	pub fn is_empty(&self) -> bool {
		UTM_KEYS.iter().all(|key| self.get(key).is_none())
	}

	/// Applies the hit-recording defaults.
	///
	/// Empty values count as absent so that `?utm_source=` is recorded as
	/// `direct` rather than an empty source.
	pub fn attribution(&self) -> Attribution {
		fn or_default(value: &Option<String>, default: &str) -> String {
			match value.as_deref() {
				Some(v) if !v.is_empty() => v.to_string(),
				_ => default.to_string(),
			}
		}

		Attribution {
			source: or_default(&self.source, DEFAULT_ATTRIBUTION_SOURCE),
			campaign: or_default(&self.campaign, DEFAULT_ATTRIBUTION_CAMPAIGN),
			medium: or_default(&self.medium, DEFAULT_ATTRIBUTION_MEDIUM),
			content: self.content.clone().unwrap_or_default(),
			term: self.term.clone().unwrap_or_default(),
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());
		self
	}

	pub fn with_campaign(mut self, campaign: impl Into<String>) -> Self {
		self.campaign = Some(campaign.into());
		self
	}

	pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
		self.medium = Some(medium.into());
		self
	}

	pub fn with_content(mut self, content: impl Into<String>) -> Self {
		self.content = Some(content.into());
		self
	}

	pub fn with_term(mut self, term: impl Into<String>) -> Self {
		self.term = Some(term.into());
		self
	}

	pub fn with_session(mut self, session: impl Into<String>) -> Self {
		self.session = Some(session.into());
		self
	}
}

/// Campaign fields with hit-recording defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
	pub source: String,
	pub campaign: String,
	pub medium: String,
	pub content: String,
	pub term: String,
}
