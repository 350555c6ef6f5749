// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire payloads exchanged with the ad-tracker endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::campaign::Attribution;
use crate::session::SessionId;
use crate::tracker::TrackerId;

/// Body of `POST /api/ad-trackers/{id}/hit`.
///
/// Everything except `sessionId` defaults to an empty string when missing so
/// that older clients can still record a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitPayload {
	pub session_id: String,
	#[serde(default)]
	pub source: String,
	#[serde(default)]
	pub campaign: String,
	#[serde(default)]
	pub medium: String,
	#[serde(default)]
	pub content: String,
	#[serde(default)]
	pub term: String,
	#[serde(default)]
	pub referrer: String,
	#[serde(default)]
	pub device: String,
}

impl HitPayload {
	pub fn new(
		session_id: &SessionId,
		attribution: Attribution,
		referrer: impl Into<String>,
		device: impl Into<String>,
	) -> Self {
		Self {
			session_id: session_id.to_string(),
			source: attribution.source,
			campaign: attribution.campaign,
			medium: attribution.medium,
			content: attribution.content,
			term: attribution.term,
			referrer: referrer.into(),
			device: device.into(),
		}
	}
}

/// Body of `POST /api/ad-trackers/{id}/conversion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionPayload {
	pub session_id: String,
	pub conversion_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub currency: Option<String>,
}

impl ConversionPayload {
	pub fn new(session_id: &SessionId, conversion_type: impl Into<String>) -> Self {
		Self {
			session_id: session_id.to_string(),
			conversion_type: conversion_type.into(),
			value: None,
			currency: None,
		}
	}
}

/// A user action considered a conversion.
///
/// The session id is attached when the event is recorded, so the same event
/// value can be built before the visit's session is known.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionEvent {
	pub tracker_id: TrackerId,
	pub conversion_type: String,
	pub value: Option<f64>,
	pub currency: Option<String>,
	pub params: Map<String, Value>,
}

impl ConversionEvent {
	pub fn new(tracker_id: TrackerId, conversion_type: impl Into<String>) -> Self {
		Self {
			tracker_id,
			conversion_type: conversion_type.into(),
			value: None,
			currency: None,
			params: Map::new(),
		}
	}

	/// Sets the monetary value of the conversion (builder pattern).
	pub fn with_value(mut self, value: f64, currency: impl Into<String>) -> Self {
		self.value = Some(value);
		self.currency = Some(currency.into());
		self
	}

	/// Adds an arbitrary parameter forwarded to the ad platforms.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.params.insert(key.into(), value.into());
		self
	}

	/// Builds the backend payload for the given session.
	pub fn to_payload(&self, session_id: &SessionId) -> ConversionPayload {
		ConversionPayload {
			session_id: session_id.to_string(),
			conversion_type: self.conversion_type.clone(),
			value: self.value,
			currency: self.currency.clone(),
		}
	}

	/// Parameters sent to the ad platforms: the free-form params plus
	/// `value`/`currency` when set. Explicit params win on key collisions.
	pub fn platform_params(&self) -> Map<String, Value> {
		let mut params = Map::new();
		if let Some(value) = self.value {
			params.insert("value".to_string(), Value::from(value));
		}
		if let Some(currency) = &self.currency {
			params.insert("currency".to_string(), Value::from(currency.clone()));
		}
		for (key, value) in &self.params {
			params.insert(key.clone(), value.clone());
		}
		params
	}
}

/// Success body returned by the ad-tracker endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
	pub message: String,
}

impl MessageResponse {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

/// Error body returned by the ad-tracker endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>) -> Self {
		Self {
			error: error.into(),
		}
	}
}
