// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the ad-tracker backend endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument};
use url::Url;

use beacon_core::{
	ConversionPayload, ErrorResponse, HitPayload, MessageResponse, PlatformIds, PublicPlatformIds,
	TrackerId,
};

use crate::error::{Result, TrackingError};

/// Destination for tracker hits and conversions.
#[async_trait]
pub trait TrackerBackend: Send + Sync {
	/// Records one page view against a tracker.
	async fn send_hit(&self, tracker_id: TrackerId, payload: &HitPayload) -> Result<MessageResponse>;

	/// Records one conversion against a tracker.
	async fn send_conversion(
		&self,
		tracker_id: TrackerId,
		payload: &ConversionPayload,
	) -> Result<MessageResponse>;
}

/// Type alias for a shared backend.
pub type SharedTrackerBackend = Arc<dyn TrackerBackend>;

/// HTTP implementation of [`TrackerBackend`].
#[derive(Debug, Clone)]
pub struct HttpTrackerBackend {
	http_client: Client,
	base_url: String,
}

impl HttpTrackerBackend {
	/// Creates a backend client for the site at `base_url`.
	pub fn new(base_url: impl Into<String>) -> Result<Self> {
		Self::with_client(base_url, crate::http::new_client()?)
	}

	/// Creates a backend client using an existing HTTP client.
	pub fn with_client(base_url: impl Into<String>, http_client: Client) -> Result<Self> {
		let base_url = base_url.into();
		Url::parse(&base_url).map_err(|e| TrackingError::InvalidUrl(format!("{base_url}: {e}")))?;
		Ok(Self {
			http_client,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Fetches the site's public platform identifiers.
	///
	/// Platforms the site has not configured come back as placeholders.
	#[instrument(skip(self))]
	pub async fn fetch_platform_ids(&self) -> Result<PlatformIds> {
		let url = format!("{}/api/tracking-config", self.base_url);
		debug!(url = %url, "fetching tracking config");

		let response = self.http_client.get(&url).send().await.map_err(|e| {
			error!(error = %e, "network error fetching tracking config");
			TrackingError::RequestFailed(e)
		})?;
		let public: PublicPlatformIds = Self::read_json(response).await?;
		Ok(public.into())
	}

	async fn post<B: Serialize + ?Sized>(&self, url: String, body: &B) -> Result<MessageResponse> {
		debug!(url = %url, "posting to tracker backend");

		let response = self
			.http_client
			.post(&url)
			.json(body)
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, url = %url, "network error calling tracker backend");
				TrackingError::RequestFailed(e)
			})?;

		Self::read_json(response).await
	}

	async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
		let status = response.status();
		if !status.is_success() {
			let status_code = status.as_u16();
			let body = response.text().await.unwrap_or_default();
			let message = serde_json::from_str::<ErrorResponse>(&body)
				.map(|b| b.error)
				.unwrap_or(body);
			error!(status = status_code, message = %message, "tracker backend error");
			return Err(TrackingError::ServerError {
				status: status_code,
				message,
			});
		}

		Ok(response.json::<T>().await?)
	}
}

#[async_trait]
impl TrackerBackend for HttpTrackerBackend {
	#[instrument(skip(self, payload), fields(tracker_id = %tracker_id, session_id = %payload.session_id))]
	async fn send_hit(&self, tracker_id: TrackerId, payload: &HitPayload) -> Result<MessageResponse> {
		let url = format!("{}/api/ad-trackers/{}/hit", self.base_url, tracker_id);
		self.post(url, payload).await
	}

	#[instrument(
		skip(self, payload),
		fields(tracker_id = %tracker_id, session_id = %payload.session_id, conversion_type = %payload.conversion_type)
	)]
	async fn send_conversion(
		&self,
		tracker_id: TrackerId,
		payload: &ConversionPayload,
	) -> Result<MessageResponse> {
		let url = format!("{}/api/ad-trackers/{}/conversion", self.base_url, tracker_id);
		self.post(url, payload).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use beacon_core::{Attribution, SessionId};
	use serde_json::json;
	use wiremock::matchers::{body_json, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn hit() -> HitPayload {
		HitPayload::new(
			&SessionId::new("session_abcdefghij"),
			Attribution {
				source: "google".to_string(),
				campaign: "leads_2025".to_string(),
				medium: "cpc".to_string(),
				content: String::new(),
				term: String::new(),
			},
			"",
			"test-agent",
		)
	}

	#[test]
	fn rejects_relative_base_url() {
		assert!(matches!(
			HttpTrackerBackend::new("/api"),
			Err(TrackingError::InvalidUrl(_))
		));
	}

	#[test]
	fn trims_trailing_slash() {
		let backend = HttpTrackerBackend::new("https://example.com/").unwrap();
		assert_eq!(backend.base_url(), "https://example.com");
	}

	#[tokio::test]
	async fn send_hit_posts_camel_case_payload() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/api/ad-trackers/7/hit"))
			.and(body_json(json!({
				"sessionId": "session_abcdefghij",
				"source": "google",
				"campaign": "leads_2025",
				"medium": "cpc",
				"content": "",
				"term": "",
				"referrer": "",
				"device": "test-agent",
			})))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Hit recorded"})))
			.expect(1)
			.mount(&server)
			.await;

		let backend = HttpTrackerBackend::new(server.uri()).unwrap();
		let response = backend.send_hit(TrackerId(7), &hit()).await.unwrap();
		assert_eq!(response.message, "Hit recorded");
	}

	#[tokio::test]
	async fn send_conversion_omits_unset_value() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/api/ad-trackers/3/conversion"))
			.and(body_json(json!({
				"sessionId": "session_abcdefghij",
				"conversionType": "quote_request",
			})))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(json!({"message": "Conversion recorded"})),
			)
			.expect(1)
			.mount(&server)
			.await;

		let backend = HttpTrackerBackend::new(server.uri()).unwrap();
		let payload = ConversionPayload::new(&SessionId::new("session_abcdefghij"), "quote_request");
		backend.send_conversion(TrackerId(3), &payload).await.unwrap();
	}

	#[tokio::test]
	async fn error_body_becomes_server_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/api/ad-trackers/99/hit"))
			.respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Tracker not found"})))
			.mount(&server)
			.await;

		let backend = HttpTrackerBackend::new(server.uri()).unwrap();
		let err = backend.send_hit(TrackerId(99), &hit()).await.unwrap_err();
		match err {
			TrackingError::ServerError { status, message } => {
				assert_eq!(status, 404);
				assert_eq!(message, "Tracker not found");
			}
			other => panic!("expected server error, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn non_json_error_keeps_raw_body() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
			.mount(&server)
			.await;

		let backend = HttpTrackerBackend::new(server.uri()).unwrap();
		let err = backend.send_hit(TrackerId(1), &hit()).await.unwrap_err();
		assert!(matches!(
			err,
			TrackingError::ServerError { status: 502, ref message } if message == "bad gateway"
		));
	}

	#[tokio::test]
	async fn fetch_platform_ids_maps_nulls_to_placeholders() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/api/tracking-config"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"googleAnalyticsId": "G-LIVE123",
				"googleAdsId": null,
				"facebookPixelId": null,
				"microsoftAdsId": "187000000",
			})))
			.mount(&server)
			.await;

		let backend = HttpTrackerBackend::new(server.uri()).unwrap();
		let ids = backend.fetch_platform_ids().await.unwrap();

		assert_eq!(ids.google_analytics(), Some("G-LIVE123"));
		assert_eq!(ids.google_ads(), None);
		assert_eq!(ids.facebook_pixel(), None);
		assert_eq!(ids.microsoft_ads(), Some("187000000"));
	}

	#[tokio::test]
	async fn unreachable_backend_is_request_failed() {
		let backend = HttpTrackerBackend::new("http://127.0.0.1:9").unwrap();
		let err = backend.send_hit(TrackerId(1), &hit()).await.unwrap_err();
		assert!(matches!(err, TrackingError::RequestFailed(_)));
	}
}
