// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The tracking manager: one instance per page lifetime.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use beacon_core::{
	generate_tracking_url, generate_tracking_url_with_session, CampaignParams, ConversionEvent,
	MessageResponse, PlatformIds, PlatformKind, SessionId, TrackerId,
};

use crate::backend::{HttpTrackerBackend, SharedTrackerBackend};
use crate::bootstrap::{PlatformState, ScriptBootstrapper};
use crate::error::{Result, TrackingError};
use crate::host::{DocumentHost, ScriptHost};
use crate::page::PageContext;
use crate::platform::{platforms_from_ids, PresetConversion, SharedAdPlatform};
use crate::recorder::TrackerRecorder;
use crate::session::SessionStore;
use crate::storage::{MemorySessionStorage, SharedSessionStorage};

/// Currency attached to preset conversions unless configured otherwise.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Outcome of a conversion fanned out to the platforms and the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct FanOutReport {
	/// Platforms that received the event, in bootstrap order.
	pub platforms: Vec<PlatformKind>,
	/// The backend's acknowledgement.
	pub backend: MessageResponse,
}

/// Owns the platform state machines, session store and backend recorder for
/// one page lifetime. Share it through an `Arc`.
pub struct TrackingManager {
	host: Arc<dyn ScriptHost>,
	bootstrapper: ScriptBootstrapper,
	sessions: Arc<SessionStore>,
	recorder: TrackerRecorder,
	currency: String,
}

impl TrackingManager {
	pub fn builder() -> TrackingManagerBuilder {
		TrackingManagerBuilder::default()
	}

	pub fn host(&self) -> &Arc<dyn ScriptHost> {
		&self.host
	}

	pub fn currency(&self) -> &str {
		&self.currency
	}

	/// Injects the loader script of every configured platform not yet injected.
	pub fn bootstrap(&self) -> Vec<PlatformKind> {
		self.bootstrapper.bootstrap(self.host.as_ref())
	}

	/// Script load callback for a platform.
	pub fn on_script_loaded(&self, kind: PlatformKind) -> bool {
		self.bootstrapper.mark_loaded(kind, self.host.as_ref())
	}

	pub fn platform_state(&self, kind: PlatformKind) -> PlatformState {
		self.bootstrapper.state(kind)
	}

	/// Reports a route change to every ready platform.
	pub fn track_page_view(&self, path: &str) -> Vec<PlatformKind> {
		self.each_ready(|platform| platform.track_page_view(self.host.as_ref(), path))
	}

	/// Sends a named event to every ready platform.
	pub fn track_conversion(&self, event_name: &str, params: &Map<String, Value>) -> Vec<PlatformKind> {
		debug!(event_name, "tracking conversion on ready platforms");
		self.each_ready(|platform| platform.track_event(self.host.as_ref(), event_name, params))
	}

	/// Contact-form submission: a generic event everywhere plus each platform's
	/// own conversion where its identifiers are live.
	pub fn track_contact_form_submission(&self, value: f64) -> Vec<PlatformKind> {
		self.track_preset(PresetConversion::ContactForm {
			value,
			currency: self.currency.clone(),
		})
	}

	pub fn track_service_request(&self, service_id: &str, value: f64) -> Vec<PlatformKind> {
		self.track_preset(PresetConversion::ServiceRequest {
			service_id: service_id.to_string(),
			value,
			currency: self.currency.clone(),
		})
	}

	/// Records a page view against a tracker.
	pub async fn record_tracker_hit(
		&self,
		tracker_id: TrackerId,
		page: &PageContext,
	) -> Result<MessageResponse> {
		self.recorder.record_hit(tracker_id, page).await
	}

	/// Fans a conversion out to every ready platform, then records it with the
	/// backend. Platform delivery does not depend on the backend call.
	#[instrument(skip(self, event, page), fields(tracker_id = %event.tracker_id, conversion_type = %event.conversion_type))]
	pub async fn record_conversion(&self, event: &ConversionEvent, page: &PageContext) -> Result<FanOutReport> {
		let platforms = self.track_conversion(&event.conversion_type, &event.platform_params());
		let backend = self.recorder.record_conversion(event, page).await?;
		Ok(FanOutReport { platforms, backend })
	}

	/// Records a conversion with the backend without notifying any platform.
	pub async fn record_backend_conversion(
		&self,
		event: &ConversionEvent,
		page: &PageContext,
	) -> Result<MessageResponse> {
		self.recorder.record_conversion(event, page).await
	}

	/// Records a tracker hit on a background task.
	pub fn dispatch_hit(self: &Arc<Self>, tracker_id: TrackerId, page: PageContext) -> JoinHandle<Result<MessageResponse>> {
		let manager = Arc::clone(self);
		tokio::spawn(async move { manager.record_tracker_hit(tracker_id, &page).await })
	}

	/// Fans out a conversion on a background task.
	pub fn dispatch_conversion(
		self: &Arc<Self>,
		event: ConversionEvent,
		page: PageContext,
	) -> JoinHandle<Result<FanOutReport>> {
		let manager = Arc::clone(self);
		tokio::spawn(async move { manager.record_conversion(&event, &page).await })
	}

	pub fn resolve_session_id(&self, page: &PageContext) -> SessionId {
		self.sessions.resolve(&page.campaign_params())
	}

	/// Builds an outbound tracking URL carrying a freshly generated session.
	pub fn generate_tracking_url(&self, base_url: &str, params: &CampaignParams) -> Result<String> {
		Ok(generate_tracking_url(base_url, params)?)
	}

	/// Builds an outbound tracking URL carrying the current visit's session.
	pub fn generate_tracking_url_for_session(
		&self,
		base_url: &str,
		params: &CampaignParams,
		page: &PageContext,
	) -> Result<String> {
		let session_id = self.resolve_session_id(page);
		Ok(generate_tracking_url_with_session(base_url, params, &session_id)?)
	}

	fn track_preset(&self, conversion: PresetConversion) -> Vec<PlatformKind> {
		let params = conversion.params();
		self.each_ready(|platform| {
			platform.track_event(self.host.as_ref(), conversion.event_name(), &params);
			if platform.track_preset_conversion(self.host.as_ref(), &conversion) {
				debug!(platform = %platform.kind(), "sent platform conversion");
			}
		})
	}

	fn each_ready(&self, mut f: impl FnMut(&SharedAdPlatform)) -> Vec<PlatformKind> {
		self
			.bootstrapper
			.ready_platforms()
			.iter()
			.map(|platform| {
				f(platform);
				platform.kind()
			})
			.collect()
	}
}

/// Builder for [`TrackingManager`].
///
/// Only the backend is required. Without explicit platforms they are built
/// from the platform ids, which default to placeholders.
#[derive(Default)]
pub struct TrackingManagerBuilder {
	platform_ids: Option<PlatformIds>,
	platforms: Option<Vec<SharedAdPlatform>>,
	host: Option<Arc<dyn ScriptHost>>,
	backend: Option<SharedTrackerBackend>,
	backend_url: Option<String>,
	storage: Option<SharedSessionStorage>,
	currency: Option<String>,
}

impl TrackingManagerBuilder {
	pub fn platform_ids(mut self, ids: PlatformIds) -> Self {
		self.platform_ids = Some(ids);
		self
	}

	/// Overrides the platforms built from the ids.
	pub fn platforms(mut self, platforms: Vec<SharedAdPlatform>) -> Self {
		self.platforms = Some(platforms);
		self
	}

	pub fn host(mut self, host: Arc<dyn ScriptHost>) -> Self {
		self.host = Some(host);
		self
	}

	pub fn backend(mut self, backend: SharedTrackerBackend) -> Self {
		self.backend = Some(backend);
		self
	}

	/// Uses an [`HttpTrackerBackend`] for the given site.
	pub fn backend_url(mut self, base_url: impl Into<String>) -> Self {
		self.backend_url = Some(base_url.into());
		self
	}

	pub fn storage(mut self, storage: SharedSessionStorage) -> Self {
		self.storage = Some(storage);
		self
	}

	pub fn currency(mut self, currency: impl Into<String>) -> Self {
		self.currency = Some(currency.into());
		self
	}

	pub fn build(self) -> Result<TrackingManager> {
		let backend: SharedTrackerBackend = match (self.backend, self.backend_url) {
			(Some(backend), _) => backend,
			(None, Some(url)) => Arc::new(HttpTrackerBackend::new(url)?),
			(None, None) => return Err(TrackingError::MissingComponent("backend")),
		};
		let platforms = self
			.platforms
			.unwrap_or_else(|| platforms_from_ids(&self.platform_ids.unwrap_or_default()));
		let storage = self
			.storage
			.unwrap_or_else(|| Arc::new(MemorySessionStorage::new()));
		let host = self.host.unwrap_or_else(|| Arc::new(DocumentHost::new()));

		let sessions = Arc::new(SessionStore::new(storage));
		Ok(TrackingManager {
			host,
			bootstrapper: ScriptBootstrapper::new(platforms),
			recorder: TrackerRecorder::new(Arc::clone(&sessions), backend),
			sessions,
			currency: self
				.currency
				.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::TrackerBackend;
	use async_trait::async_trait;
	use beacon_core::{ConversionPayload, HitPayload};
	use serde_json::json;

	struct AckBackend;

	#[async_trait]
	impl TrackerBackend for AckBackend {
		async fn send_hit(&self, _tracker_id: TrackerId, _payload: &HitPayload) -> Result<MessageResponse> {
			Ok(MessageResponse::new("Hit recorded"))
		}

		async fn send_conversion(
			&self,
			_tracker_id: TrackerId,
			_payload: &ConversionPayload,
		) -> Result<MessageResponse> {
			Ok(MessageResponse::new("Conversion recorded"))
		}
	}

	fn live_ids() -> PlatformIds {
		PlatformIds {
			google_analytics_id: "G-ABC123".to_string(),
			google_ads_id: "AW-999".to_string(),
			facebook_pixel_id: "123456789012345".to_string(),
			microsoft_ads_id: "187000000".to_string(),
		}
	}

	fn manager(ids: PlatformIds) -> (TrackingManager, Arc<DocumentHost>) {
		let host = Arc::new(DocumentHost::new());
		let manager = TrackingManager::builder()
			.platform_ids(ids)
			.host(host.clone())
			.backend(Arc::new(AckBackend))
			.build()
			.unwrap();
		(manager, host)
	}

	fn ready_manager() -> (TrackingManager, Arc<DocumentHost>) {
		let (manager, host) = manager(live_ids());
		manager.bootstrap();
		for kind in PlatformKind::ALL {
			manager.on_script_loaded(kind);
		}
		host.drain_commands();
		(manager, host)
	}

	#[test]
	fn build_requires_backend() {
		let err = TrackingManager::builder().build().err().unwrap();
		assert!(matches!(err, TrackingError::MissingComponent("backend")));
	}

	#[test]
	fn build_rejects_bad_backend_url() {
		let err = TrackingManager::builder()
			.backend_url("not a url")
			.build()
			.err()
			.unwrap();
		assert!(matches!(err, TrackingError::InvalidUrl(_)));
	}

	#[test]
	fn page_view_is_noop_until_ready() {
		let (manager, host) = manager(live_ids());
		manager.bootstrap();

		assert!(manager.track_page_view("/about").is_empty());
		assert!(host.commands().is_empty());

		manager.on_script_loaded(PlatformKind::GoogleTag);
		host.drain_commands();
		assert_eq!(manager.track_page_view("/about"), vec![PlatformKind::GoogleTag]);
	}

	#[test]
	fn track_conversion_reaches_every_ready_platform() {
		let (manager, host) = ready_manager();
		let mut params = Map::new();
		params.insert("form".to_string(), json!("quote"));

		let sent = manager.track_conversion("lead", &params);

		assert_eq!(sent, PlatformKind::ALL.to_vec());
		assert_eq!(host.commands_for("gtag").len(), 1);
		assert_eq!(host.commands_for("fbq").len(), 1);
		assert_eq!(host.commands_for("uetq")[0].args()[0]["event"], "lead");
	}

	#[test]
	fn service_request_uses_configured_currency() {
		let host = Arc::new(DocumentHost::new());
		let manager = TrackingManager::builder()
			.platform_ids(live_ids())
			.host(host.clone())
			.backend(Arc::new(AckBackend))
			.currency("EUR")
			.build()
			.unwrap();
		manager.bootstrap();
		manager.on_script_loaded(PlatformKind::GoogleTag);
		host.drain_commands();

		manager.track_service_request("seo-audit", 300.0);

		let gtag = host.commands_for("gtag");
		assert_eq!(gtag.len(), 2);
		assert_eq!(gtag[0].args()[1], "service_request");
		assert_eq!(gtag[0].args()[2]["service_id"], "seo-audit");
		assert_eq!(gtag[1].args()[2]["send_to"], "AW-999/service_request");
		assert_eq!(gtag[1].args()[2]["currency"], "EUR");
	}

	#[tokio::test]
	async fn record_conversion_reports_fan_out() {
		let (manager, _host) = ready_manager();
		let page = PageContext::parse("https://example.com/contact").unwrap();

		let report = manager
			.record_conversion(&ConversionEvent::new(TrackerId(1), "lead"), &page)
			.await
			.unwrap();

		assert_eq!(report.platforms.len(), 3);
		assert_eq!(report.backend.message, "Conversion recorded");
	}

	#[tokio::test]
	async fn dispatch_hit_runs_in_background() {
		let (manager, _host) = manager(PlatformIds::default());
		let manager = Arc::new(manager);
		let page = PageContext::parse("https://example.com/").unwrap();

		let response = manager.dispatch_hit(TrackerId(1), page).await.unwrap().unwrap();
		assert_eq!(response.message, "Hit recorded");
	}

	#[test]
	fn tracking_url_for_session_embeds_visit_session() {
		let (manager, _host) = manager(PlatformIds::default());
		let page = PageContext::parse("https://example.com/?utm_session=visit42").unwrap();

		let url = manager
			.generate_tracking_url_for_session(
				"https://example.com/landing",
				&CampaignParams::default().with_source("facebook"),
				&page,
			)
			.unwrap();

		assert!(url.contains("utm_source=facebook"));
		assert!(url.ends_with("utm_session=visit42"));
	}

	#[test]
	fn tracking_url_rejects_malformed_base() {
		let (manager, _host) = manager(PlatformIds::default());
		let err = manager
			.generate_tracking_url("::not a url::", &CampaignParams::default())
			.unwrap_err();
		assert!(matches!(err, TrackingError::Core(_)));
	}
}
