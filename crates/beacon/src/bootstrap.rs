// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Third-party script bootstrapping.
//!
//! Every configured platform moves through `unloaded -> loading -> ready`:
//!
//! - `bootstrap` injects the loader script of each `unloaded` platform and moves
//!   it to `loading`. If the page already defines the platform's global (an
//!   earlier mount injected it), the platform goes straight to `ready` and no
//!   second script is injected.
//! - `mark_loaded` moves a `loading` platform to `ready` and initializes it.
//! - Any other transition request is a no-op.
//!
//! A script that never finishes loading leaves its platform in `loading`, and
//! tracking calls for it stay no-ops.

use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use beacon_core::PlatformKind;

use crate::host::ScriptHost;
use crate::platform::SharedAdPlatform;

/// Lifecycle of a platform's loader script within one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformState {
	Unloaded,
	Loading,
	Ready,
}

impl PlatformState {
	pub fn as_str(&self) -> &'static str {
		match self {
			PlatformState::Unloaded => "unloaded",
			PlatformState::Loading => "loading",
			PlatformState::Ready => "ready",
		}
	}
}

impl fmt::Display for PlatformState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

struct PlatformHandle {
	platform: SharedAdPlatform,
	state: Mutex<PlatformState>,
}

/// Owns the per-platform state machines for one page lifetime.
pub struct ScriptBootstrapper {
	handles: Vec<PlatformHandle>,
}

impl ScriptBootstrapper {
	/// Creates a bootstrapper with every platform `unloaded`.
	pub fn new(platforms: Vec<SharedAdPlatform>) -> Self {
		let handles = platforms
			.into_iter()
			.map(|platform| PlatformHandle {
				platform,
				state: Mutex::new(PlatformState::Unloaded),
			})
			.collect();
		Self { handles }
	}

	/// Injects the scripts of every `unloaded` platform.
	///
	/// Returns the platforms whose script was injected by this call.
	pub fn bootstrap(&self, host: &dyn ScriptHost) -> Vec<PlatformKind> {
		let mut injected = Vec::new();
		for handle in &self.handles {
			let kind = handle.platform.kind();
			let mut state = handle.state.lock();
			if *state != PlatformState::Unloaded {
				debug!(platform = %kind, state = %*state, "platform already bootstrapped");
				continue;
			}

			if host.has_global(kind.global_name()) {
				info!(platform = %kind, "platform global already present, skipping injection");
				*state = PlatformState::Ready;
				continue;
			}

			host.inject_script(handle.platform.script());
			*state = PlatformState::Loading;
			debug!(platform = %kind, "injected platform script");
			injected.push(kind);
		}
		injected
	}

	/// Handles a script load callback.
	///
	/// Returns true if the platform transitioned to `ready`.
	pub fn mark_loaded(&self, kind: PlatformKind, host: &dyn ScriptHost) -> bool {
		let Some(handle) = self.handle(kind) else {
			return false;
		};
		let mut state = handle.state.lock();
		if *state != PlatformState::Loading {
			return false;
		}
		handle.platform.initialize(host);
		*state = PlatformState::Ready;
		info!(platform = %kind, "platform ready");
		true
	}

	/// Current state of a platform. Unconfigured platforms are `unloaded`.
	pub fn state(&self, kind: PlatformKind) -> PlatformState {
		self
			.handle(kind)
			.map(|handle| *handle.state.lock())
			.unwrap_or(PlatformState::Unloaded)
	}

	/// Configured platforms, in bootstrap order.
	pub fn platforms(&self) -> Vec<PlatformKind> {
		self.handles.iter().map(|h| h.platform.kind()).collect()
	}

	/// Platforms that have reached `ready`, in bootstrap order.
	pub fn ready_platforms(&self) -> Vec<SharedAdPlatform> {
		self
			.handles
			.iter()
			.filter(|h| *h.state.lock() == PlatformState::Ready)
			.map(|h| h.platform.clone())
			.collect()
	}

	fn handle(&self, kind: PlatformKind) -> Option<&PlatformHandle> {
		self.handles.iter().find(|h| h.platform.kind() == kind)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::DocumentHost;
	use crate::platform::platforms_from_ids;
	use beacon_core::PlatformIds;

	fn live_ids() -> PlatformIds {
		PlatformIds {
			google_analytics_id: "G-ABC123".to_string(),
			google_ads_id: "AW-999".to_string(),
			facebook_pixel_id: "123456789012345".to_string(),
			microsoft_ads_id: "187000000".to_string(),
		}
	}

	#[test]
	fn bootstrap_twice_injects_once() {
		let host = DocumentHost::new();
		let bootstrapper = ScriptBootstrapper::new(platforms_from_ids(&live_ids()));

		assert_eq!(bootstrapper.bootstrap(&host).len(), 3);
		assert!(bootstrapper.bootstrap(&host).is_empty());
		assert_eq!(host.scripts().len(), 3);
		for kind in PlatformKind::ALL {
			assert_eq!(bootstrapper.state(kind), PlatformState::Loading);
		}
	}

	#[test]
	fn placeholders_inject_nothing() {
		let host = DocumentHost::new();
		let bootstrapper = ScriptBootstrapper::new(platforms_from_ids(&PlatformIds::default()));

		assert!(bootstrapper.bootstrap(&host).is_empty());
		assert!(host.scripts().is_empty());
		assert_eq!(bootstrapper.state(PlatformKind::GoogleTag), PlatformState::Unloaded);
	}

	#[test]
	fn existing_global_goes_straight_to_ready() {
		let host = DocumentHost::new().with_global("fbq");
		let bootstrapper = ScriptBootstrapper::new(platforms_from_ids(&live_ids()));

		let injected = bootstrapper.bootstrap(&host);

		assert!(!injected.contains(&PlatformKind::FacebookPixel));
		assert_eq!(bootstrapper.state(PlatformKind::FacebookPixel), PlatformState::Ready);
		assert!(host.commands_for("fbq").is_empty());
	}

	#[test]
	fn load_callback_initializes_once() {
		let host = DocumentHost::new();
		let bootstrapper = ScriptBootstrapper::new(platforms_from_ids(&live_ids()));
		bootstrapper.bootstrap(&host);

		assert!(bootstrapper.mark_loaded(PlatformKind::MicrosoftUet, &host));
		assert!(!bootstrapper.mark_loaded(PlatformKind::MicrosoftUet, &host));

		assert_eq!(bootstrapper.state(PlatformKind::MicrosoftUet), PlatformState::Ready);
		assert_eq!(host.commands_for("uetq").len(), 1);
		let ready: Vec<_> = bootstrapper.ready_platforms().iter().map(|p| p.kind()).collect();
		assert_eq!(ready, vec![PlatformKind::MicrosoftUet]);
	}

	#[test]
	fn load_callback_before_bootstrap_is_ignored() {
		let host = DocumentHost::new();
		let bootstrapper = ScriptBootstrapper::new(platforms_from_ids(&live_ids()));

		assert!(!bootstrapper.mark_loaded(PlatformKind::GoogleTag, &host));
		assert_eq!(bootstrapper.state(PlatformKind::GoogleTag), PlatformState::Unloaded);
		assert!(host.commands().is_empty());
	}

	#[test]
	fn state_displays_lowercase() {
		assert_eq!(PlatformState::Loading.to_string(), "loading");
		assert_eq!(
			serde_json::to_string(&PlatformState::Ready).unwrap(),
			"\"ready\""
		);
	}
}
