// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session identity resolution.

use parking_lot::Mutex;
use tracing::{debug, warn};

use beacon_core::{CampaignParams, SessionId};

use crate::storage::SharedSessionStorage;

/// Storage key under which the visit's session id is kept.
pub const SESSION_STORAGE_KEY: &str = "utm_session";

/// Resolves the session id for each page view.
///
/// Precedence:
/// 1. `utm_session` on the current URL, persisted over any stored value
/// 2. the value already in storage
/// 3. a newly generated `session_<base36>` id, persisted
///
/// When storage fails the id is kept in memory for the lifetime of this store,
/// so the page load stays consistent even though later page loads will not see it.
///
/// Each resolve holds one lock from the storage read through generate and
/// persist, so concurrent first resolves agree on a single id.
pub struct SessionStore {
	storage: SharedSessionStorage,
	fallback: Mutex<Option<SessionId>>,
}

impl SessionStore {
	pub fn new(storage: SharedSessionStorage) -> Self {
		Self {
			storage,
			fallback: Mutex::new(None),
		}
	}

	pub fn resolve(&self, params: &CampaignParams) -> SessionId {
		let mut fallback = self.fallback.lock();

		if let Some(inbound) = params.session.as_deref().filter(|s| !s.is_empty()) {
			let id = SessionId::new(inbound);
			debug!(session_id = %id, "using session id from URL");
			self.persist(&id, &mut fallback);
			return id;
		}

		match self.storage.get(SESSION_STORAGE_KEY) {
			Ok(Some(stored)) if !stored.is_empty() => return SessionId::new(stored),
			Ok(_) => {}
			Err(e) => warn!(error = %e, "failed to read stored session id"),
		}

		if let Some(id) = fallback.as_ref() {
			return id.clone();
		}

		let id = SessionId::generate();
		debug!(session_id = %id, "generated new session id");
		self.persist(&id, &mut fallback);
		id
	}

	fn persist(&self, id: &SessionId, fallback: &mut Option<SessionId>) {
		if let Err(e) = self.storage.set(SESSION_STORAGE_KEY, id.as_str()) {
			warn!(error = %e, session_id = %id, "failed to persist session id, keeping it in memory");
			*fallback = Some(id.clone());
		}
	}
}
