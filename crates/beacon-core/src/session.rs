// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Visit-scoped session identifiers.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Prefix of generated session identifiers.
pub const SESSION_PREFIX: &str = "session_";

/// Number of random base-36 characters after the prefix.
pub const SESSION_SUFFIX_LEN: usize = 10;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier correlating every hit and conversion of one visit.
///
/// Either supplied through the `utm_session` query parameter (taken verbatim)
/// or generated as `session_` followed by ten base-36 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Generates a fresh `session_<base36>` identifier.
	pub fn generate() -> Self {
		let mut rng = rand::thread_rng();
		let suffix: String = (0..SESSION_SUFFIX_LEN)
			.map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
			.collect();
		Self(format!("{SESSION_PREFIX}{suffix}"))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}

	/// Returns true if this id has the shape produced by [`SessionId::generate`].
	pub fn is_generated(&self) -> bool {
		self
			.0
			.strip_prefix(SESSION_PREFIX)
			.map(|suffix| {
				suffix.len() == SESSION_SUFFIX_LEN
					&& suffix
						.bytes()
						.all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
			})
			.unwrap_or(false)
	}
}

impl std::fmt::Display for SessionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for SessionId {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for SessionId {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl AsRef<str> for SessionId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn generated_ids_have_expected_shape() {
		let id = SessionId::generate();
		assert!(id.as_str().starts_with("session_"));
		assert_eq!(id.as_str().len(), SESSION_PREFIX.len() + SESSION_SUFFIX_LEN);
		assert!(id.is_generated());
	}

	#[test]
	fn supplied_ids_are_kept_verbatim() {
		let id = SessionId::new("campaign-visitor-42");
		assert_eq!(id.to_string(), "campaign-visitor-42");
		assert!(!id.is_generated());
	}

	#[test]
	fn is_generated_rejects_uppercase_and_wrong_length() {
		assert!(!SessionId::new("session_ABCDEFGHIJ").is_generated());
		assert!(!SessionId::new("session_abc").is_generated());
		assert!(!SessionId::new("sess_0123456789").is_generated());
	}

	#[test]
	fn serializes_as_plain_string() {
		let id = SessionId::new("session_0123456789");
		assert_eq!(
			serde_json::to_string(&id).unwrap(),
			"\"session_0123456789\""
		);
	}

	proptest! {
		#[test]
		fn generated_ids_are_unique(_seed: u64) {
			let a = SessionId::generate();
			let b = SessionId::generate();
			prop_assert_ne!(a, b);
		}

		#[test]
		fn generated_suffix_is_base36(_seed: u64) {
			let id = SessionId::generate();
			let suffix = id.as_str().strip_prefix(SESSION_PREFIX).unwrap();
			prop_assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
		}
	}
}
