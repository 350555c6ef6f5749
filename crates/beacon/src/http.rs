// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client with a consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::{Result, TrackingError};

/// Request timeout applied to backend calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates a client builder with the standard Beacon User-Agent header.
///
/// Use this when you need to customize the client (e.g., set timeout).
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a client with the standard User-Agent and the default timeout.
pub fn new_client() -> Result<Client> {
	new_client_with_timeout(DEFAULT_TIMEOUT)
}

/// Creates a client with a custom timeout and the standard User-Agent.
pub fn new_client_with_timeout(timeout: Duration) -> Result<Client> {
	builder()
		.timeout(timeout)
		.build()
		.map_err(|e| TrackingError::HttpClient(e.to_string()))
}

/// Returns the standard Beacon User-Agent string.
///
/// Format: `beacon/{version}/{os}-{arch}`
pub fn user_agent() -> String {
	format!(
		"beacon/{}/{}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0], "beacon");
		assert_eq!(parts[1], env!("CARGO_PKG_VERSION"));
	}

	#[test]
	fn client_builds_with_timeout() {
		assert!(new_client_with_timeout(Duration::from_secs(1)).is_ok());
	}
}
