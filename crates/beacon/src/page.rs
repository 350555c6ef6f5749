// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The page view a tracking call is made from.

use url::Url;

use beacon_core::CampaignParams;

use crate::error::{Result, TrackingError};

/// Location, referrer and user agent of the current page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
	url: Url,
	referrer: Option<String>,
	user_agent: String,
}

impl PageContext {
	pub fn new(url: Url) -> Self {
		Self {
			url,
			referrer: None,
			user_agent: String::new(),
		}
	}

	/// Parses an absolute page URL.
	pub fn parse(url: &str) -> Result<Self> {
		let url = Url::parse(url).map_err(|e| TrackingError::InvalidUrl(format!("{url}: {e}")))?;
		Ok(Self::new(url))
	}

	pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
		let referrer = referrer.into();
		self.referrer = (!referrer.is_empty()).then_some(referrer);
		self
	}

	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();
		self
	}

	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Path plus query, as reported to the ad platforms on route changes.
	pub fn path(&self) -> String {
		match self.url.query() {
			Some(query) => format!("{}?{}", self.url.path(), query),
			None => self.url.path().to_string(),
		}
	}

	/// Referrer, empty when the visit started without one.
	pub fn referrer(&self) -> &str {
		self.referrer.as_deref().unwrap_or("")
	}

	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}

	pub fn campaign_params(&self) -> CampaignParams {
		CampaignParams::from_url(&self.url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_rejects_relative_urls() {
		assert!(PageContext::parse("/services").is_err());
		assert!(PageContext::parse("https://example.com/services").is_ok());
	}

	#[test]
	fn exposes_campaign_params() {
		let page = PageContext::parse("https://example.com/?utm_source=bing&utm_term=logo")
			.unwrap()
			.with_referrer("https://www.bing.com/")
			.with_user_agent("Mozilla/5.0");

		let params = page.campaign_params();
		assert_eq!(params.source.as_deref(), Some("bing"));
		assert_eq!(params.term.as_deref(), Some("logo"));
		assert_eq!(page.referrer(), "https://www.bing.com/");
		assert_eq!(page.user_agent(), "Mozilla/5.0");
	}

	#[test]
	fn empty_referrer_is_absent() {
		let page = PageContext::parse("https://example.com/").unwrap().with_referrer("");
		assert_eq!(page.referrer(), "");
	}

	#[test]
	fn path_includes_query() {
		let page = PageContext::parse("https://example.com/blog/post?page=2").unwrap();
		assert_eq!(page.path(), "/blog/post?page=2");
		let page = PageContext::parse("https://example.com").unwrap();
		assert_eq!(page.path(), "/");
	}
}
