// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound campaign link construction.

use url::Url;

use crate::campaign::{
	CampaignParams, UTM_CAMPAIGN, UTM_CONTENT, UTM_ID, UTM_KEYS, UTM_MEDIUM, UTM_SESSION,
	UTM_SOURCE, UTM_TERM,
};
use crate::error::Result;
use crate::session::SessionId;

pub const DEFAULT_UTM_ID: &str = "1";
pub const DEFAULT_UTM_SOURCE: &str = "google";
pub const DEFAULT_UTM_CAMPAIGN: &str = "leads_2025";

/// Builds a campaign tracking URL with a freshly generated `utm_session`.
///
/// The generated session is independent of any session already resolved for
/// the current visitor. Use [`generate_tracking_url_with_session`] to embed a
/// known session instead.
pub fn generate_tracking_url(base_url: &str, params: &CampaignParams) -> Result<String> {
	generate_tracking_url_with_session(base_url, params, &SessionId::generate())
}

/// Builds a campaign tracking URL, using `session` unless `params` carries one.
///
/// Caller-supplied values override the defaults (`utm_id=1`,
/// `utm_source=google`, `utm_campaign=leads_2025`). Medium, content and term are
/// appended only when present and non-empty. Query parameters already on the
/// base URL are kept, except those with the same names as campaign keys.
pub fn generate_tracking_url_with_session(
	base_url: &str,
	params: &CampaignParams,
	session: &SessionId,
) -> Result<String> {
	let mut url = Url::parse(base_url)?;

	let required = |value: &Option<String>, default: &str| -> String {
		value.clone().unwrap_or_else(|| default.to_string())
	};
	let optional = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

	let entries: Vec<(&str, String)> = [
		(UTM_ID, Some(required(&params.id, DEFAULT_UTM_ID))),
		(UTM_SOURCE, Some(required(&params.source, DEFAULT_UTM_SOURCE))),
		(UTM_CAMPAIGN, Some(required(&params.campaign, DEFAULT_UTM_CAMPAIGN))),
		(UTM_MEDIUM, optional(&params.medium)),
		(UTM_CONTENT, optional(&params.content)),
		(UTM_TERM, optional(&params.term)),
		(UTM_SESSION, Some(required(&params.session, session.as_str()))),
	]
	.into_iter()
	.filter_map(|(key, value)| value.map(|v| (key, v)))
	.collect();

	let existing: Vec<(String, String)> = url
		.query_pairs()
		.filter(|(key, _)| !UTM_KEYS.contains(&key.as_ref()))
		.map(|(key, value)| (key.into_owned(), value.into_owned()))
		.collect();

	url.query_pairs_mut()
		.clear()
		.extend_pairs(existing)
		.extend_pairs(entries);

	Ok(url.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::CoreError;
	use proptest::prelude::*;

	fn parse(url: &str) -> CampaignParams {
		CampaignParams::from_url(&Url::parse(url).unwrap())
	}

	#[test]
	fn caller_values_override_defaults() {
		let url = generate_tracking_url(
			"https://example.com",
			&CampaignParams::default().with_source("facebook"),
		)
		.unwrap();
		let params = parse(&url);

		assert_eq!(params.source.as_deref(), Some("facebook"));
		assert_eq!(params.campaign.as_deref(), Some("leads_2025"));
		assert_eq!(params.id.as_deref(), Some("1"));
		assert!(SessionId::new(params.session.unwrap()).is_generated());
	}

	#[test]
	fn omitted_optional_fields_are_not_appended() {
		let url = generate_tracking_url("https://example.com/landing", &CampaignParams::default())
			.unwrap();
		assert!(!url.contains("utm_content"));
		assert!(!url.contains("utm_term"));
		assert!(!url.contains("utm_medium"));
	}

	#[test]
	fn empty_optional_fields_are_not_appended() {
		let url = generate_tracking_url(
			"https://example.com",
			&CampaignParams::default().with_content("").with_term("rust"),
		)
		.unwrap();
		assert!(!url.contains("utm_content"));
		assert!(url.contains("utm_term=rust"));
	}

	#[test]
	fn explicit_session_is_deterministic() {
		let session = SessionId::new("session_fixedvalue");
		let params = CampaignParams::default().with_medium("cpc");
		let a = generate_tracking_url_with_session("https://example.com/", &params, &session).unwrap();
		let b = generate_tracking_url_with_session("https://example.com/", &params, &session).unwrap();

		assert_eq!(a, b);
		assert_eq!(
			a,
			"https://example.com/?utm_id=1&utm_source=google&utm_campaign=leads_2025&utm_medium=cpc&utm_session=session_fixedvalue"
		);
	}

	#[test]
	fn caller_session_overrides_generated_one() {
		let url = generate_tracking_url_with_session(
			"https://example.com",
			&CampaignParams::default().with_session("shared-link"),
			&SessionId::new("session_ignored000"),
		)
		.unwrap();
		assert_eq!(parse(&url).session.as_deref(), Some("shared-link"));
	}

	#[test]
	fn existing_query_is_preserved_and_campaign_keys_replaced() {
		let url = generate_tracking_url_with_session(
			"https://example.com/contact?ref=nav&utm_source=old",
			&CampaignParams::default(),
			&SessionId::new("s"),
		)
		.unwrap();
		let parsed = Url::parse(&url).unwrap();
		let pairs: Vec<(String, String)> = parsed
			.query_pairs()
			.map(|(k, v)| (k.into_owned(), v.into_owned()))
			.collect();

		assert!(pairs.contains(&("ref".to_string(), "nav".to_string())));
		assert_eq!(pairs.iter().filter(|(k, _)| k == UTM_SOURCE).count(), 1);
		assert_eq!(parse(&url).source.as_deref(), Some("google"));
	}

	#[test]
	fn malformed_base_url_is_rejected() {
		let err = generate_tracking_url("not a url", &CampaignParams::default()).unwrap_err();
		assert!(matches!(err, CoreError::InvalidUrl(_)));
		assert!(generate_tracking_url("/relative/path", &CampaignParams::default()).is_err());
	}

	proptest! {
		#[test]
		fn output_parses_back_to_inputs(
			source in "[a-z]{1,12}",
			campaign in "[a-z0-9_]{1,20}",
			term in prop::option::of("[a-z ]{1,20}"),
		) {
			let mut params = CampaignParams::default()
				.with_source(source.clone())
				.with_campaign(campaign.clone());
			params.term = term.clone();

			let url = generate_tracking_url("https://example.com/path", &params).unwrap();
			let parsed = parse(&url);

			prop_assert_eq!(parsed.source, Some(source));
			prop_assert_eq!(parsed.campaign, Some(campaign));
			prop_assert_eq!(parsed.term, term.filter(|t| !t.is_empty()));
			prop_assert!(parsed.content.is_none());
		}
	}
}
