// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ad tracker identifiers.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier of an ad tracker row on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackerId(pub i64);

impl std::fmt::Display for TrackerId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for TrackerId {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().parse::<i64>() {
			Ok(id) if id > 0 => Ok(Self(id)),
			_ => Err(CoreError::InvalidTrackerId(s.to_string())),
		}
	}
}

/// Advertising platform a tracker belongs to.
///
/// Serialized in snake_case; deserialized through [`FromStr`](std::str::FromStr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum TrackerPlatform {
	Google,
	Facebook,
	Microsoft,
	Linkedin,
	Other,
}

impl TrackerPlatform {
	pub fn as_str(&self) -> &'static str {
		match self {
			TrackerPlatform::Google => "google",
			TrackerPlatform::Facebook => "facebook",
			TrackerPlatform::Microsoft => "microsoft",
			TrackerPlatform::Linkedin => "linkedin",
			TrackerPlatform::Other => "other",
		}
	}
}

impl std::fmt::Display for TrackerPlatform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for TrackerPlatform {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"google" => Ok(TrackerPlatform::Google),
			"facebook" => Ok(TrackerPlatform::Facebook),
			"microsoft" | "bing" => Ok(TrackerPlatform::Microsoft),
			"linkedin" => Ok(TrackerPlatform::Linkedin),
			"other" => Ok(TrackerPlatform::Other),
			_ => Err(CoreError::InvalidPlatform(s.to_string())),
		}
	}
}

impl TryFrom<String> for TrackerPlatform {
	type Error = CoreError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tracker_id_parses_positive_integers() {
		assert_eq!("42".parse::<TrackerId>().unwrap(), TrackerId(42));
		assert!("0".parse::<TrackerId>().is_err());
		assert!("-3".parse::<TrackerId>().is_err());
		assert!("abc".parse::<TrackerId>().is_err());
	}

	#[test]
	fn platform_roundtrips_through_str() {
		for platform in [
			TrackerPlatform::Google,
			TrackerPlatform::Facebook,
			TrackerPlatform::Microsoft,
			TrackerPlatform::Linkedin,
			TrackerPlatform::Other,
		] {
			assert_eq!(platform.as_str().parse::<TrackerPlatform>().unwrap(), platform);
		}
	}

	#[test]
	fn platform_accepts_bing_alias() {
		assert_eq!(
			"Bing".parse::<TrackerPlatform>().unwrap(),
			TrackerPlatform::Microsoft
		);
		assert!("myspace".parse::<TrackerPlatform>().is_err());
	}

	#[test]
	fn platform_json_matches_from_str() {
		let parsed: TrackerPlatform = serde_json::from_str("\"Bing\"").unwrap();
		assert_eq!(parsed, TrackerPlatform::Microsoft);
		let parsed: TrackerPlatform = serde_json::from_str("\"GOOGLE\"").unwrap();
		assert_eq!(parsed, TrackerPlatform::Google);
		assert!(serde_json::from_str::<TrackerPlatform>("\"myspace\"").is_err());
		assert_eq!(
			serde_json::to_string(&TrackerPlatform::Linkedin).unwrap(),
			"\"linkedin\""
		);
	}
}
