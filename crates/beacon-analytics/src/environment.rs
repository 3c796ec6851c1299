// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host environment facts attached to events.

use std::path::Path;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Timezone reported when the host's cannot be determined.
pub const FALLBACK_TIMEZONE: &str = "UTC";

/// Supplies the facts the dispatcher stamps onto every event.
pub trait Environment: Send + Sync {
	/// IANA identifier of the host timezone, e.g. `Africa/Dar_es_Salaam`.
	fn timezone(&self) -> String;

	/// Current wall-clock time.
	fn now(&self) -> DateTime<Utc>;

	/// Whether the host runs a debug build.
	fn is_debug(&self) -> bool;
}

/// Reads the environment of the running process.
///
/// The timezone comes from `TZ`, then `/etc/timezone`, and must name a zone
/// known to `chrono-tz`; anything else reports [`FALLBACK_TIMEZONE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
	fn timezone(&self) -> String {
		let from_env = std::env::var("TZ").ok();
		let from_file = || read_timezone_file(Path::new("/etc/timezone"));

		from_env
			.as_deref()
			.and_then(normalize_timezone)
			.or_else(|| from_file().as_deref().and_then(normalize_timezone))
			.unwrap_or_else(|| FALLBACK_TIMEZONE.to_string())
	}

	fn now(&self) -> DateTime<Utc> {
		Utc::now()
	}

	fn is_debug(&self) -> bool {
		cfg!(debug_assertions)
	}
}

fn read_timezone_file(path: &Path) -> Option<String> {
	std::fs::read_to_string(path).ok()
}

/// Trims a timezone value and checks it names a known zone.
///
/// Accepts the POSIX `:Area/City` form used in `TZ`.
pub fn normalize_timezone(raw: &str) -> Option<String> {
	let candidate = raw.trim().trim_start_matches(':');
	if candidate.is_empty() {
		return None;
	}
	candidate
		.parse::<Tz>()
		.ok()
		.map(|tz| tz.name().to_string())
}

/// An environment with pinned values, for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedEnvironment {
	pub timezone: String,
	pub now: DateTime<Utc>,
	pub debug: bool,
}

impl FixedEnvironment {
	pub fn new(timezone: impl Into<String>, now: DateTime<Utc>) -> Self {
		Self {
			timezone: timezone.into(),
			now,
			debug: false,
		}
	}

	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}
}

impl Environment for FixedEnvironment {
	fn timezone(&self) -> String {
		self.timezone.clone()
	}

	fn now(&self) -> DateTime<Utc> {
		self.now
	}

	fn is_debug(&self) -> bool {
		self.debug
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn test_normalize_timezone_accepts_known_zones() {
		assert_eq!(
			normalize_timezone("Africa/Dar_es_Salaam\n"),
			Some("Africa/Dar_es_Salaam".to_string())
		);
		assert_eq!(
			normalize_timezone(":Europe/Berlin"),
			Some("Europe/Berlin".to_string())
		);
		assert_eq!(normalize_timezone("UTC"), Some("UTC".to_string()));
	}

	#[test]
	fn test_normalize_timezone_rejects_garbage() {
		assert_eq!(normalize_timezone(""), None);
		assert_eq!(normalize_timezone("   "), None);
		assert_eq!(normalize_timezone("Not_A_Real_TZ"), None);
	}

	#[test]
	fn test_system_environment_timezone_is_valid() {
		let tz = SystemEnvironment.timezone();
		assert!(tz.parse::<Tz>().is_ok(), "unexpected timezone {tz}");
	}

	#[test]
	fn test_read_timezone_file_missing() {
		assert!(read_timezone_file(Path::new("/nonexistent/timezone")).is_none());
	}

	#[test]
	fn test_fixed_environment() {
		let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
		let env = FixedEnvironment::new("Africa/Nairobi", now).with_debug(true);
		assert_eq!(env.timezone(), "Africa/Nairobi");
		assert_eq!(env.now(), now);
		assert!(env.is_debug());
	}
}
