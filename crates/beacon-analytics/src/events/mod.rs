// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Convenience calls for the canonical events.
//!
//! Each call validates its arguments, builds the canonical parameters for its
//! [`EventKind`], merges the caller's extra parameters on top (the caller
//! always wins on a key collision), checks the kind's required keys and hands
//! the result to [`Analytics::track`]. Invalid arguments drop the event with a
//! `debug` diagnostic. The `try_` variants return the [`TrackError`] instead,
//! for callers that must report it.
//!
//! | Module | Events |
//! |--------|--------|
//! | [`app`] | `app_open`, `login`, `sign_up`, `share` |
//! | [`tutorial`] | `tutorial_begin`, `tutorial_complete` |
//! | [`view`] | `view_item`, `view_item_list`, `screen_view` |
//! | [`ecommerce`] | `add_to_wishlist`, `begin_checkout`, `checkout_progress`, `ecommerce_purchase` |
//! | [`action`] | `action_performed` |

pub mod action;
pub mod app;
pub mod ecommerce;
pub mod tutorial;
pub mod view;

use beacon_analytics_core::{EventKind, ParameterSet, TrackError};
use tracing::debug;

use crate::dispatcher::Analytics;

/// Merges `extra` over `canonical` and checks the kind's required keys.
pub fn prepare(
	kind: EventKind,
	canonical: ParameterSet,
	extra: Option<&ParameterSet>,
) -> Result<ParameterSet, TrackError> {
	let mut params = canonical;
	if let Some(extra) = extra {
		params.merge_from(extra);
	}
	kind.descriptor().validate(&params)?;
	Ok(params)
}

/// Tracks a catalog event from caller-built parameters.
///
/// The parameters must already carry the kind's required keys.
pub fn track_kind(analytics: &Analytics, kind: EventKind, params: &ParameterSet) {
	emit(analytics, kind, Ok(ParameterSet::new()), Some(params));
}

pub(crate) fn try_emit(
	analytics: &Analytics,
	kind: EventKind,
	canonical: Result<ParameterSet, TrackError>,
	extra: Option<&ParameterSet>,
) -> Result<(), TrackError> {
	let params = prepare(kind, canonical?, extra)?;
	analytics.try_track(kind.name(), Some(&params))
}

pub(crate) fn emit(
	analytics: &Analytics,
	kind: EventKind,
	canonical: Result<ParameterSet, TrackError>,
	extra: Option<&ParameterSet>,
) {
	if let Err(e) = try_emit(analytics, kind, canonical, extra) {
		debug!(event = kind.name(), error = %e, "Analytics event not tracked");
	}
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), TrackError> {
	if value.is_empty() {
		Err(TrackError::empty(field))
	} else {
		Ok(())
	}
}

/// An optional string may be omitted, but not supplied empty.
pub(crate) fn require_optional(field: &'static str, value: Option<&str>) -> Result<(), TrackError> {
	value.map_or(Ok(()), |v| require(field, v))
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), TrackError> {
	if value.is_finite() {
		Ok(())
	} else {
		Err(TrackError::invalid(field, "must be a finite number"))
	}
}

pub(crate) fn require_positive(field: &'static str, value: u32) -> Result<(), TrackError> {
	if value == 0 {
		Err(TrackError::invalid(field, "must be at least 1"))
	} else {
		Ok(())
	}
}

#[cfg(test)]
pub(crate) fn test_analytics() -> (Analytics, std::sync::Arc<crate::sink::RecordingSink>) {
	use std::sync::Arc;

	use chrono::{TimeZone, Utc};

	use crate::config::AnalyticsConfig;
	use crate::environment::FixedEnvironment;
	use crate::sink::{RecordingSink, SharedSink};

	let now = Utc.with_ymd_and_hms(2024, 5, 17, 9, 0, 0).unwrap();
	let analytics = Analytics::with_environment(
		AnalyticsConfig {
			medium: "test".to_string(),
			..Default::default()
		},
		Arc::new(FixedEnvironment::new("UTC", now)),
	);
	let sink = Arc::new(RecordingSink::new());
	let shared: SharedSink = sink.clone();
	analytics.initialize(|| shared);
	(analytics, sink)
}

#[cfg(test)]
mod tests {
	use super::*;
	use beacon_analytics_core::keys;

	#[test]
	fn test_prepare_caller_wins() {
		let canonical = ParameterSet::new().insert(keys::METHOD, "email");
		let extra = ParameterSet::new()
			.insert(keys::METHOD, "google")
			.insert("referrer", "ad");

		let params = prepare(EventKind::Login, canonical, Some(&extra)).unwrap();
		assert_eq!(params.get_str(keys::METHOD), Some("google"));
		assert_eq!(params.get_str("referrer"), Some("ad"));
	}

	#[test]
	fn test_prepare_revalidates_after_merge() {
		let canonical = ParameterSet::new().insert(keys::METHOD, "email");
		let extra = ParameterSet::new().insert(keys::METHOD, "");

		assert!(matches!(
			prepare(EventKind::Login, canonical, Some(&extra)),
			Err(TrackError::InvalidArgument { field, .. }) if field == keys::METHOD
		));
	}

	#[test]
	fn test_track_kind_validates_required_keys() {
		let (analytics, sink) = test_analytics();

		track_kind(&analytics, EventKind::ViewItemList, &ParameterSet::new());
		assert!(sink.is_empty());

		track_kind(
			&analytics,
			EventKind::ViewItemList,
			&ParameterSet::new().insert(keys::ITEM_CATEGORY, "Footwear"),
		);
		let events = sink.events();
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].0, "view_item_list");
	}

	#[test]
	fn test_require_helpers() {
		assert!(require("f", "x").is_ok());
		assert!(require("f", "").is_err());
		assert!(require_optional("f", None).is_ok());
		assert!(require_optional("f", Some("")).is_err());
		assert!(require_finite("f", 1.5).is_ok());
		assert!(require_finite("f", f64::NAN).is_err());
		assert!(require_positive("f", 0).is_err());
		assert!(require_positive("f", 1).is_ok());
	}
}
