// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Events that carry their own name, time and parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::params::{ParamValue, ParameterSet};

/// Something that can be handed to the dispatcher as a whole.
///
/// When `time` is present it is sent as the event's `time` parameter in place
/// of the moment the event is tracked.
pub trait TrackableEvent {
	fn name(&self) -> &str;

	fn time(&self) -> Option<DateTime<Utc>>;

	fn params(&self) -> Option<&ParameterSet>;
}

/// A plain event built up by the caller.
///
/// # Example
///
/// ```
/// use beacon_analytics_core::{SimpleEvent, TrackableEvent};
///
/// let event = SimpleEvent::new("level_up")
///     .with_param("character", "warrior")
///     .with_param("level", 5);
/// assert_eq!(event.name(), "level_up");
/// assert!(event.time().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleEvent {
	name: String,
	time: Option<DateTime<Utc>>,
	#[serde(default)]
	params: ParameterSet,
}

impl SimpleEvent {
	/// Creates an event stamped with the current time.
	pub fn new(name: impl Into<String>) -> Self {
		Self::at(name, Utc::now())
	}

	/// Creates an event stamped with `time`.
	pub fn at(name: impl Into<String>, time: DateTime<Utc>) -> Self {
		Self {
			name: name.into(),
			time: Some(time),
			params: ParameterSet::new(),
		}
	}

	/// Creates an event without a time; it is stamped when tracked.
	pub fn untimed(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			time: None,
			params: ParameterSet::new(),
		}
	}

	pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
		self.time = Some(time);
		self
	}

	/// Merges `params` into the event's parameters; incoming values win.
	pub fn with_params(mut self, params: ParameterSet) -> Self {
		self.params = self.params.merge(params);
		self
	}

	/// Sets one parameter.
	///
	/// Empty keys and empty string values are ignored.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		let key = key.into();
		let value = value.into();
		if key.is_empty() || matches!(&value, ParamValue::Str(s) if s.is_empty()) {
			return self;
		}
		self.params.set(key, value);
		self
	}
}

impl TrackableEvent for SimpleEvent {
	fn name(&self) -> &str {
		&self.name
	}

	fn time(&self) -> Option<DateTime<Utc>> {
		self.time
	}

	fn params(&self) -> Option<&ParameterSet> {
		Some(&self.params)
	}
}
