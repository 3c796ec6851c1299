// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The analytics backend seam.
//!
//! A [`Sink`] is the client that actually transmits events. The dispatcher
//! owns one and forwards each tracked event to it exactly once. Delivery,
//! buffering and retries are the sink's business.

use std::io::Write;
use std::sync::Arc;

use beacon_analytics_core::ParameterSet;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;

/// An analytics backend client.
///
/// Implementations must not block for long: calls are made synchronously on
/// whatever thread tracked the event.
pub trait Sink: Send + Sync {
	/// Records a named event with its merged parameters.
	fn log_event(&self, name: &str, params: &ParameterSet);

	/// Associates subsequent events with a user.
	fn set_user_id(&self, id: &str);

	/// Sets a user property. An empty value clears it.
	fn set_user_property(&self, key: &str, value: &str);

	/// Reports the screen currently shown to the user.
	fn set_current_screen(&self, screen_name: &str, screen_class: Option<&str>);
}

/// Type alias for a shared sink.
pub type SharedSink = Arc<dyn Sink>;

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl Sink for NoOpSink {
	fn log_event(&self, _name: &str, _params: &ParameterSet) {}

	fn set_user_id(&self, _id: &str) {}

	fn set_user_property(&self, _key: &str, _value: &str) {}

	fn set_current_screen(&self, _screen_name: &str, _screen_class: Option<&str>) {}
}

/// One call received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkCall {
	LogEvent {
		name: String,
		params: ParameterSet,
	},
	SetUserId {
		id: String,
	},
	SetUserProperty {
		key: String,
		value: String,
	},
	SetCurrentScreen {
		screen_name: String,
		screen_class: Option<String>,
	},
}

/// A sink that remembers every call, for tests and local inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
	calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// All calls received so far, oldest first.
	pub fn calls(&self) -> Vec<SinkCall> {
		self.calls.lock().clone()
	}

	/// Only the `log_event` calls, as `(name, params)` pairs.
	pub fn events(&self) -> Vec<(String, ParameterSet)> {
		self.calls
			.lock()
			.iter()
			.filter_map(|call| match call {
				SinkCall::LogEvent { name, params } => Some((name.clone(), params.clone())),
				_ => None,
			})
			.collect()
	}

	pub fn len(&self) -> usize {
		self.calls.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.calls.lock().is_empty()
	}

	pub fn clear(&self) {
		self.calls.lock().clear();
	}

	fn record(&self, call: SinkCall) {
		self.calls.lock().push(call);
	}
}

impl Sink for RecordingSink {
	fn log_event(&self, name: &str, params: &ParameterSet) {
		self.record(SinkCall::LogEvent {
			name: name.to_string(),
			params: params.clone(),
		});
	}

	fn set_user_id(&self, id: &str) {
		self.record(SinkCall::SetUserId { id: id.to_string() });
	}

	fn set_user_property(&self, key: &str, value: &str) {
		self.record(SinkCall::SetUserProperty {
			key: key.to_string(),
			value: value.to_string(),
		});
	}

	fn set_current_screen(&self, screen_name: &str, screen_class: Option<&str>) {
		self.record(SinkCall::SetCurrentScreen {
			screen_name: screen_name.to_string(),
			screen_class: screen_class.map(str::to_string),
		});
	}
}

/// A sink that writes each call as one JSON object per line.
///
/// Write failures are logged and otherwise ignored.
pub struct JsonLinesSink<W> {
	writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
	pub fn new(writer: W) -> Self {
		Self {
			writer: Mutex::new(writer),
		}
	}

	/// Consumes the sink and returns the underlying writer.
	pub fn into_inner(self) -> W {
		self.writer.into_inner()
	}

	fn write(&self, call: &SinkCall) {
		let mut writer = self.writer.lock();
		let result = serde_json::to_writer(&mut *writer, call)
			.map_err(std::io::Error::from)
			.and_then(|()| writer.write_all(b"\n"))
			.and_then(|()| writer.flush());
		if let Err(e) = result {
			warn!(error = %e, "Failed to write analytics record");
		}
	}
}

impl<W: Write + Send> Sink for JsonLinesSink<W> {
	fn log_event(&self, name: &str, params: &ParameterSet) {
		self.write(&SinkCall::LogEvent {
			name: name.to_string(),
			params: params.clone(),
		});
	}

	fn set_user_id(&self, id: &str) {
		self.write(&SinkCall::SetUserId { id: id.to_string() });
	}

	fn set_user_property(&self, key: &str, value: &str) {
		self.write(&SinkCall::SetUserProperty {
			key: key.to_string(),
			value: value.to_string(),
		});
	}

	fn set_current_screen(&self, screen_name: &str, screen_class: Option<&str>) {
		self.write(&SinkCall::SetCurrentScreen {
			screen_name: screen_name.to_string(),
			screen_class: screen_class.map(str::to_string),
		});
	}
}
