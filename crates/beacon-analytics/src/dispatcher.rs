// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The event dispatcher.
//!
//! [`Analytics`] is the context object the host application builds once and
//! shares by reference or `Arc`. It owns the sink and the default parameters
//! behind a single lock and forwards every tracked event to the sink exactly
//! once. Nothing here returns an error to fire-and-forget callers: calls made
//! before [`Analytics::initialize`] or after [`Analytics::dispose`], or with
//! empty arguments, are dropped with a `debug` diagnostic.

use std::sync::Arc;

use beacon_analytics_core::{keys, ParamValue, ParameterSet, TrackError, TrackableEvent};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, trace};

use crate::config::AnalyticsConfig;
use crate::environment::{Environment, SystemEnvironment};
use crate::sink::SharedSink;

/// Lifecycle of an [`Analytics`] context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
	/// No sink; every call is a no-op.
	Uninitialized,
	/// A sink is installed and events are forwarded.
	Ready,
}

#[derive(Default)]
struct State {
	sink: Option<SharedSink>,
	defaults: ParameterSet,
}

/// Analytics context: sink, default parameters and environment.
pub struct Analytics {
	config: AnalyticsConfig,
	environment: Arc<dyn Environment>,
	state: RwLock<State>,
	// Serializes sink construction; `state` is never held while a factory runs.
	init: Mutex<()>,
}

impl Analytics {
	/// Creates an uninitialized context reading the process environment.
	pub fn new(config: AnalyticsConfig) -> Self {
		Self::with_environment(config, Arc::new(SystemEnvironment))
	}

	/// Creates an uninitialized context with an injected environment.
	pub fn with_environment(config: AnalyticsConfig, environment: Arc<dyn Environment>) -> Self {
		Self {
			config,
			environment,
			state: RwLock::new(State::default()),
			init: Mutex::new(()),
		}
	}

	pub fn config(&self) -> &AnalyticsConfig {
		&self.config
	}

	/// Installs the sink built by `factory`, unless one is already installed.
	///
	/// Returns the installed sink either way. `factory` runs at most once per
	/// initialization, even under concurrent callers, and runs without the
	/// state lock held. A factory must not call `initialize` itself.
	pub fn initialize<F>(&self, factory: F) -> SharedSink
	where
		F: FnOnce() -> SharedSink,
	{
		if let Some(sink) = self.sink() {
			return sink;
		}

		let _init = self.init.lock();
		if let Some(sink) = self.sink() {
			return sink;
		}

		// The factory may call back into this context.
		let sink = factory();
		let mut state = self.state.write();
		state.sink = Some(Arc::clone(&sink));
		state.defaults = self.seed_defaults();

		info!(
			medium = %self.config.medium,
			default_params = state.defaults.len(),
			"Analytics initialized"
		);
		sink
	}

	/// The installed sink, if any.
	pub fn sink(&self) -> Option<SharedSink> {
		self.state.read().sink.clone()
	}

	pub fn state(&self) -> DispatcherState {
		if self.state.read().sink.is_some() {
			DispatcherState::Ready
		} else {
			DispatcherState::Uninitialized
		}
	}

	pub fn is_ready(&self) -> bool {
		self.state() == DispatcherState::Ready
	}

	/// Drops the sink and the default parameters.
	///
	/// The context can be initialized again afterwards.
	pub fn dispose(&self) {
		let mut state = self.state.write();
		if state.sink.take().is_some() {
			info!("Analytics disposed");
		}
		state.defaults = ParameterSet::new();
	}

	/// Adds a parameter attached to every subsequent event.
	///
	/// Ignored unless the context is ready; defaults are reseeded on each
	/// initialization.
	pub fn set_default_param(&self, key: impl Into<String>, value: impl Into<ParamValue>) {
		let key = key.into();
		let mut state = self.state.write();
		if state.sink.is_none() {
			debug!(key = %key, error = %TrackError::NotReady, "Default parameter not set");
			return;
		}
		if key.is_empty() {
			debug!(error = %TrackError::empty("key"), "Default parameter not set");
			return;
		}
		state.defaults.set(key, value);
	}

	/// Removes a default parameter.
	pub fn remove_default_param(&self, key: &str) -> Option<ParamValue> {
		self.state.write().defaults.remove(key)
	}

	/// Default parameters stamped with the current timezone and time.
	///
	/// `timezone` and `time` are computed on every call and override stored
	/// values of the same name.
	pub fn default_parameters(&self) -> ParameterSet {
		let defaults = self.state.read().defaults.clone();
		self.stamp(defaults)
	}

	/// Forwards an event to the sink, reporting why it was dropped.
	///
	/// `params` are merged over the default parameters, so callers can
	/// override any default including `time`.
	pub fn try_track(&self, name: &str, params: Option<&ParameterSet>) -> Result<(), TrackError> {
		if name.is_empty() {
			return Err(TrackError::empty("event_name"));
		}

		let (sink, defaults) = {
			let state = self.state.read();
			let sink = state.sink.clone().ok_or(TrackError::NotReady)?;
			(sink, state.defaults.clone())
		};

		let mut merged = self.stamp(defaults);
		if let Some(params) = params {
			merged.merge_from(params);
		}

		sink.log_event(name, &merged);

		if self.is_debug() {
			debug!(event = name, params = ?merged, "Tracked analytics event");
		} else {
			trace!(event = name, "Tracked analytics event");
		}
		Ok(())
	}

	/// Forwards an event to the sink; drops it silently when that is not possible.
	pub fn track(&self, name: &str, params: Option<&ParameterSet>) {
		if let Err(e) = self.try_track(name, params) {
			debug!(event = name, error = %e, "Analytics event not tracked");
		}
	}

	/// Tracks a self-describing event.
	///
	/// The event's time, when present, becomes the `time` parameter; the
	/// event's own params are merged on top of it.
	pub fn try_track_event<E>(&self, event: &E) -> Result<(), TrackError>
	where
		E: TrackableEvent + ?Sized,
	{
		let mut params = ParameterSet::new();
		if let Some(time) = event.time() {
			params.set(keys::TIME, time.timestamp_millis());
		}
		if let Some(event_params) = event.params() {
			params.merge_from(event_params);
		}
		self.try_track(event.name(), Some(&params))
	}

	pub fn track_event<E>(&self, event: &E)
	where
		E: TrackableEvent + ?Sized,
	{
		if let Err(e) = self.try_track_event(event) {
			debug!(event = event.name(), error = %e, "Analytics event not tracked");
		}
	}

	/// Associates subsequent events with a user.
	pub fn set_user_identifier(&self, id: &str) {
		let result = self.ready_sink().and_then(|sink| {
			if id.is_empty() {
				return Err(TrackError::empty("id"));
			}
			sink.set_user_id(id);
			Ok(())
		});
		report("set_user_identifier", result);
	}

	/// Sets a user property. An empty value clears it.
	pub fn set_user_property(&self, key: &str, value: &str) {
		let result = self.ready_sink().and_then(|sink| {
			if key.is_empty() {
				return Err(TrackError::empty("key"));
			}
			sink.set_user_property(key, value);
			Ok(())
		});
		report("set_user_property", result);
	}

	/// Reports the screen currently shown to the user.
	pub fn set_current_screen(&self, screen_name: &str, screen_class: Option<&str>) {
		let result = self.ready_sink().and_then(|sink| {
			if screen_name.is_empty() {
				return Err(TrackError::empty(keys::SCREEN_NAME));
			}
			sink.set_current_screen(screen_name, screen_class);
			Ok(())
		});
		report("set_current_screen", result);
	}

	fn ready_sink(&self) -> Result<SharedSink, TrackError> {
		self.sink().ok_or(TrackError::NotReady)
	}

	fn is_debug(&self) -> bool {
		self.config
			.debug
			.unwrap_or_else(|| self.environment.is_debug())
	}

	fn seed_defaults(&self) -> ParameterSet {
		let mut defaults = self.config.default_params.clone();
		defaults.set(keys::MEDIUM, self.config.medium.as_str());
		defaults
	}

	fn stamp(&self, mut params: ParameterSet) -> ParameterSet {
		params.set(keys::TIMEZONE, self.environment.timezone());
		params.set(keys::TIME, self.environment.now().timestamp_millis());
		params
	}
}

fn report(operation: &'static str, result: Result<(), TrackError>) {
	if let Err(e) = result {
		debug!(operation, error = %e, "Analytics call dropped");
	}
}
