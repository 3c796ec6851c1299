// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! App lifecycle and account events.

use beacon_analytics_core::{keys, EventKind, ParameterSet, TrackError};

use super::{emit, require, require_optional, try_emit};
use crate::dispatcher::Analytics;

/// The app was opened.
pub fn opened(analytics: &Analytics, extra: Option<&ParameterSet>) {
	emit(
		analytics,
		EventKind::AppOpen,
		Ok(ParameterSet::new()),
		extra,
	);
}

/// A user logged in with `method` (e.g. `"email"`, `"google"`).
pub fn logged_in(analytics: &Analytics, method: &str, extra: Option<&ParameterSet>) {
	emit(analytics, EventKind::Login, with_method(method), extra);
}

/// Like [`logged_in`], but reports why the event was not tracked.
pub fn try_logged_in(
	analytics: &Analytics,
	method: &str,
	extra: Option<&ParameterSet>,
) -> Result<(), TrackError> {
	try_emit(analytics, EventKind::Login, with_method(method), extra)
}

/// A user signed up with `method`.
pub fn signed_up(analytics: &Analytics, method: &str, extra: Option<&ParameterSet>) {
	emit(analytics, EventKind::SignUp, with_method(method), extra);
}

fn with_method(method: &str) -> Result<ParameterSet, TrackError> {
	require(keys::METHOD, method)?;
	Ok(ParameterSet::new().insert(keys::METHOD, method))
}

/// Content shared through some channel.
#[derive(Debug, Clone)]
pub struct Share {
	pub method: String,
	pub content_type: Option<String>,
	pub item_id: Option<String>,
	pub extra: ParameterSet,
}

impl Share {
	pub fn new(method: impl Into<String>) -> Self {
		Self {
			method: method.into(),
			content_type: None,
			item_id: None,
			extra: ParameterSet::new(),
		}
	}

	pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	pub fn item_id(mut self, item_id: impl Into<String>) -> Self {
		self.item_id = Some(item_id.into());
		self
	}

	pub fn extra(mut self, extra: ParameterSet) -> Self {
		self.extra = extra;
		self
	}

	fn canonical(&self) -> Result<ParameterSet, TrackError> {
		require(keys::METHOD, &self.method)?;
		require_optional(keys::CONTENT_TYPE, self.content_type.as_deref())?;
		require_optional(keys::ITEM_ID, self.item_id.as_deref())?;

		let mut params = ParameterSet::new().insert(keys::METHOD, self.method.as_str());
		if let Some(content_type) = &self.content_type {
			params.set(keys::CONTENT_TYPE, content_type);
		}
		if let Some(item_id) = &self.item_id {
			params.set(keys::ITEM_ID, item_id);
		}
		Ok(params)
	}
}

/// Content was shared.
pub fn shared(analytics: &Analytics, share: Share) {
	emit(
		analytics,
		EventKind::Share,
		share.canonical(),
		Some(&share.extra),
	);
}
