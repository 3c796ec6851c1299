// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Generic user actions that have no dedicated event.

use beacon_analytics_core::{keys, EventKind, ParameterSet};

use super::{emit, require};
use crate::dispatcher::Analytics;

/// The user performed `action` (e.g. `"button_tapped"`).
pub fn performed(analytics: &Analytics, action: &str, extra: Option<&ParameterSet>) {
	let canonical = require(keys::ACTION, action)
		.map(|()| ParameterSet::new().insert(keys::ACTION, action));
	emit(analytics, EventKind::ActionPerformed, canonical, extra);
}
