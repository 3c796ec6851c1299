// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Onboarding tutorial events.

use beacon_analytics_core::{EventKind, ParameterSet};

use super::emit;
use crate::dispatcher::Analytics;

pub fn begin(analytics: &Analytics, extra: Option<&ParameterSet>) {
	emit(
		analytics,
		EventKind::TutorialBegin,
		Ok(ParameterSet::new()),
		extra,
	);
}

pub fn complete(analytics: &Analytics, extra: Option<&ParameterSet>) {
	emit(
		analytics,
		EventKind::TutorialComplete,
		Ok(ParameterSet::new()),
		extra,
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::events::test_analytics;

	#[test]
	fn test_begin_and_complete() {
		let (analytics, sink) = test_analytics();
		begin(&analytics, None);
		complete(&analytics, Some(&ParameterSet::new().insert("steps", 4)));

		let events = sink.events();
		assert_eq!(events[0].0, "tutorial_begin");
		assert_eq!(events[1].0, "tutorial_complete");
		assert_eq!(events[1].1.get_i64("steps"), Some(4));
	}
}
