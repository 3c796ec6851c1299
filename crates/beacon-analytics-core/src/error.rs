// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for analytics core operations.

use thiserror::Error;

/// Why a track call did not reach the sink.
///
/// Tracking is fire-and-forget: the dispatcher reports these through
/// `tracing` and returns normally. They only surface to callers that opt in
/// through `try_track`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
	/// No sink has been initialized, or it has been disposed.
	#[error("analytics is not initialized")]
	NotReady,

	/// A required argument was empty or not a usable number.
	#[error("invalid argument `{field}`: {reason}")]
	InvalidArgument { field: String, reason: String },
}

impl TrackError {
	/// Create an invalid argument error.
	pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::InvalidArgument {
			field: field.into(),
			reason: reason.into(),
		}
	}

	/// Shorthand for a required field that was empty.
	pub fn empty(field: impl Into<String>) -> Self {
		Self::invalid(field, "must not be empty")
	}
}

/// Errors from looking up the event catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
	#[error("unknown event kind: {0}")]
	UnknownEvent(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_messages() {
		assert_eq!(
			TrackError::NotReady.to_string(),
			"analytics is not initialized"
		);
		assert_eq!(
			TrackError::empty("method").to_string(),
			"invalid argument `method`: must not be empty"
		);
		assert_eq!(
			CatalogError::UnknownEvent("nope".to_string()).to_string(),
			"unknown event kind: nope"
		);
	}
}
