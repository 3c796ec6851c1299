// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The static catalog of canonical events.
//!
//! Each [`EventKind`] maps to one [`EventDescriptor`] carrying the event name
//! sent to the sink and the parameter keys that must be present (and not
//! blank) for the event to be tracked.

use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, TrackError};
use crate::keys;
use crate::params::ParameterSet;

/// A semantic event kind with a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	AppOpen,
	Login,
	SignUp,
	Share,
	TutorialBegin,
	TutorialComplete,
	ViewItem,
	ViewItemList,
	AddToWishlist,
	BeginCheckout,
	CheckoutProgress,
	Purchase,
	ActionPerformed,
	ScreenView,
}

/// Canonical name and required parameter keys for an event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDescriptor {
	pub kind: EventKind,
	pub name: &'static str,
	pub required: &'static [&'static str],
}

const fn descriptor(
	kind: EventKind,
	name: &'static str,
	required: &'static [&'static str],
) -> EventDescriptor {
	EventDescriptor {
		kind,
		name,
		required,
	}
}

// Order matches `EventKind` declaration order; `EventKind::descriptor` indexes into it.
static CATALOG: [EventDescriptor; 14] = [
	descriptor(EventKind::AppOpen, "app_open", &[]),
	descriptor(EventKind::Login, "login", &[keys::METHOD]),
	descriptor(EventKind::SignUp, "sign_up", &[keys::METHOD]),
	descriptor(EventKind::Share, "share", &[keys::METHOD]),
	descriptor(EventKind::TutorialBegin, "tutorial_begin", &[]),
	descriptor(EventKind::TutorialComplete, "tutorial_complete", &[]),
	descriptor(
		EventKind::ViewItem,
		"view_item",
		&[keys::ITEM_ID, keys::ITEM_NAME],
	),
	descriptor(
		EventKind::ViewItemList,
		"view_item_list",
		&[keys::ITEM_CATEGORY],
	),
	descriptor(
		EventKind::AddToWishlist,
		"add_to_wishlist",
		&[keys::ITEM_ID, keys::ITEM_NAME, keys::QUANTITY],
	),
	descriptor(EventKind::BeginCheckout, "begin_checkout", &[]),
	descriptor(
		EventKind::CheckoutProgress,
		"checkout_progress",
		&[keys::CHECKOUT_STEP],
	),
	descriptor(
		EventKind::Purchase,
		"ecommerce_purchase",
		&[keys::CURRENCY, keys::VALUE],
	),
	descriptor(
		EventKind::ActionPerformed,
		"action_performed",
		&[keys::ACTION],
	),
	descriptor(EventKind::ScreenView, "screen_view", &[keys::SCREEN_NAME]),
];

/// Returns the full event catalog.
pub fn catalog() -> &'static [EventDescriptor] {
	&CATALOG
}

impl EventKind {
	/// All event kinds, in catalog order.
	pub const ALL: [EventKind; 14] = [
		EventKind::AppOpen,
		EventKind::Login,
		EventKind::SignUp,
		EventKind::Share,
		EventKind::TutorialBegin,
		EventKind::TutorialComplete,
		EventKind::ViewItem,
		EventKind::ViewItemList,
		EventKind::AddToWishlist,
		EventKind::BeginCheckout,
		EventKind::CheckoutProgress,
		EventKind::Purchase,
		EventKind::ActionPerformed,
		EventKind::ScreenView,
	];

	pub fn descriptor(self) -> &'static EventDescriptor {
		&CATALOG[self as usize]
	}

	/// Canonical event name sent to the sink.
	pub fn name(self) -> &'static str {
		self.descriptor().name
	}

	/// Looks up a kind by its canonical event name.
	pub fn from_name(name: &str) -> Option<Self> {
		CATALOG.iter().find(|d| d.name == name).map(|d| d.kind)
	}
}

impl EventDescriptor {
	/// Required keys that are absent or blank in `params`.
	pub fn missing_keys(&self, params: &ParameterSet) -> Vec<&'static str> {
		self.required
			.iter()
			.copied()
			.filter(|key| params.get(key).map_or(true, |v| v.is_blank()))
			.collect()
	}

	/// Checks that every required key is present and not blank.
	pub fn validate(&self, params: &ParameterSet) -> Result<(), TrackError> {
		match self.missing_keys(params).first() {
			Some(key) => Err(TrackError::invalid(
				*key,
				format!("required by `{}`", self.name),
			)),
			None => Ok(()),
		}
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for EventKind {
	type Err = CatalogError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_name(s).ok_or_else(|| CatalogError::UnknownEvent(s.to_string()))
	}
}
