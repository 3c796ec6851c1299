// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content and screen view events.

use beacon_analytics_core::{keys, EventKind, ParameterSet, TrackError};

use super::{emit, require, require_optional, try_emit};
use crate::dispatcher::Analytics;

/// A single item the user looked at.
///
/// `id` defaults to the item name when not given.
#[derive(Debug, Clone)]
pub struct ViewItem {
	pub name: String,
	pub id: Option<String>,
	pub category: Option<String>,
	pub extra: ParameterSet,
}

impl ViewItem {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			id: None,
			category: None,
			extra: ParameterSet::new(),
		}
	}

	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}

	pub fn extra(mut self, extra: ParameterSet) -> Self {
		self.extra = extra;
		self
	}

	fn canonical(&self) -> Result<ParameterSet, TrackError> {
		require(keys::ITEM_NAME, &self.name)?;
		require_optional(keys::ITEM_ID, self.id.as_deref())?;
		require_optional(keys::ITEM_CATEGORY, self.category.as_deref())?;

		let mut params = ParameterSet::new()
			.insert(keys::ITEM_NAME, self.name.as_str())
			.insert(keys::ITEM_ID, self.id.as_deref().unwrap_or(&self.name));
		if let Some(category) = &self.category {
			params.set(keys::ITEM_CATEGORY, category);
		}
		Ok(params)
	}
}

/// The user viewed an item.
pub fn item(analytics: &Analytics, item: ViewItem) {
	emit(
		analytics,
		EventKind::ViewItem,
		item.canonical(),
		Some(&item.extra),
	);
}

/// Like [`item`], but reports why the event was not tracked.
pub fn try_item(analytics: &Analytics, item: ViewItem) -> Result<(), TrackError> {
	try_emit(
		analytics,
		EventKind::ViewItem,
		item.canonical(),
		Some(&item.extra),
	)
}

/// The user viewed a list of items in `category`.
pub fn item_list(analytics: &Analytics, category: &str, extra: Option<&ParameterSet>) {
	let canonical = require(keys::ITEM_CATEGORY, category)
		.map(|()| ParameterSet::new().insert(keys::ITEM_CATEGORY, category));
	emit(analytics, EventKind::ViewItemList, canonical, extra);
}

/// A screen shown to the user.
#[derive(Debug, Clone)]
pub struct ScreenView {
	pub screen_name: String,
	pub screen_class: Option<String>,
	pub extra: ParameterSet,
}

impl ScreenView {
	pub fn new(screen_name: impl Into<String>) -> Self {
		Self {
			screen_name: screen_name.into(),
			screen_class: None,
			extra: ParameterSet::new(),
		}
	}

	pub fn screen_class(mut self, screen_class: impl Into<String>) -> Self {
		self.screen_class = Some(screen_class.into());
		self
	}

	pub fn extra(mut self, extra: ParameterSet) -> Self {
		self.extra = extra;
		self
	}

	fn canonical(&self) -> Result<ParameterSet, TrackError> {
		require(keys::SCREEN_NAME, &self.screen_name)?;
		require_optional(keys::SCREEN_CLASS, self.screen_class.as_deref())?;

		let mut params = ParameterSet::new().insert(keys::SCREEN_NAME, self.screen_name.as_str());
		if let Some(screen_class) = &self.screen_class {
			params.set(keys::SCREEN_CLASS, screen_class);
		}
		Ok(params)
	}
}

/// The user viewed a screen.
///
/// Only the `screen_view` event is tracked; use
/// [`Analytics::set_current_screen`] to also update the sink's notion of the
/// current screen.
pub fn screen(analytics: &Analytics, view: ScreenView) {
	emit(
		analytics,
		EventKind::ScreenView,
		view.canonical(),
		Some(&view.extra),
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::events::test_analytics;

	#[test]
	fn test_item_id_defaults_to_name() {
		let (analytics, sink) = test_analytics();
		item(&analytics, ViewItem::new("Shoe").category("Footwear"));

		let (name, params) = &sink.events()[0];
		assert_eq!(name, "view_item");
		assert_eq!(params.get_str(keys::ITEM_NAME), Some("Shoe"));
		assert_eq!(params.get_str(keys::ITEM_CATEGORY), Some("Footwear"));
		assert_eq!(params.get_str(keys::ITEM_ID), Some("Shoe"));
	}

	#[test]
	fn test_item_with_explicit_id_and_no_category() {
		let (analytics, sink) = test_analytics();
		item(&analytics, ViewItem::new("Shoe").id("sku-991"));

		let (_, params) = &sink.events()[0];
		assert_eq!(params.get_str(keys::ITEM_ID), Some("sku-991"));
		assert!(!params.contains_key(keys::ITEM_CATEGORY));
	}

	#[test]
	fn test_item_rejects_empty_fields() {
		let (analytics, sink) = test_analytics();
		item(&analytics, ViewItem::new(""));
		item(&analytics, ViewItem::new("Shoe").category(""));
		item(&analytics, ViewItem::new("Shoe").id(""));
		assert!(sink.is_empty());
	}

	#[test]
	fn test_item_extra_wins() {
		let (analytics, sink) = test_analytics();
		item(
			&analytics,
			ViewItem::new("Shoe").extra(ParameterSet::new().insert(keys::ITEM_ID, "sku-1")),
		);
		assert_eq!(sink.events()[0].1.get_str(keys::ITEM_ID), Some("sku-1"));
	}

	#[test]
	fn test_try_item_reports_invalid_category() {
		let (analytics, sink) = test_analytics();
		assert!(matches!(
			try_item(&analytics, ViewItem::new("Shoe").category("")),
			Err(TrackError::InvalidArgument { field, .. }) if field == keys::ITEM_CATEGORY
		));
		assert!(try_item(&analytics, ViewItem::new("Shoe")).is_ok());
		assert_eq!(sink.events().len(), 1);
	}

	#[test]
	fn test_item_list() {
		let (analytics, sink) = test_analytics();
		item_list(&analytics, "Footwear", None);
		item_list(&analytics, "", None);

		let events = sink.events();
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].0, "view_item_list");
		assert_eq!(events[0].1.get_str(keys::ITEM_CATEGORY), Some("Footwear"));
	}

	#[test]
	fn test_screen() {
		let (analytics, sink) = test_analytics();
		screen(&analytics, ScreenView::new("Checkout").screen_class("CheckoutView"));
		screen(&analytics, ScreenView::new(""));

		let events = sink.events();
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].0, "screen_view");
		assert_eq!(events[0].1.get_str(keys::SCREEN_NAME), Some("Checkout"));
		assert_eq!(events[0].1.get_str(keys::SCREEN_CLASS), Some("CheckoutView"));
	}
}
