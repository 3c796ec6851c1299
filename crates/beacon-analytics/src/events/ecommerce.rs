// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shopping events: wishlist, checkout and purchase.
//!
//! Monetary events that carry a `value` always carry a `currency`; when the
//! caller does not name one, the configured default currency is used.

use beacon_analytics_core::{keys, EventKind, ParameterSet, TrackError};

use super::{emit, require, require_finite, require_optional, require_positive, try_emit};
use crate::dispatcher::Analytics;

/// Inserts `value` and `currency`, defaulting the currency.
fn insert_amount(
	params: &mut ParameterSet,
	value: f64,
	currency: Option<&str>,
	default_currency: &str,
) -> Result<(), TrackError> {
	require_finite(keys::VALUE, value)?;
	require_optional(keys::CURRENCY, currency)?;
	params.set(keys::VALUE, value);
	params.set(keys::CURRENCY, currency.unwrap_or(default_currency));
	Ok(())
}

/// An item added to the user's wishlist.
#[derive(Debug, Clone)]
pub struct AddToWishlist {
	pub item_name: String,
	/// Defaults to the item name.
	pub item_id: Option<String>,
	pub item_category: Option<String>,
	/// Defaults to 1.
	pub quantity: u32,
	pub value: Option<f64>,
	pub currency: Option<String>,
	pub extra: ParameterSet,
}

impl AddToWishlist {
	pub fn new(item_name: impl Into<String>) -> Self {
		Self {
			item_name: item_name.into(),
			item_id: None,
			item_category: None,
			quantity: 1,
			value: None,
			currency: None,
			extra: ParameterSet::new(),
		}
	}

	pub fn item_id(mut self, item_id: impl Into<String>) -> Self {
		self.item_id = Some(item_id.into());
		self
	}

	pub fn item_category(mut self, item_category: impl Into<String>) -> Self {
		self.item_category = Some(item_category.into());
		self
	}

	pub fn quantity(mut self, quantity: u32) -> Self {
		self.quantity = quantity;
		self
	}

	pub fn value(mut self, value: f64) -> Self {
		self.value = Some(value);
		self
	}

	pub fn currency(mut self, currency: impl Into<String>) -> Self {
		self.currency = Some(currency.into());
		self
	}

	pub fn extra(mut self, extra: ParameterSet) -> Self {
		self.extra = extra;
		self
	}

	fn canonical(&self, default_currency: &str) -> Result<ParameterSet, TrackError> {
		require(keys::ITEM_NAME, &self.item_name)?;
		require_optional(keys::ITEM_ID, self.item_id.as_deref())?;
		require_optional(keys::ITEM_CATEGORY, self.item_category.as_deref())?;
		require_positive(keys::QUANTITY, self.quantity)?;

		let mut params = ParameterSet::new()
			.insert(keys::ITEM_NAME, self.item_name.as_str())
			.insert(
				keys::ITEM_ID,
				self.item_id.as_deref().unwrap_or(&self.item_name),
			)
			.insert(keys::QUANTITY, self.quantity);
		if let Some(category) = &self.item_category {
			params.set(keys::ITEM_CATEGORY, category);
		}
		match self.value {
			Some(value) => insert_amount(
				&mut params,
				value,
				self.currency.as_deref(),
				default_currency,
			)?,
			None => {
				require_optional(keys::CURRENCY, self.currency.as_deref())?;
				if let Some(currency) = &self.currency {
					params.set(keys::CURRENCY, currency);
				}
			}
		}
		Ok(params)
	}
}

pub fn add_to_wishlist(analytics: &Analytics, item: AddToWishlist) {
	let canonical = item.canonical(&analytics.config().default_currency);
	emit(
		analytics,
		EventKind::AddToWishlist,
		canonical,
		Some(&item.extra),
	);
}

/// The start of a checkout.
#[derive(Debug, Clone, Default)]
pub struct BeginCheckout {
	pub value: Option<f64>,
	pub currency: Option<String>,
	pub coupon: Option<String>,
	pub extra: ParameterSet,
}

impl BeginCheckout {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn value(mut self, value: f64) -> Self {
		self.value = Some(value);
		self
	}

	pub fn currency(mut self, currency: impl Into<String>) -> Self {
		self.currency = Some(currency.into());
		self
	}

	pub fn coupon(mut self, coupon: impl Into<String>) -> Self {
		self.coupon = Some(coupon.into());
		self
	}

	pub fn extra(mut self, extra: ParameterSet) -> Self {
		self.extra = extra;
		self
	}

	fn canonical(&self, default_currency: &str) -> Result<ParameterSet, TrackError> {
		require_optional(keys::COUPON, self.coupon.as_deref())?;

		let mut params = ParameterSet::new();
		match self.value {
			Some(value) => insert_amount(
				&mut params,
				value,
				self.currency.as_deref(),
				default_currency,
			)?,
			None => {
				require_optional(keys::CURRENCY, self.currency.as_deref())?;
				if let Some(currency) = &self.currency {
					params.set(keys::CURRENCY, currency);
				}
			}
		}
		if let Some(coupon) = &self.coupon {
			params.set(keys::COUPON, coupon);
		}
		Ok(params)
	}
}

pub fn begin_checkout(analytics: &Analytics, checkout: BeginCheckout) {
	let canonical = checkout.canonical(&analytics.config().default_currency);
	emit(
		analytics,
		EventKind::BeginCheckout,
		canonical,
		Some(&checkout.extra),
	);
}

/// A step completed within a checkout.
#[derive(Debug, Clone)]
pub struct CheckoutProgress {
	/// One-based step number.
	pub step: u32,
	/// Choice made at this step, e.g. the shipping method.
	pub option: Option<String>,
	pub extra: ParameterSet,
}

impl CheckoutProgress {
	pub fn new(step: u32) -> Self {
		Self {
			step,
			option: None,
			extra: ParameterSet::new(),
		}
	}

	pub fn option(mut self, option: impl Into<String>) -> Self {
		self.option = Some(option.into());
		self
	}

	pub fn extra(mut self, extra: ParameterSet) -> Self {
		self.extra = extra;
		self
	}

	fn canonical(&self) -> Result<ParameterSet, TrackError> {
		require_positive(keys::CHECKOUT_STEP, self.step)?;
		require_optional(keys::CHECKOUT_OPTION, self.option.as_deref())?;

		let mut params = ParameterSet::new().insert(keys::CHECKOUT_STEP, self.step);
		if let Some(option) = &self.option {
			params.set(keys::CHECKOUT_OPTION, option);
		}
		Ok(params)
	}
}

pub fn checkout_progress(analytics: &Analytics, progress: CheckoutProgress) {
	emit(
		analytics,
		EventKind::CheckoutProgress,
		progress.canonical(),
		Some(&progress.extra),
	);
}

/// A completed purchase.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use beacon_analytics::events::ecommerce::{self, Purchase};
/// use beacon_analytics::{Analytics, AnalyticsConfig, RecordingSink, SharedSink};
///
/// let analytics = Analytics::new(AnalyticsConfig::default());
/// let sink = Arc::new(RecordingSink::new());
/// let shared: SharedSink = sink.clone();
/// analytics.initialize(|| shared);
///
/// ecommerce::purchase(&analytics, Purchase::new(20.20));
///
/// let (name, params) = &sink.events()[0];
/// assert_eq!(name, "ecommerce_purchase");
/// assert_eq!(params.get_str("currency"), Some("USD"));
/// ```
#[derive(Debug, Clone)]
pub struct Purchase {
	pub value: f64,
	/// Defaults to the configured currency.
	pub currency: Option<String>,
	pub transaction_id: Option<String>,
	pub coupon: Option<String>,
	pub tax: Option<f64>,
	pub shipping: Option<f64>,
	pub extra: ParameterSet,
}

impl Purchase {
	pub fn new(value: f64) -> Self {
		Self {
			value,
			currency: None,
			transaction_id: None,
			coupon: None,
			tax: None,
			shipping: None,
			extra: ParameterSet::new(),
		}
	}

	pub fn currency(mut self, currency: impl Into<String>) -> Self {
		self.currency = Some(currency.into());
		self
	}

	pub fn transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
		self.transaction_id = Some(transaction_id.into());
		self
	}

	pub fn coupon(mut self, coupon: impl Into<String>) -> Self {
		self.coupon = Some(coupon.into());
		self
	}

	pub fn tax(mut self, tax: f64) -> Self {
		self.tax = Some(tax);
		self
	}

	pub fn shipping(mut self, shipping: f64) -> Self {
		self.shipping = Some(shipping);
		self
	}

	pub fn extra(mut self, extra: ParameterSet) -> Self {
		self.extra = extra;
		self
	}

	fn canonical(&self, default_currency: &str) -> Result<ParameterSet, TrackError> {
		require_optional(keys::TRANSACTION_ID, self.transaction_id.as_deref())?;
		require_optional(keys::COUPON, self.coupon.as_deref())?;

		let mut params = ParameterSet::new();
		insert_amount(
			&mut params,
			self.value,
			self.currency.as_deref(),
			default_currency,
		)?;
		if let Some(transaction_id) = &self.transaction_id {
			params.set(keys::TRANSACTION_ID, transaction_id);
		}
		if let Some(coupon) = &self.coupon {
			params.set(keys::COUPON, coupon);
		}
		if let Some(tax) = self.tax {
			require_finite(keys::TAX, tax)?;
			params.set(keys::TAX, tax);
		}
		if let Some(shipping) = self.shipping {
			require_finite(keys::SHIPPING, shipping)?;
			params.set(keys::SHIPPING, shipping);
		}
		Ok(params)
	}
}

pub fn purchase(analytics: &Analytics, purchase: Purchase) {
	let canonical = purchase.canonical(&analytics.config().default_currency);
	emit(
		analytics,
		EventKind::Purchase,
		canonical,
		Some(&purchase.extra),
	);
}

/// Like [`purchase`], but reports why the event was not tracked.
pub fn try_purchase(analytics: &Analytics, purchase: Purchase) -> Result<(), TrackError> {
	let canonical = purchase.canonical(&analytics.config().default_currency);
	try_emit(
		analytics,
		EventKind::Purchase,
		canonical,
		Some(&purchase.extra),
	)
}
