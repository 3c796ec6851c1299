// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Canonical parameter keys.
//!
//! The names follow the conventions analytics backends already understand, so
//! events built here render in their stock reports without mapping.

/// Timezone identifier of the host, attached to every event.
pub const TIMEZONE: &str = "timezone";
/// Event time in milliseconds since the Unix epoch, attached to every event.
pub const TIME: &str = "time";
/// Channel the event originated from, attached to every event.
pub const MEDIUM: &str = "medium";

pub const METHOD: &str = "method";
pub const CONTENT_TYPE: &str = "content_type";
pub const ITEM_ID: &str = "item_id";
pub const ITEM_NAME: &str = "item_name";
pub const ITEM_CATEGORY: &str = "item_category";
pub const QUANTITY: &str = "quantity";
pub const VALUE: &str = "value";
pub const CURRENCY: &str = "currency";
pub const COUPON: &str = "coupon";
pub const TAX: &str = "tax";
pub const SHIPPING: &str = "shipping";
pub const TRANSACTION_ID: &str = "transaction_id";
pub const CHECKOUT_STEP: &str = "checkout_step";
pub const CHECKOUT_OPTION: &str = "checkout_option";
pub const ACTION: &str = "action";
pub const SCREEN_NAME: &str = "screen_name";
pub const SCREEN_CLASS: &str = "screen_class";
