// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event parameters and last-writer-wins merging.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single event parameter value.
///
/// Mirrors what analytics backends accept: strings, integers, floating-point
/// numbers and nested bundles. Serializes untagged, so a value renders as a
/// plain JSON string, number or object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	Str(String),
	Int(i64),
	Float(f64),
	Nested(ParameterSet),
}

impl ParamValue {
	/// Returns the string value, if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the integer value, if this is an integer.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Returns the value as a float. Integers are widened.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Float(f) => Some(*f),
			Self::Int(i) => Some(*i as f64),
			_ => None,
		}
	}

	/// Returns the nested bundle, if this is one.
	pub fn as_nested(&self) -> Option<&ParameterSet> {
		match self {
			Self::Nested(p) => Some(p),
			_ => None,
		}
	}

	/// True for values a backend would treat as missing: empty strings and
	/// non-finite floats.
	pub fn is_blank(&self) -> bool {
		match self {
			Self::Str(s) => s.is_empty(),
			Self::Float(f) => !f.is_finite(),
			Self::Int(_) | Self::Nested(_) => false,
		}
	}

	/// Converts the value into a `serde_json::Value`.
	///
	/// Non-finite floats become `null`.
	pub fn to_json(&self) -> Value {
		match self {
			Self::Str(s) => Value::String(s.clone()),
			Self::Int(i) => Value::from(*i),
			Self::Float(f) => serde_json::Number::from_f64(*f)
				.map(Value::Number)
				.unwrap_or(Value::Null),
			Self::Nested(p) => p.to_json(),
		}
	}
}

impl From<&str> for ParamValue {
	fn from(s: &str) -> Self {
		Self::Str(s.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(s: String) -> Self {
		Self::Str(s)
	}
}

impl From<&String> for ParamValue {
	fn from(s: &String) -> Self {
		Self::Str(s.clone())
	}
}

macro_rules! impl_from_int {
	($($t:ty),*) => {
		$(
			impl From<$t> for ParamValue {
				fn from(i: $t) -> Self {
					Self::Int(i64::from(i))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for ParamValue {
	fn from(f: f64) -> Self {
		Self::Float(f)
	}
}

impl From<f32> for ParamValue {
	fn from(f: f32) -> Self {
		Self::Float(f64::from(f))
	}
}

impl From<ParameterSet> for ParamValue {
	fn from(p: ParameterSet) -> Self {
		Self::Nested(p)
	}
}

/// A key-value bundle attached to an event.
///
/// Keys are unique; inserting an existing key replaces its value. Iteration
/// order is sorted by key so rendered output is stable.
///
/// # Example
///
/// ```
/// use beacon_analytics_core::ParameterSet;
///
/// let params = ParameterSet::new()
///     .insert("item_name", "Shoe")
///     .insert("quantity", 2)
///     .insert("value", 49.99);
/// assert_eq!(params.get_str("item_name"), Some("Shoe"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
	inner: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self {
			inner: BTreeMap::new(),
		}
	}

	/// Inserts a key-value pair, builder style.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<ParamValue>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Inserts a key-value pair in place, returning the replaced value.
	pub fn set<K, V>(&mut self, key: K, value: V) -> Option<ParamValue>
	where
		K: Into<String>,
		V: Into<ParamValue>,
	{
		self.inner.insert(key.into(), value.into())
	}

	/// Removes a key, returning its value.
	pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
		self.inner.remove(key)
	}

	/// Merges another set into this one.
	///
	/// If both contain the same key, the value from `other` takes precedence.
	pub fn merge(mut self, other: ParameterSet) -> Self {
		self.inner.extend(other.inner);
		self
	}

	/// Copies every entry of `other` into this set, overwriting on collision.
	pub fn merge_from(&mut self, other: &ParameterSet) {
		for (k, v) in &other.inner {
			self.inner.insert(k.clone(), v.clone());
		}
	}

	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.inner.get(key)
	}

	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(ParamValue::as_str)
	}

	pub fn get_i64(&self, key: &str) -> Option<i64> {
		self.get(key).and_then(ParamValue::as_i64)
	}

	pub fn get_f64(&self, key: &str) -> Option<f64> {
		self.get(key).and_then(ParamValue::as_f64)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
		self.inner.iter()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.inner.keys().map(String::as_str)
	}

	/// Converts the set into a JSON object.
	pub fn to_json(&self) -> Value {
		Value::Object(
			self.inner
				.iter()
				.map(|(k, v)| (k.clone(), v.to_json()))
				.collect(),
		)
	}
}

/// Merges `overrides` on top of `base` without touching either input.
///
/// Every key of `base` is kept unless `overrides` carries the same key, in
/// which case the override wins. Chaining is associative in a fixed
/// left-to-right order but not commutative.
pub fn merge(base: &ParameterSet, overrides: &ParameterSet) -> ParameterSet {
	let mut merged = base.clone();
	merged.merge_from(overrides);
	merged
}

impl From<ParameterSet> for Value {
	fn from(params: ParameterSet) -> Self {
		params.to_json()
	}
}

impl From<BTreeMap<String, ParamValue>> for ParameterSet {
	fn from(inner: BTreeMap<String, ParamValue>) -> Self {
		Self { inner }
	}
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl IntoIterator for ParameterSet {
	type Item = (String, ParamValue);
	type IntoIter = btree_map::IntoIter<String, ParamValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.into_iter()
	}
}

impl<'a> IntoIterator for &'a ParameterSet {
	type Item = (&'a String, &'a ParamValue);
	type IntoIter = btree_map::Iter<'a, String, ParamValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.iter()
	}
}
