// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `key=value` parameter arguments.

use beacon_analytics::{ParamValue, ParameterSet};

/// Parses one `key=value` argument.
///
/// Values that parse as integers become integers, then finite floats, and
/// everything else stays a string. Only the first `=` separates key from value.
pub fn parse_param(arg: &str) -> Result<(String, ParamValue), String> {
	let (key, value) = arg
		.split_once('=')
		.ok_or_else(|| format!("expected key=value, got '{arg}'"))?;
	let key = key.trim();
	if key.is_empty() {
		return Err(format!("empty key in '{arg}'"));
	}
	Ok((key.to_string(), infer_value(value)))
}

fn infer_value(raw: &str) -> ParamValue {
	if let Ok(int) = raw.parse::<i64>() {
		return ParamValue::Int(int);
	}
	match raw.parse::<f64>() {
		Ok(float) if float.is_finite() => ParamValue::Float(float),
		_ => ParamValue::Str(raw.to_string()),
	}
}

pub fn collect(params: Vec<(String, ParamValue)>) -> ParameterSet {
	params.into_iter().collect()
}
