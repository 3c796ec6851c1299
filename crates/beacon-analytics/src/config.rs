// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dispatcher configuration.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. TOML file (`$XDG_CONFIG_HOME/beacon/analytics.toml` unless a path is given)
//! 3. `BEACON_ANALYTICS_*` environment variables
//!
//! ```toml
//! medium = "desktop"
//! default_currency = "TZS"
//! debug = true
//!
//! [default_params]
//! app_version = "1.4.0"
//! build = 112
//! ```

use std::path::{Path, PathBuf};

use beacon_analytics_core::ParameterSet;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Currency attached to monetary events that do not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

pub const ENV_MEDIUM: &str = "BEACON_ANALYTICS_MEDIUM";
pub const ENV_CURRENCY: &str = "BEACON_ANALYTICS_CURRENCY";
pub const ENV_DEBUG: &str = "BEACON_ANALYTICS_DEBUG";

/// Settings for an [`Analytics`](crate::Analytics) context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
	/// Channel tag sent as the `medium` parameter of every event.
	pub medium: String,
	/// Three-letter currency code used when a monetary event omits one.
	pub default_currency: String,
	/// Log merged parameters of every event. Falls back to the environment's
	/// debug flag when unset.
	pub debug: Option<bool>,
	/// Static parameters attached to every event.
	pub default_params: ParameterSet,
}

impl Default for AnalyticsConfig {
	fn default() -> Self {
		Self {
			medium: std::env::consts::OS.to_string(),
			default_currency: DEFAULT_CURRENCY.to_string(),
			debug: None,
			default_params: ParameterSet::new(),
		}
	}
}

impl AnalyticsConfig {
	/// Parses a TOML document. Missing fields take their defaults.
	pub fn from_toml_str(content: &str, path: &Path) -> Result<Self> {
		toml::from_str(content).map_err(|source| ConfigError::TomlParse {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Loads a TOML file. A missing file yields the defaults.
	pub fn load(path: &Path) -> Result<Self> {
		if !path.exists() {
			tracing::debug!(path = %path.display(), "analytics config not found, using defaults");
			return Ok(Self::default());
		}
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content, path)
	}

	/// Applies `BEACON_ANALYTICS_*` overrides from the process environment.
	pub fn apply_env_overrides(self) -> Result<Self> {
		self.apply_overrides_from(|key| std::env::var(key).ok())
	}

	/// Applies overrides from an arbitrary variable lookup.
	pub fn apply_overrides_from<F>(mut self, lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(medium) = lookup(ENV_MEDIUM) {
			self.medium = medium;
		}
		if let Some(currency) = lookup(ENV_CURRENCY) {
			self.default_currency = currency;
		}
		if let Some(debug) = lookup(ENV_DEBUG) {
			self.debug = Some(parse_bool(&debug).ok_or_else(|| {
				ConfigError::Env(format!("{ENV_DEBUG} must be a boolean, got '{debug}'"))
			})?);
		}
		Ok(self)
	}

	/// Checks field constraints.
	pub fn validate(&self) -> Result<()> {
		if self.medium.trim().is_empty() {
			return Err(ConfigError::invalid_value("medium", "must not be empty"));
		}
		if !is_currency_code(&self.default_currency) {
			return Err(ConfigError::invalid_value(
				"default_currency",
				format!(
					"'{}' is not a three-letter uppercase currency code",
					self.default_currency
				),
			));
		}
		if self.default_params.keys().any(str::is_empty) {
			return Err(ConfigError::validation(
				"default_params must not contain empty keys",
			));
		}
		Ok(())
	}
}

/// Loads configuration from `path` (or the default location), applies
/// environment overrides and validates the result.
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
	let config = match path.map(Path::to_path_buf).or_else(default_config_path) {
		Some(path) => AnalyticsConfig::load(&path)?,
		None => AnalyticsConfig::default(),
	};
	let config = config.apply_env_overrides()?;
	config.validate()?;
	Ok(config)
}

/// `$XDG_CONFIG_HOME/beacon/analytics.toml`, if a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("beacon").join("analytics.toml"))
}

fn is_currency_code(code: &str) -> bool {
	code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::collections::HashMap;

	#[test]
	fn test_defaults() {
		let config = AnalyticsConfig::default();
		assert_eq!(config.medium, std::env::consts::OS);
		assert_eq!(config.default_currency, "USD");
		assert!(config.debug.is_none());
		assert!(config.default_params.is_empty());
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_from_toml_str() {
		let toml = r#"
			medium = "desktop"
			default_currency = "TZS"
			debug = true

			[default_params]
			app_version = "1.4.0"
			build = 112
		"#;
		let config = AnalyticsConfig::from_toml_str(toml, Path::new("analytics.toml")).unwrap();

		assert_eq!(config.medium, "desktop");
		assert_eq!(config.default_currency, "TZS");
		assert_eq!(config.debug, Some(true));
		assert_eq!(config.default_params.get_str("app_version"), Some("1.4.0"));
		assert_eq!(config.default_params.get_i64("build"), Some(112));
	}

	#[test]
	fn test_partial_toml_keeps_defaults() {
		let config =
			AnalyticsConfig::from_toml_str("medium = \"kiosk\"", Path::new("a.toml")).unwrap();
		assert_eq!(config.medium, "kiosk");
		assert_eq!(config.default_currency, DEFAULT_CURRENCY);
	}

	#[test]
	fn test_invalid_toml_reports_path() {
		let err = AnalyticsConfig::from_toml_str("medium = ", Path::new("/etc/beacon.toml"))
			.unwrap_err();
		assert!(matches!(
			err,
			ConfigError::TomlParse { ref path, .. } if path == Path::new("/etc/beacon.toml")
		));
	}

	#[test]
	fn test_load_missing_file_gives_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let config = AnalyticsConfig::load(&dir.path().join("missing.toml")).unwrap();
		assert_eq!(config, AnalyticsConfig::default());
	}

	#[test]
	fn test_load_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("analytics.toml");
		std::fs::write(&path, "default_currency = \"EUR\"\n").unwrap();

		let config = AnalyticsConfig::load(&path).unwrap();
		assert_eq!(config.default_currency, "EUR");
	}

	#[test]
	fn test_overrides() {
		let vars: HashMap<&str, &str> = [
			(ENV_MEDIUM, "web"),
			(ENV_CURRENCY, "KES"),
			(ENV_DEBUG, "yes"),
		]
		.into_iter()
		.collect();

		let config = AnalyticsConfig::default()
			.apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()))
			.unwrap();

		assert_eq!(config.medium, "web");
		assert_eq!(config.default_currency, "KES");
		assert_eq!(config.debug, Some(true));
	}

	#[test]
	fn test_bad_debug_override() {
		let result = AnalyticsConfig::default().apply_overrides_from(|k| {
			(k == ENV_DEBUG).then(|| "maybe".to_string())
		});
		assert!(matches!(result, Err(ConfigError::Env(_))));
	}

	#[test]
	fn test_validate_rejects_bad_values() {
		let config = AnalyticsConfig {
			medium: " ".to_string(),
			..Default::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::InvalidValue { ref field, .. }) if field == "medium"
		));

		let config = AnalyticsConfig {
			default_currency: "usd".to_string(),
			..Default::default()
		};
		assert!(config.validate().is_err());

		let config = AnalyticsConfig {
			default_params: ParameterSet::new().insert("", "x"),
			..Default::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_default_config_path_layout() {
		if let Some(path) = default_config_path() {
			assert!(path.ends_with("beacon/analytics.toml"));
		}
	}

	proptest! {
		#[test]
		fn currency_codes_are_three_uppercase_letters(code in "[A-Z]{3}") {
			prop_assert!(is_currency_code(&code));
		}

		#[test]
		fn lowercase_currency_codes_rejected(code in "[a-z]{3}") {
			prop_assert!(!is_currency_code(&code));
		}
	}
}
