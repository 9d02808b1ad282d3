//! Serialization settings
//!
//! Settings can be built in code, deserialized from any serde source, or
//! loaded from environment variables.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};

/// Default maximum association depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Environment variable overriding [`SerializationSettings::max_depth`].
pub const ENV_MAX_DEPTH: &str = "SIDELOAD_MAX_DEPTH";

/// Environment variable overriding [`SerializationSettings::detect_cycles`].
pub const ENV_DETECT_CYCLES: &str = "SIDELOAD_DETECT_CYCLES";

/// Bounds applied while walking a domain object graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationSettings {
	/// How many association levels below the root may be serialized
	#[serde(default = "default_max_depth")]
	pub max_depth: usize,

	/// Report a loop back to an object still being serialized
	#[serde(default = "default_detect_cycles")]
	pub detect_cycles: bool,
}

fn default_max_depth() -> usize {
	DEFAULT_MAX_DEPTH
}

fn default_detect_cycles() -> bool {
	true
}

impl Default for SerializationSettings {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			detect_cycles: true,
		}
	}
}

impl SerializationSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the maximum association depth.
	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Enable or disable cycle detection.
	pub fn detect_cycles(mut self, detect_cycles: bool) -> Self {
		self.detect_cycles = detect_cycles;
		self
	}

	/// Validate settings
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.max_depth == 0 {
			return Err(SettingsError::Validation(
				"max_depth must be at least 1".to_string(),
			));
		}
		Ok(())
	}

	/// Load settings from environment variables, falling back to defaults.
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
		let mut settings = Self::default();

		if let Some(raw) = lookup(ENV_MAX_DEPTH) {
			settings.max_depth = raw.trim().parse().map_err(|_| SettingsError::InvalidEnv {
				variable: ENV_MAX_DEPTH.to_string(),
				value: raw.clone(),
			})?;
		}

		if let Some(raw) = lookup(ENV_DETECT_CYCLES) {
			settings.detect_cycles = match raw.trim().to_lowercase().as_str() {
				"1" | "true" | "yes" => true,
				"0" | "false" | "no" => false,
				_ => {
					return Err(SettingsError::InvalidEnv {
						variable: ENV_DETECT_CYCLES.to_string(),
						value: raw,
					});
				}
			};
		}

		settings.validate()?;
		Ok(settings)
	}
}
