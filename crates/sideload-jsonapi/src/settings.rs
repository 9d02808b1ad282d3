//! Renderer settings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default name of the flattened related-resource section.
pub const DEFAULT_LINKED_KEY: &str = "linked";

/// Default name of the per-record link map.
pub const DEFAULT_LINKS_KEY: &str = "links";

/// How keys inside a record's `links` map are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKeyStrategy {
	/// Pluralized type of the related resources (`network` -> `networks`).
	#[default]
	PluralizedType,
	/// Relation name as declared on the parent.
	RelationName,
}

/// Shape of the rendered document.
///
/// # Examples
///
/// ```
/// use sideload_jsonapi::settings::{JsonApiSettings, LinkKeyStrategy};
///
/// let settings: JsonApiSettings = serde_json::from_str(
///     r#"{"link_keys": "relation_name", "plurals": {"cactus": "cacti"}}"#,
/// ).unwrap();
///
/// assert_eq!(settings.linked_key, "linked");
/// assert_eq!(settings.link_keys, LinkKeyStrategy::RelationName);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonApiSettings {
	/// Top-level key holding the linked resources.
	pub linked_key: String,

	/// Record key holding the link map.
	pub links_key: String,

	/// Link map key strategy.
	pub link_keys: LinkKeyStrategy,

	/// Per-type plural overrides, singular to plural.
	pub plurals: HashMap<String, String>,
}

impl Default for JsonApiSettings {
	fn default() -> Self {
		Self {
			linked_key: DEFAULT_LINKED_KEY.to_string(),
			links_key: DEFAULT_LINKS_KEY.to_string(),
			link_keys: LinkKeyStrategy::default(),
			plurals: HashMap::new(),
		}
	}
}

impl JsonApiSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Rename the linked section.
	pub fn linked_key(mut self, key: impl Into<String>) -> Self {
		self.linked_key = key.into();
		self
	}

	/// Rename the link map.
	pub fn links_key(mut self, key: impl Into<String>) -> Self {
		self.links_key = key.into();
		self
	}

	/// Choose how link map keys are derived.
	pub fn link_keys(mut self, strategy: LinkKeyStrategy) -> Self {
		self.link_keys = strategy;
		self
	}

	/// Override the plural of one type.
	pub fn plural(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
		self.plurals.insert(singular.into(), plural.into());
		self
	}
}
