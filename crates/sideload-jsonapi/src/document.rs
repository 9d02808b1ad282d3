//! Rendered JSON:API document

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A rendered document: primary collections keyed by pluralized type, plus
/// the flattened linked section.
///
/// Serializes as one JSON object with the primary keys first, in the order
/// they were first produced, followed by the linked key.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
	primary: IndexMap<String, Vec<Value>>,
	linked: IndexMap<String, Vec<Value>>,
	linked_key: String,
}

impl Document {
	pub(crate) fn new(
		primary: IndexMap<String, Vec<Value>>,
		linked: IndexMap<String, Vec<Value>>,
		linked_key: impl Into<String>,
	) -> Self {
		Self {
			primary,
			linked,
			linked_key: linked_key.into(),
		}
	}

	/// Primary records under `key`.
	pub fn primary(&self, key: &str) -> Option<&[Value]> {
		self.primary.get(key).map(Vec::as_slice)
	}

	/// Linked records under `key`.
	pub fn linked(&self, key: &str) -> Option<&[Value]> {
		self.linked.get(key).map(Vec::as_slice)
	}

	/// All primary collections.
	pub fn primary_collections(&self) -> &IndexMap<String, Vec<Value>> {
		&self.primary
	}

	/// All linked collections.
	pub fn linked_collections(&self) -> &IndexMap<String, Vec<Value>> {
		&self.linked
	}

	/// Name of the linked section in the serialized form.
	pub fn linked_key(&self) -> &str {
		&self.linked_key
	}

	/// Convert to a JSON value.
	pub fn to_value(&self) -> Value {
		let mut root = serde_json::Map::new();
		for (key, records) in &self.primary {
			root.insert(key.clone(), Value::Array(records.clone()));
		}
		let linked = self
			.linked
			.iter()
			.map(|(key, records)| (key.clone(), Value::Array(records.clone())))
			.collect();
		root.insert(self.linked_key.clone(), Value::Object(linked));
		Value::Object(root)
	}
}

impl Serialize for Document {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.primary.len() + 1))?;
		for (key, records) in &self.primary {
			map.serialize_entry(key, records)?;
		}
		map.serialize_entry(&self.linked_key, &self.linked)?;
		map.end()
	}
}
