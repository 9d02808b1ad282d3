//! Format-agnostic intermediate representation
//!
//! One [`SerializableObject`] per serialized domain object, holding its
//! filtered attributes and, per association, the nested objects serialized
//! for it. Built fresh for every serialization pass and owned by it.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Serialized form of one domain object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializableObject {
	type_name: String,
	identity: Value,
	attributes: IndexMap<String, Value>,
	associations: Vec<SerializableAssociation>,
}

impl SerializableObject {
	/// Create a serializable object.
	///
	/// `attributes` keep their insertion order, which is descriptor order.
	pub fn new(
		type_name: impl Into<String>,
		identity: Value,
		attributes: IndexMap<String, Value>,
		associations: Vec<SerializableAssociation>,
	) -> Self {
		Self {
			type_name: type_name.into(),
			identity,
			attributes,
			associations,
		}
	}

	/// Singular type name (the descriptor's root key).
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Identity value used for linking.
	pub fn identity(&self) -> &Value {
		&self.identity
	}

	/// Serialized attributes in descriptor order.
	pub fn attributes(&self) -> &IndexMap<String, Value> {
		&self.attributes
	}

	/// Serialized associations in descriptor order.
	pub fn associations(&self) -> &[SerializableAssociation] {
		&self.associations
	}

	/// Look up a serialized association by name.
	pub fn association(&self, name: &str) -> Option<&SerializableAssociation> {
		self.associations.iter().find(|a| a.name == name)
	}

	/// Split into owned parts: type name, identity, attributes, associations.
	pub fn into_parts(
		self,
	) -> (
		String,
		Value,
		IndexMap<String, Value>,
		Vec<SerializableAssociation>,
	) {
		(
			self.type_name,
			self.identity,
			self.attributes,
			self.associations,
		)
	}
}

/// Serialized association: its name, cardinality and nested objects.
///
/// A `single` association holds at most one item; the constructors make any
/// other shape unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializableAssociation {
	name: String,
	single: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	type_name: Option<String>,
	items: Vec<SerializableObject>,
}

impl SerializableAssociation {
	/// A `single` association with zero or one item.
	pub fn single(name: impl Into<String>, item: Option<SerializableObject>) -> Self {
		Self {
			name: name.into(),
			single: true,
			type_name: None,
			items: item.into_iter().collect(),
		}
	}

	/// A `multiple` association; item order is serialized order.
	pub fn multiple(name: impl Into<String>, items: Vec<SerializableObject>) -> Self {
		Self {
			name: name.into(),
			single: false,
			type_name: None,
			items,
		}
	}

	/// Association name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Record the declared singular type of the nested objects.
	pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
		self.type_name = Some(type_name.into());
		self
	}

	/// `true` for a `single` association.
	pub fn is_single(&self) -> bool {
		self.single
	}

	/// Declared singular type of the nested objects, if any.
	pub fn type_name(&self) -> Option<&str> {
		self.type_name.as_deref()
	}

	/// Nested objects.
	pub fn items(&self) -> &[SerializableObject] {
		&self.items
	}

	/// Consume into nested objects.
	pub fn into_items(self) -> Vec<SerializableObject> {
		self.items
	}
}
