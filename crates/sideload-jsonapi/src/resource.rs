//! Typed resources, the input unit of the renderer
//!
//! A [`Resource`] is a typed, identified bag of attributes with named
//! sub-resources. Sub-resources mirror association cardinality: one
//! resource for a `single` relation, an ordered list for a `multiple` one.

use indexmap::IndexMap;
use serde_json::Value;
use sideload_core::{SerializableAssociation, SerializableObject};

/// Resources related to a parent resource under one relation name.
#[derive(Debug, Clone, PartialEq)]
pub enum Subresource {
	/// A `single` relation.
	One(Resource),
	/// A `multiple` relation.
	///
	/// A declared `type_name` keys the relation; without one the first
	/// item's type is used.
	Many {
		/// Declared singular type of the items, if known.
		type_name: Option<String>,
		/// Related resources in serialized order.
		items: Vec<Resource>,
	},
}

impl Subresource {
	/// A `multiple` relation over `items`.
	pub fn many(items: Vec<Resource>) -> Self {
		Self::Many {
			type_name: None,
			items,
		}
	}

	/// A `multiple` relation with a declared item type.
	pub fn many_of(type_name: impl Into<String>, items: Vec<Resource>) -> Self {
		Self::Many {
			type_name: Some(type_name.into()),
			items,
		}
	}

	/// `true` for a `multiple` relation.
	pub fn is_collection(&self) -> bool {
		matches!(self, Self::Many { .. })
	}

	/// Resources under this relation, in order.
	pub fn resources(&self) -> &[Resource] {
		match self {
			Self::One(resource) => std::slice::from_ref(resource),
			Self::Many { items, .. } => items,
		}
	}

	/// Singular type used to key this relation: the declared type, or the
	/// first resource's type.
	pub fn type_name(&self) -> Option<&str> {
		match self {
			Self::One(resource) => resource.type_name(),
			Self::Many { type_name, items } => type_name
				.as_deref()
				.or_else(|| items.first().and_then(Resource::type_name)),
		}
	}
}

/// One typed, identified resource.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sideload_jsonapi::resource::{Resource, Subresource};
///
/// let show = Resource::new("show", json!(1))
///     .attribute("id", json!(1))
///     .attribute("name", json!("Lost"))
///     .subresource("network", Subresource::One(
///         Resource::new("network", json!(9)).attribute("id", json!(9)),
///     ));
///
/// assert_eq!(show.type_name(), Some("show"));
/// assert_eq!(show.subresources().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
	type_name: Option<String>,
	identity: Value,
	attributes: IndexMap<String, Value>,
	subresources: IndexMap<String, Subresource>,
}

impl Resource {
	/// Create a resource of `type_name` (singular) identified by `identity`.
	pub fn new(type_name: impl Into<String>, identity: Value) -> Self {
		Self {
			type_name: Some(type_name.into()),
			..Self::untyped(identity)
		}
	}

	/// Create a resource with no type.
	///
	/// Rendering fails on an untyped resource; this exists for callers that
	/// assemble resources from sources where the type is filled in later.
	pub fn untyped(identity: Value) -> Self {
		Self {
			type_name: None,
			identity,
			attributes: IndexMap::new(),
			subresources: IndexMap::new(),
		}
	}

	/// Set the type.
	pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
		self.type_name = Some(type_name.into());
		self
	}

	/// Append an attribute.
	pub fn attribute(mut self, name: impl Into<String>, value: Value) -> Self {
		self.attributes.insert(name.into(), value);
		self
	}

	/// Append a sub-resource relation.
	pub fn subresource(mut self, name: impl Into<String>, subresource: Subresource) -> Self {
		self.subresources.insert(name.into(), subresource);
		self
	}

	/// Singular type, if set.
	pub fn type_name(&self) -> Option<&str> {
		self.type_name.as_deref()
	}

	/// Identity value.
	pub fn identity(&self) -> &Value {
		&self.identity
	}

	/// Attributes in insertion order.
	pub fn attributes(&self) -> &IndexMap<String, Value> {
		&self.attributes
	}

	/// Sub-resources keyed by relation name, in insertion order.
	pub fn subresources(&self) -> &IndexMap<String, Subresource> {
		&self.subresources
	}
}

impl From<SerializableObject> for Resource {
	/// Compose a resource from object-serializer output.
	///
	/// An empty `single` association has nothing to link and is omitted.
	fn from(object: SerializableObject) -> Self {
		let (type_name, identity, attributes, associations) = object.into_parts();
		let subresources = associations
			.into_iter()
			.filter_map(|association| {
				let name = association.name().to_string();
				Subresource::from_association(association).map(|sub| (name, sub))
			})
			.collect();
		Self {
			type_name: Some(type_name),
			identity,
			attributes,
			subresources,
		}
	}
}

impl Subresource {
	/// Convert a serialized association; `None` for an empty `single` one.
	///
	/// A declared item type is kept on `multiple` relations so an empty
	/// collection is keyed like a filled one.
	pub fn from_association(association: SerializableAssociation) -> Option<Self> {
		let single = association.is_single();
		let type_name = association.type_name().map(str::to_string);
		let mut items: Vec<Resource> = association
			.into_items()
			.into_iter()
			.map(Resource::from)
			.collect();
		if single {
			items.pop().map(Subresource::One)
		} else {
			Some(Subresource::Many { type_name, items })
		}
	}
}
