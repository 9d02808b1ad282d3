//! Static per-type metadata
//!
//! A [`Descriptor`] says which attributes and associations of a domain type
//! get serialized, under which root key, and which attribute carries the
//! object's identity. Descriptors are built once, validated, and never
//! mutated afterwards.

use crate::error::DescriptorError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default identity attribute name.
pub const DEFAULT_IDENTITY_KEY: &str = "id";

/// Whether an association refers to at most one related object or to a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
	/// At most one related object.
	Single,
	/// An ordered, finite sequence of related objects.
	Multiple,
}

impl Cardinality {
	/// Returns `true` for [`Cardinality::Single`].
	pub fn is_single(self) -> bool {
		matches!(self, Self::Single)
	}
}

/// One declared association: its cardinality, accessor name and, optionally,
/// the singular type of the related objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssociationDescriptor {
	cardinality: Cardinality,
	name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	target_type: Option<String>,
}

impl AssociationDescriptor {
	/// Create an association descriptor.
	pub fn new(cardinality: Cardinality, name: impl Into<String>) -> Self {
		Self {
			cardinality,
			name: name.into(),
			target_type: None,
		}
	}

	/// Declare the singular type of the related objects.
	///
	/// Format transducers key an empty collection by this type.
	pub fn with_target_type(mut self, target_type: impl Into<String>) -> Self {
		self.target_type = Some(target_type.into());
		self
	}

	/// Cardinality of the association.
	pub fn cardinality(&self) -> Cardinality {
		self.cardinality
	}

	/// Accessor name of the association.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declared singular type of the related objects, if any.
	pub fn target_type(&self) -> Option<&str> {
		self.target_type.as_deref()
	}
}

/// Immutable serialization metadata for one domain type.
///
/// # Examples
///
/// ```
/// use sideload_core::descriptor::{Cardinality, Descriptor};
///
/// let descriptor = Descriptor::builder("show")
///     .attributes(["id", "name"])
///     .has_one("network")
///     .has_many("episodes")
///     .build()
///     .unwrap();
///
/// assert_eq!(descriptor.root_key(), "show");
/// assert_eq!(descriptor.identity_key(), "id");
/// assert_eq!(descriptor.attribute_names(), vec!["id", "name"]);
/// assert_eq!(descriptor.associations()[1].cardinality(), Cardinality::Multiple);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
	root_key: String,
	identity_key: String,
	attributes: Vec<String>,
	associations: Vec<AssociationDescriptor>,
}

impl Descriptor {
	/// Start building a descriptor with an explicit root key.
	pub fn builder(root_key: impl Into<String>) -> DescriptorBuilder {
		DescriptorBuilder::new(root_key.into())
	}

	/// Start building a descriptor whose root key is derived from `T`'s name.
	///
	/// `TvShow` becomes `tv_show`; module paths and generic parameters are dropped.
	///
	/// ```
	/// use sideload_core::descriptor::Descriptor;
	///
	/// struct TvShow;
	///
	/// let descriptor = Descriptor::for_type::<TvShow>().build().unwrap();
	/// assert_eq!(descriptor.root_key(), "tv_show");
	/// ```
	pub fn for_type<T: ?Sized>() -> DescriptorBuilder {
		DescriptorBuilder::new(snake_case(short_type_name::<T>()))
	}

	/// Root key (singular resource type).
	pub fn root_key(&self) -> &str {
		&self.root_key
	}

	/// Name of the identity attribute.
	pub fn identity_key(&self) -> &str {
		&self.identity_key
	}

	/// Declared attribute names, in declaration order.
	pub fn attribute_names(&self) -> Vec<&str> {
		self.attributes.iter().map(String::as_str).collect()
	}

	/// Declared associations, in declaration order.
	pub fn associations(&self) -> &[AssociationDescriptor] {
		&self.associations
	}

	/// Declared association names, in declaration order.
	pub fn association_names(&self) -> Vec<&str> {
		self.associations.iter().map(|a| a.name()).collect()
	}

	/// Look up an association by accessor name.
	pub fn association(&self, name: &str) -> Option<&AssociationDescriptor> {
		self.associations.iter().find(|a| a.name == name)
	}

	/// Copy of this descriptor under a different root key.
	pub fn with_root_key(&self, root_key: impl Into<String>) -> Result<Self, DescriptorError> {
		let root_key = root_key.into();
		if root_key.is_empty() {
			return Err(DescriptorError::EmptyRootKey);
		}
		Ok(Self {
			root_key,
			..self.clone()
		})
	}
}

/// Builder for [`Descriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
	root_key: String,
	identity_key: String,
	attributes: Vec<String>,
	associations: Vec<AssociationDescriptor>,
}

impl DescriptorBuilder {
	fn new(root_key: String) -> Self {
		Self {
			root_key,
			identity_key: DEFAULT_IDENTITY_KEY.to_string(),
			attributes: Vec::new(),
			associations: Vec::new(),
		}
	}

	/// Override the identity attribute name (default `"id"`).
	pub fn identity_key(mut self, key: impl Into<String>) -> Self {
		self.identity_key = key.into();
		self
	}

	/// Append one attribute name.
	pub fn attribute(mut self, name: impl Into<String>) -> Self {
		self.attributes.push(name.into());
		self
	}

	/// Append several attribute names.
	pub fn attributes<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.attributes.extend(names.into_iter().map(Into::into));
		self
	}

	/// Append a `single` association.
	pub fn has_one(self, name: impl Into<String>) -> Self {
		self.association(Cardinality::Single, name)
	}

	/// Append a `multiple` association.
	pub fn has_many(self, name: impl Into<String>) -> Self {
		self.association(Cardinality::Multiple, name)
	}

	/// Append a `single` association whose related object is of `target_type`.
	pub fn has_one_of(self, name: impl Into<String>, target_type: impl Into<String>) -> Self {
		self.declare(AssociationDescriptor::new(Cardinality::Single, name).with_target_type(target_type))
	}

	/// Append a `multiple` association whose items are of `target_type`.
	pub fn has_many_of(self, name: impl Into<String>, target_type: impl Into<String>) -> Self {
		self.declare(AssociationDescriptor::new(Cardinality::Multiple, name).with_target_type(target_type))
	}

	/// Append an association with an explicit cardinality.
	pub fn association(self, cardinality: Cardinality, name: impl Into<String>) -> Self {
		self.declare(AssociationDescriptor::new(cardinality, name))
	}

	/// Append a fully specified association.
	pub fn declare(mut self, association: AssociationDescriptor) -> Self {
		self.associations.push(association);
		self
	}

	/// Validate and build the descriptor.
	///
	/// Attribute names must be unique, as must association names.
	pub fn build(self) -> Result<Descriptor, DescriptorError> {
		if self.root_key.is_empty() {
			return Err(DescriptorError::EmptyRootKey);
		}
		if self.identity_key.is_empty() {
			return Err(DescriptorError::EmptyIdentityKey);
		}

		let mut seen = HashSet::new();
		for name in &self.attributes {
			if !seen.insert(name.as_str()) {
				return Err(DescriptorError::DuplicateAttribute(name.clone()));
			}
		}

		let mut seen = HashSet::new();
		for association in &self.associations {
			if !seen.insert(association.name()) {
				return Err(DescriptorError::DuplicateAssociation(
					association.name.clone(),
				));
			}
		}

		Ok(Descriptor {
			root_key: self.root_key,
			identity_key: self.identity_key,
			attributes: self.attributes,
			associations: self.associations,
		})
	}
}

/// Last path segment of `T`'s type name, without generic parameters.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
	let full = std::any::type_name::<T>();
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}

/// `CamelCase` to `snake_case`.
///
/// An acronym run stays together: `HTTPServer` becomes `http_server`.
pub(crate) fn snake_case(name: &str) -> String {
	let chars: Vec<char> = name.chars().collect();
	let mut out = String::with_capacity(name.len() + 4);
	for (i, &ch) in chars.iter().enumerate() {
		if ch.is_uppercase() {
			if i > 0 {
				let prev = chars[i - 1];
				let next = chars.get(i + 1);
				// Lower-to-upper boundary, or the last capital of an acronym
				// followed by a lowercase letter (HTTPServer -> http_server)
				if prev.is_lowercase()
					|| prev.is_ascii_digit()
					|| (prev.is_uppercase() && next.is_some_and(|n| n.is_lowercase()))
				{
					out.push('_');
				}
			}
			out.extend(ch.to_lowercase());
		} else {
			out.push(ch);
		}
	}
	out
}
