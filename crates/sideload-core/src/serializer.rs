//! Serializer extension points
//!
//! [`ObjectSerializer`] is the strategy a concrete serializer implements. The
//! traversal in [`crate::serialization`] never changes; it only calls these
//! hooks, so a serializer can drop or reorder names, or change how a single
//! value is loaded, without touching the walk itself.

use crate::descriptor::Descriptor;
use crate::error::{DescriptorError, SerializeError, SerializeResult};
use crate::object::{DomainObject, Related};
use serde_json::Value;

/// Per-type serializer: a descriptor plus overridable hooks.
///
/// # Examples
///
/// ```
/// use serde_json::{Value, json};
/// use sideload_core::descriptor::Descriptor;
/// use sideload_core::object::DomainObject;
/// use sideload_core::serializer::ObjectSerializer;
///
/// struct PublicShowSerializer {
///     descriptor: Descriptor,
/// }
///
/// impl ObjectSerializer for PublicShowSerializer {
///     fn descriptor(&self) -> &Descriptor {
///         &self.descriptor
///     }
///
///     fn filter_attributes<'d>(&self, names: Vec<&'d str>) -> Vec<&'d str> {
///         names.into_iter().filter(|n| *n != "budget").collect()
///     }
/// }
///
/// let serializer = PublicShowSerializer {
///     descriptor: Descriptor::builder("show")
///         .attributes(["id", "budget"])
///         .build()
///         .unwrap(),
/// };
/// assert_eq!(serializer.attribute_names(), vec!["id"]);
/// ```
pub trait ObjectSerializer: Send + Sync {
	/// Descriptor driving this serializer.
	fn descriptor(&self) -> &Descriptor;

	/// Filter (drop or reorder) attribute names before values are loaded.
	fn filter_attributes<'d>(&self, names: Vec<&'d str>) -> Vec<&'d str> {
		names
	}

	/// Filter (drop or reorder) association names before related objects are loaded.
	fn filter_associations<'d>(&self, names: Vec<&'d str>) -> Vec<&'d str> {
		names
	}

	/// Load one attribute value.
	fn load_attribute(&self, object: &dyn DomainObject, name: &str) -> SerializeResult<Value> {
		object
			.read_attribute(name)
			.ok_or_else(|| SerializeError::missing_attribute(self.descriptor().root_key(), name))
	}

	/// Load the related object(s) of one association.
	fn load_association<'o>(
		&self,
		object: &'o dyn DomainObject,
		name: &str,
	) -> SerializeResult<Related<'o>> {
		object
			.read_association(name)
			.ok_or_else(|| SerializeError::missing_association(self.descriptor().root_key(), name))
	}

	/// Attribute names after [`filter_attributes`](Self::filter_attributes).
	fn attribute_names(&self) -> Vec<&str> {
		self.filter_attributes(self.descriptor().attribute_names())
	}

	/// Association names after [`filter_associations`](Self::filter_associations).
	fn association_names(&self) -> Vec<&str> {
		self.filter_associations(self.descriptor().association_names())
	}
}

/// Serializer with no overrides: applies its descriptor verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSerializer {
	descriptor: Descriptor,
}

impl DescriptorSerializer {
	/// Wrap a descriptor.
	pub fn new(descriptor: Descriptor) -> Self {
		Self { descriptor }
	}

	/// Same serializer emitting a different root key.
	pub fn with_root_key(self, root_key: impl Into<String>) -> Result<Self, DescriptorError> {
		Ok(Self {
			descriptor: self.descriptor.with_root_key(root_key)?,
		})
	}
}

impl From<Descriptor> for DescriptorSerializer {
	fn from(descriptor: Descriptor) -> Self {
		Self::new(descriptor)
	}
}

impl ObjectSerializer for DescriptorSerializer {
	fn descriptor(&self) -> &Descriptor {
		&self.descriptor
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::AccessorKind;
	use rstest::{fixture, rstest};
	use serde_json::json;

	struct Network {
		id: i64,
	}

	impl DomainObject for Network {
		fn read_attribute(&self, name: &str) -> Option<Value> {
			(name == "id").then(|| json!(self.id))
		}
	}

	struct Reordering(Descriptor);

	impl ObjectSerializer for Reordering {
		fn descriptor(&self) -> &Descriptor {
			&self.0
		}

		fn filter_attributes<'d>(&self, mut names: Vec<&'d str>) -> Vec<&'d str> {
			names.reverse();
			names
		}

		fn filter_associations<'d>(&self, _names: Vec<&'d str>) -> Vec<&'d str> {
			Vec::new()
		}
	}

	#[fixture]
	fn descriptor() -> Descriptor {
		Descriptor::builder("network")
			.attributes(["id", "name"])
			.has_many("shows")
			.build()
			.unwrap()
	}

	#[rstest]
	fn test_default_hooks_are_identity(descriptor: Descriptor) {
		let serializer = DescriptorSerializer::new(descriptor);

		assert_eq!(serializer.attribute_names(), vec!["id", "name"]);
		assert_eq!(serializer.association_names(), vec!["shows"]);
	}

	#[rstest]
	fn test_overridden_filters(descriptor: Descriptor) {
		let serializer = Reordering(descriptor);

		assert_eq!(serializer.attribute_names(), vec!["name", "id"]);
		assert!(serializer.association_names().is_empty());
	}

	#[rstest]
	fn test_load_attribute_missing_is_error(descriptor: Descriptor) {
		// Arrange
		let serializer = DescriptorSerializer::new(descriptor);
		let network = Network { id: 9 };

		// Act
		let id = serializer.load_attribute(&network, "id").unwrap();
		let err = serializer.load_attribute(&network, "name").unwrap_err();

		// Assert
		assert_eq!(id, json!(9));
		assert_eq!(
			err,
			SerializeError::MissingAccessor {
				type_name: "network".to_string(),
				kind: AccessorKind::Attribute,
				name: "name".to_string(),
			}
		);
	}

	#[rstest]
	fn test_load_association_missing_is_error(descriptor: Descriptor) {
		let serializer = DescriptorSerializer::new(descriptor);
		let network = Network { id: 9 };

		let err = serializer.load_association(&network, "shows").unwrap_err();

		assert!(matches!(
			err,
			SerializeError::MissingAccessor {
				kind: AccessorKind::Association,
				..
			}
		));
	}

	#[rstest]
	fn test_with_root_key(descriptor: Descriptor) {
		let serializer = DescriptorSerializer::from(descriptor)
			.with_root_key("broadcaster")
			.unwrap();

		assert_eq!(serializer.descriptor().root_key(), "broadcaster");
	}
}
