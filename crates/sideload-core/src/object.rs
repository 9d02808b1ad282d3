//! Domain object accessor protocol
//!
//! Domain objects are owned by the caller. The serializer only reads them
//! through [`DomainObject`]: one lookup for attribute values and one for
//! related objects, both by name.

use crate::descriptor::short_type_name;
use serde_json::Value;
use std::any::Any;

/// Type-erasure helper so a `&dyn DomainObject` can report its runtime type.
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
	/// Returns the object as an `Any` reference.
	fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Named accessor lookup over an externally defined entity.
///
/// Return `None` from either lookup when the name is not exposed; the
/// serializer turns that into a
/// [`MissingAccessor`](crate::error::SerializeError::MissingAccessor) error
/// instead of emitting a null.
///
/// # Examples
///
/// ```
/// use serde_json::{Value, json};
/// use sideload_core::object::{DomainObject, Related};
///
/// struct Network {
///     id: i64,
///     name: String,
/// }
///
/// struct Show {
///     id: i64,
///     network: Option<Network>,
/// }
///
/// impl DomainObject for Network {
///     fn read_attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(json!(self.id)),
///             "name" => Some(json!(self.name)),
///             _ => None,
///         }
///     }
/// }
///
/// impl DomainObject for Show {
///     fn read_attribute(&self, name: &str) -> Option<Value> {
///         (name == "id").then(|| json!(self.id))
///     }
///
///     fn read_association(&self, name: &str) -> Option<Related<'_>> {
///         match name {
///             "network" => Some(Related::optional(self.network.as_ref())),
///             _ => None,
///         }
///     }
/// }
///
/// let show = Show { id: 1, network: None };
/// assert_eq!(show.type_tag(), "Show");
/// assert!(show.read_association("network").unwrap().is_empty());
/// ```
pub trait DomainObject: AsAny {
	/// Tag used for registry lookups when no `TypeId` registration matches.
	///
	/// Defaults to the unqualified type name.
	fn type_tag(&self) -> &'static str {
		short_type_name::<Self>()
	}

	/// Value of the named attribute, or `None` if the object has no such accessor.
	fn read_attribute(&self, name: &str) -> Option<Value>;

	/// Related object(s) behind the named association, or `None` if the
	/// object has no such accessor.
	fn read_association(&self, name: &str) -> Option<Related<'_>> {
		let _ = name;
		None
	}
}

/// Related objects returned by an association accessor.
#[derive(Clone)]
pub enum Related<'a> {
	/// Zero or one related object.
	One(Option<&'a dyn DomainObject>),
	/// An ordered sequence of related objects.
	Many(Vec<&'a dyn DomainObject>),
}

impl<'a> Related<'a> {
	/// Exactly one related object.
	pub fn one<T: DomainObject>(object: &'a T) -> Self {
		Self::One(Some(object))
	}

	/// No related object.
	pub fn none() -> Self {
		Self::One(None)
	}

	/// Zero or one related object.
	pub fn optional<T: DomainObject>(object: Option<&'a T>) -> Self {
		Self::One(object.map(|o| o as &dyn DomainObject))
	}

	/// Sequence of related objects; iteration order becomes serialized order.
	pub fn many<I, T>(objects: I) -> Self
	where
		I: IntoIterator<Item = &'a T>,
		T: DomainObject,
	{
		Self::Many(
			objects
				.into_iter()
				.map(|o| o as &dyn DomainObject)
				.collect(),
		)
	}

	/// Number of related objects.
	pub fn len(&self) -> usize {
		match self {
			Self::One(object) => usize::from(object.is_some()),
			Self::Many(objects) => objects.len(),
		}
	}

	/// `true` when no related object is present.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Flatten into an ordered list of related objects.
	pub fn into_objects(self) -> Vec<&'a dyn DomainObject> {
		match self {
			Self::One(object) => object.into_iter().collect(),
			Self::Many(objects) => objects,
		}
	}
}

impl std::fmt::Debug for Related<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let tags = |objects: &[&dyn DomainObject]| -> Vec<&'static str> {
			objects.iter().map(|o| o.type_tag()).collect()
		};
		match self {
			Self::One(object) => f
				.debug_tuple("One")
				.field(&object.map(|o| o.type_tag()))
				.finish(),
			Self::Many(objects) => f.debug_tuple("Many").field(&tags(objects.as_slice())).finish(),
		}
	}
}

/// Stable identity of a borrowed object for the duration of one serialization pass.
///
/// Combines the runtime type with the object's address so zero-sized values
/// of different types never collide.
pub(crate) fn object_key(object: &dyn DomainObject) -> (std::any::TypeId, usize) {
	let address = object as *const dyn DomainObject as *const () as usize;
	(object.as_any().type_id(), address)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	struct Episode {
		id: i64,
	}

	impl DomainObject for Episode {
		fn read_attribute(&self, name: &str) -> Option<Value> {
			(name == "id").then(|| json!(self.id))
		}
	}

	#[rstest]
	fn test_default_type_tag() {
		let episode = Episode { id: 1 };
		let object: &dyn DomainObject = &episode;

		assert_eq!(object.type_tag(), "Episode");
	}

	#[rstest]
	fn test_as_any_reports_concrete_type() {
		let episode = Episode { id: 1 };
		let object: &dyn DomainObject = &episode;

		assert!(object.as_any().is::<Episode>());
		assert!(object.as_any().downcast_ref::<Episode>().is_some());
	}

	#[rstest]
	fn test_default_association_lookup_is_missing() {
		let episode = Episode { id: 1 };

		assert!(episode.read_association("show").is_none());
	}

	#[rstest]
	fn test_related_lengths() {
		// Arrange
		let episodes = vec![Episode { id: 1 }, Episode { id: 2 }];

		// Act
		let many = Related::many(&episodes);
		let one = Related::one(&episodes[0]);
		let none = Related::none();

		// Assert
		assert_eq!(many.len(), 2);
		assert_eq!(one.len(), 1);
		assert!(none.is_empty());
		assert_eq!(many.into_objects().len(), 2);
		assert_eq!(none.into_objects().len(), 0);
	}

	#[rstest]
	fn test_object_key_distinguishes_instances() {
		let first = Episode { id: 1 };
		let second = Episode { id: 1 };

		assert_ne!(object_key(&first), object_key(&second));
		assert_eq!(object_key(&first), object_key(&first));
	}
}
