//! Object-graph traversal
//!
//! Walks one domain object through its serializer's hooks and recursively
//! serializes every related object with the serializer the registry resolves
//! for it.

use crate::descriptor::{Cardinality, Descriptor};
use crate::error::{SerializeError, SerializeResult};
use crate::object::{DomainObject, Related, object_key};
use crate::recursive::{Refusal, SerializationContext};
use crate::registry::{self, SerializerRegistry};
use crate::serializable::{SerializableAssociation, SerializableObject};
use crate::serializer::{DescriptorSerializer, ObjectSerializer};
use crate::settings::SerializationSettings;
use indexmap::IndexMap;

/// One configured serialization pass: a registry to resolve related objects
/// plus the depth and cycle bounds to enforce.
///
/// # Examples
///
/// ```
/// use serde_json::{Value, json};
/// use sideload_core::descriptor::Descriptor;
/// use sideload_core::object::DomainObject;
/// use sideload_core::registry::SerializerRegistry;
/// use sideload_core::serialization::Serialization;
/// use sideload_core::serializer::DescriptorSerializer;
///
/// struct Show {
///     id: i64,
///     name: &'static str,
/// }
///
/// impl DomainObject for Show {
///     fn read_attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(json!(self.id)),
///             "name" => Some(json!(self.name)),
///             _ => None,
///         }
///     }
/// }
///
/// let registry = SerializerRegistry::new();
/// registry.register::<Show>(DescriptorSerializer::new(
///     Descriptor::builder("show").attributes(["id", "name"]).build().unwrap(),
/// ));
///
/// let object = Serialization::new(&registry)
///     .serialize_resolved(&Show { id: 1, name: "Lost" })
///     .unwrap();
/// assert_eq!(object.attributes()["name"], json!("Lost"));
/// ```
#[derive(Debug, Clone)]
pub struct Serialization<'r> {
	registry: &'r SerializerRegistry,
	settings: SerializationSettings,
}

impl Serialization<'static> {
	/// Serialization pass backed by the global registry.
	pub fn with_global_registry() -> Self {
		Self::new(registry::global())
	}
}

impl<'r> Serialization<'r> {
	/// Create a pass over `registry` with default settings.
	pub fn new(registry: &'r SerializerRegistry) -> Self {
		Self {
			registry,
			settings: SerializationSettings::default(),
		}
	}

	/// Replace the settings.
	pub fn with_settings(mut self, settings: SerializationSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Settings in effect.
	pub fn settings(&self) -> &SerializationSettings {
		&self.settings
	}

	/// Registry used to resolve related objects.
	pub fn registry(&self) -> &'r SerializerRegistry {
		self.registry
	}

	/// Serialize `object` with an explicit serializer.
	///
	/// Related objects are serialized with whatever the registry resolves for
	/// their runtime type.
	pub fn serialize(
		&self,
		object: &dyn DomainObject,
		serializer: &dyn ObjectSerializer,
	) -> SerializeResult<SerializableObject> {
		let mut context = SerializationContext::from_settings(&self.settings);
		context.enter_root(object_key(object), |ctx| {
			self.serialize_in(object, serializer, ctx)
		})
	}

	/// Serialize `object` with a bare descriptor and default hooks.
	pub fn serialize_with_descriptor(
		&self,
		object: &dyn DomainObject,
		descriptor: &Descriptor,
	) -> SerializeResult<SerializableObject> {
		self.serialize(object, &DescriptorSerializer::new(descriptor.clone()))
	}

	/// Resolve the serializer for `object` and serialize it.
	pub fn serialize_resolved(
		&self,
		object: &dyn DomainObject,
	) -> SerializeResult<SerializableObject> {
		let serializer = self.registry.resolver_for(object)?;
		self.serialize(object, serializer.as_ref())
	}

	/// Resolve and serialize every object, preserving order.
	pub fn serialize_all<'o, I>(&self, objects: I) -> SerializeResult<Vec<SerializableObject>>
	where
		I: IntoIterator<Item = &'o dyn DomainObject>,
	{
		objects
			.into_iter()
			.map(|object| self.serialize_resolved(object))
			.collect()
	}

	fn serialize_in(
		&self,
		object: &dyn DomainObject,
		serializer: &dyn ObjectSerializer,
		ctx: &mut SerializationContext,
	) -> SerializeResult<SerializableObject> {
		let descriptor = serializer.descriptor();
		let type_name = descriptor.root_key();
		tracing::trace!(type_name, depth = ctx.current_depth(), "serializing object");

		let identity = serializer.load_attribute(object, descriptor.identity_key())?;

		let mut attributes = IndexMap::new();
		for name in serializer.attribute_names() {
			let value = serializer.load_attribute(object, name)?;
			attributes.insert(name.to_string(), value);
		}

		let mut associations = Vec::new();
		for name in serializer.association_names() {
			let declared = descriptor
				.association(name)
				.ok_or_else(|| SerializeError::missing_association(type_name, name))?;
			let related = serializer.load_association(object, name)?;
			let association = match declared.cardinality() {
				Cardinality::Single => {
					let item = match related {
						Related::One(item) => item,
						Related::Many(items) if items.len() <= 1 => items.into_iter().next(),
						Related::Many(items) => {
							return Err(SerializeError::InvalidCardinality {
								type_name: type_name.to_string(),
								association: name.to_string(),
								count: items.len(),
							});
						}
					};
					let item = item
						.map(|related| self.serialize_related(related, &identity, type_name, ctx))
						.transpose()?;
					SerializableAssociation::single(name, item)
				}
				Cardinality::Multiple => {
					let items = related
						.into_objects()
						.into_iter()
						.map(|related| self.serialize_related(related, &identity, type_name, ctx))
						.collect::<SerializeResult<Vec<_>>>()?;
					SerializableAssociation::multiple(name, items)
				}
			};
			associations.push(match declared.target_type() {
				Some(target_type) => association.with_type_name(target_type),
				None => association,
			});
		}

		Ok(SerializableObject::new(
			type_name,
			identity,
			attributes,
			associations,
		))
	}

	fn serialize_related(
		&self,
		related: &dyn DomainObject,
		owner_identity: &serde_json::Value,
		owner_type: &str,
		ctx: &mut SerializationContext,
	) -> SerializeResult<SerializableObject> {
		let serializer = self.registry.resolver_for(related)?;
		let related_type = serializer.descriptor().root_key().to_string();
		ctx.descend_with(
			object_key(related),
			|refusal| match refusal {
				Refusal::TooDeep { depth, max_depth } => SerializeError::DepthExceeded {
					type_name: related_type.clone(),
					depth,
					max_depth,
				},
				Refusal::Circular => SerializeError::CycleDetected {
					type_name: related_type.clone(),
					identity: serializer
						.load_attribute(related, serializer.descriptor().identity_key())
						.map(|id| id.to_string())
						.unwrap_or_else(|_| format!("referenced from {owner_type} {owner_identity}")),
				},
			},
			|ctx| self.serialize_in(related, serializer.as_ref(), ctx),
		)
	}
}

/// Serialize `object` with `descriptor`, resolving related objects through
/// the global registry with default settings.
pub fn serialize(
	object: &dyn DomainObject,
	descriptor: &Descriptor,
) -> SerializeResult<SerializableObject> {
	Serialization::with_global_registry().serialize_with_descriptor(object, descriptor)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::AccessorKind;
	use rstest::{fixture, rstest};
	use serde_json::{Value, json};

	struct Network {
		id: i64,
		name: &'static str,
	}

	struct Episode {
		id: i64,
		title: &'static str,
	}

	struct Show {
		id: i64,
		name: &'static str,
		network: Option<Network>,
		episodes: Vec<Episode>,
	}

	impl DomainObject for Network {
		fn read_attribute(&self, name: &str) -> Option<Value> {
			match name {
				"id" => Some(json!(self.id)),
				"name" => Some(json!(self.name)),
				_ => None,
			}
		}
	}

	impl DomainObject for Episode {
		fn read_attribute(&self, name: &str) -> Option<Value> {
			match name {
				"id" => Some(json!(self.id)),
				"title" => Some(json!(self.title)),
				_ => None,
			}
		}
	}

	impl DomainObject for Show {
		fn read_attribute(&self, name: &str) -> Option<Value> {
			match name {
				"id" => Some(json!(self.id)),
				"name" => Some(json!(self.name)),
				_ => None,
			}
		}

		fn read_association(&self, name: &str) -> Option<Related<'_>> {
			match name {
				"network" => Some(Related::optional(self.network.as_ref())),
				"episodes" => Some(Related::many(&self.episodes)),
				"pilot_and_finale" => Some(Related::many(&self.episodes)),
				_ => None,
			}
		}
	}

	fn show_descriptor() -> Descriptor {
		Descriptor::builder("show")
			.attributes(["id", "name"])
			.has_one("network")
			.has_many("episodes")
			.build()
			.unwrap()
	}

	#[fixture]
	fn registry() -> SerializerRegistry {
		let registry = SerializerRegistry::new();
		registry.register::<Show>(DescriptorSerializer::new(show_descriptor()));
		registry.register::<Network>(DescriptorSerializer::new(
			Descriptor::builder("network")
				.attributes(["id", "name"])
				.build()
				.unwrap(),
		));
		registry.register::<Episode>(DescriptorSerializer::new(
			Descriptor::builder("episode")
				.attributes(["id", "title"])
				.build()
				.unwrap(),
		));
		registry
	}

	#[fixture]
	fn show() -> Show {
		Show {
			id: 1,
			name: "Lost",
			network: Some(Network { id: 9, name: "ABC" }),
			episodes: vec![
				Episode {
					id: 10,
					title: "Pilot",
				},
				Episode {
					id: 11,
					title: "Tabula Rasa",
				},
			],
		}
	}

	#[rstest]
	fn test_serialize_attributes_in_descriptor_order(registry: SerializerRegistry, show: Show) {
		// Act
		let object = Serialization::new(&registry)
			.serialize_resolved(&show)
			.unwrap();

		// Assert
		assert_eq!(object.type_name(), "show");
		assert_eq!(object.identity(), &json!(1));
		assert_eq!(
			object.attributes().keys().collect::<Vec<_>>(),
			vec!["id", "name"]
		);
	}

	#[rstest]
	fn test_serialize_associations(registry: SerializerRegistry, show: Show) {
		let object = Serialization::new(&registry)
			.serialize_resolved(&show)
			.unwrap();

		let network = object.association("network").unwrap();
		let episodes = object.association("episodes").unwrap();

		assert!(network.is_single());
		assert_eq!(network.items().len(), 1);
		assert_eq!(network.items()[0].attributes()["name"], json!("ABC"));
		assert!(!episodes.is_single());
		assert_eq!(
			episodes
				.items()
				.iter()
				.map(|e| e.identity().clone())
				.collect::<Vec<_>>(),
			vec![json!(10), json!(11)]
		);
	}

	#[rstest]
	fn test_empty_single_association(registry: SerializerRegistry, mut show: Show) {
		show.network = None;

		let object = Serialization::new(&registry)
			.serialize_resolved(&show)
			.unwrap();

		assert!(object.association("network").unwrap().items().is_empty());
	}

	#[rstest]
	fn test_declared_target_type_is_carried(registry: SerializerRegistry, mut show: Show) {
		// Arrange
		show.episodes.clear();
		let descriptor = Descriptor::builder("show")
			.attribute("id")
			.has_many_of("episodes", "episode")
			.has_one("network")
			.build()
			.unwrap();

		// Act
		let object = Serialization::new(&registry)
			.serialize_with_descriptor(&show, &descriptor)
			.unwrap();

		// Assert
		let episodes = object.association("episodes").unwrap();
		assert!(episodes.items().is_empty());
		assert_eq!(episodes.type_name(), Some("episode"));
		assert_eq!(object.association("network").unwrap().type_name(), None);
	}

	#[rstest]
	fn test_serialize_is_idempotent(registry: SerializerRegistry, show: Show) {
		let serialization = Serialization::new(&registry);

		let first = serialization.serialize_resolved(&show).unwrap();
		let second = serialization.serialize_resolved(&show).unwrap();

		assert_eq!(first, second);
	}

	#[rstest]
	fn test_missing_attribute_accessor(registry: SerializerRegistry, show: Show) {
		let descriptor = Descriptor::builder("show")
			.attributes(["id", "rating"])
			.build()
			.unwrap();

		let err = Serialization::new(&registry)
			.serialize_with_descriptor(&show, &descriptor)
			.unwrap_err();

		assert_eq!(
			err,
			SerializeError::MissingAccessor {
				type_name: "show".to_string(),
				kind: AccessorKind::Attribute,
				name: "rating".to_string(),
			}
		);
	}

	#[rstest]
	fn test_missing_association_accessor(registry: SerializerRegistry, show: Show) {
		let descriptor = Descriptor::builder("show")
			.has_many("cast")
			.build()
			.unwrap();

		let err = Serialization::new(&registry)
			.serialize_with_descriptor(&show, &descriptor)
			.unwrap_err();

		assert!(matches!(
			err,
			SerializeError::MissingAccessor {
				kind: AccessorKind::Association,
				..
			}
		));
	}

	#[rstest]
	fn test_single_association_with_many_items(registry: SerializerRegistry, show: Show) {
		let descriptor = Descriptor::builder("show")
			.has_one("pilot_and_finale")
			.build()
			.unwrap();

		let err = Serialization::new(&registry)
			.serialize_with_descriptor(&show, &descriptor)
			.unwrap_err();

		assert_eq!(
			err,
			SerializeError::InvalidCardinality {
				type_name: "show".to_string(),
				association: "pilot_and_finale".to_string(),
				count: 2,
			}
		);
	}

	#[rstest]
	fn test_unresolved_related_type(show: Show) {
		let registry = SerializerRegistry::new();
		registry.register::<Show>(DescriptorSerializer::new(show_descriptor()));

		let err = Serialization::new(&registry)
			.serialize_resolved(&show)
			.unwrap_err();

		assert_eq!(
			err,
			SerializeError::UnresolvedType {
				type_tag: "Network".to_string()
			}
		);
	}

	#[rstest]
	fn test_depth_limit(registry: SerializerRegistry, show: Show) {
		let settings = SerializationSettings::new().max_depth(1);
		let shallow = Serialization::new(&registry).with_settings(settings);

		// One level of associations fits within max_depth = 1
		assert!(shallow.serialize_resolved(&show).is_ok());
	}
}
