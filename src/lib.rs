//! # Sideload
//!
//! Object-graph serialization with sideloaded related resources.
//!
//! A domain object graph is turned into a document in two stages:
//!
//! 1. **Serialization**: each object is matched to a serializer through the
//!    registry and reduced to a format-agnostic
//!    [`SerializableObject`](crate::core::SerializableObject), following its
//!    descriptor's attributes and `single`/`multiple` associations.
//! 2. **Rendering**: a format transducer turns those objects into a wire
//!    document. The JSON:API transducer keys records by pluralized type,
//!    replaces related objects with their identities, and flattens every
//!    related resource into one deduplicated `linked` section.
//!
//! ## Feature Flags
//!
//! - `jsonapi` (default) - JSON:API transducer
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "jsonapi")]
//! # {
//! use sideload::prelude::*;
//! use serde_json::{Value, json};
//!
//! struct Network { id: i64, name: &'static str }
//! struct Show { id: i64, name: &'static str, network: Network }
//!
//! impl DomainObject for Network {
//!     fn read_attribute(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "id" => Some(json!(self.id)),
//!             "name" => Some(json!(self.name)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl DomainObject for Show {
//!     fn read_attribute(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "id" => Some(json!(self.id)),
//!             "name" => Some(json!(self.name)),
//!             _ => None,
//!         }
//!     }
//!     fn read_association(&self, name: &str) -> Option<Related<'_>> {
//!         (name == "network").then(|| Related::one(&self.network))
//!     }
//! }
//!
//! let registry = SerializerRegistry::new();
//! registry.register::<Show>(DescriptorSerializer::new(
//!     Descriptor::builder("show").attributes(["id", "name"]).has_one("network").build().unwrap(),
//! ));
//! registry.register::<Network>(DescriptorSerializer::new(
//!     Descriptor::builder("network").attributes(["id", "name"]).build().unwrap(),
//! ));
//!
//! let show = Show { id: 1, name: "Lost", network: Network { id: 9, name: "ABC" } };
//! let document = JsonApiRenderer::new()
//!     .render_objects(&Serialization::new(&registry), [&show as &dyn DomainObject])
//!     .unwrap();
//!
//! assert_eq!(document.to_value(), json!({
//!     "shows": [{"id": 1, "name": "Lost", "links": {"networks": 9}}],
//!     "linked": {"networks": [{"id": 9, "name": "ABC"}]},
//! }));
//! # }
//! ```

pub mod core;
#[cfg(feature = "jsonapi")]
pub mod jsonapi;

pub use sideload_core::{
	Descriptor, DescriptorSerializer, DomainObject, ObjectSerializer, Related, SerializableObject,
	SerializeError, Serialization, SerializationSettings, SerializerRegistry, serialize,
};

#[cfg(feature = "jsonapi")]
pub use sideload_jsonapi::{
	Document, JsonApiRenderer, JsonApiSettings, RenderError, Resource, Subresource,
};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::core::{
		AccessorKind, Cardinality, Descriptor, DescriptorSerializer, DomainObject, ObjectSerializer,
		Related, SerializableAssociation, SerializableObject, SerializeError, SerializeResult,
		Serialization, SerializationSettings, SerializerRegistry,
	};

	#[cfg(feature = "jsonapi")]
	pub use crate::jsonapi::{
		Document, JsonApiRenderer, JsonApiSettings, LinkKeyStrategy, RenderError, RenderResult,
		Resource, Subresource,
	};

	// External
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Value, json};
}
