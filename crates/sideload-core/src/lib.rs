//! # sideload-core
//!
//! Format-agnostic half of the sideload pipeline: turns a graph of domain
//! objects into [`SerializableObject`]s that a format transducer can consume.
//!
//! ## Features
//!
//! - **Descriptors**: static per-type metadata (root key, identity key,
//!   ordered attributes, `single`/`multiple` associations)
//! - **Registry**: polymorphic serializer lookup by runtime type, tag, or fallback
//! - **Serializer hooks**: overridable filtering and value loading
//! - **Recursive serialization**: depth limits and circular reference detection
//!
//! ## Examples
//!
//! ```rust
//! use serde_json::{Value, json};
//! use sideload_core::{Descriptor, DescriptorSerializer, DomainObject, Related, Serialization, SerializerRegistry};
//!
//! struct Network { id: i64 }
//! struct Show { id: i64, network: Network }
//!
//! impl DomainObject for Network {
//!     fn read_attribute(&self, name: &str) -> Option<Value> {
//!         (name == "id").then(|| json!(self.id))
//!     }
//! }
//!
//! impl DomainObject for Show {
//!     fn read_attribute(&self, name: &str) -> Option<Value> {
//!         (name == "id").then(|| json!(self.id))
//!     }
//!     fn read_association(&self, name: &str) -> Option<Related<'_>> {
//!         (name == "network").then(|| Related::one(&self.network))
//!     }
//! }
//!
//! let registry = SerializerRegistry::new();
//! registry.register::<Show>(DescriptorSerializer::new(
//!     Descriptor::builder("show").attribute("id").has_one("network").build().unwrap(),
//! ));
//! registry.register::<Network>(DescriptorSerializer::new(
//!     Descriptor::builder("network").attribute("id").build().unwrap(),
//! ));
//!
//! let show = Show { id: 1, network: Network { id: 9 } };
//! let object = Serialization::new(&registry).serialize_resolved(&show).unwrap();
//! assert_eq!(object.association("network").unwrap().items()[0].identity(), &json!(9));
//! ```

pub mod descriptor;
pub mod error;
pub mod object;
pub mod recursive;
pub mod registry;
pub mod serializable;
pub mod serialization;
pub mod serializer;
pub mod settings;

// Re-export commonly used types
pub use descriptor::{AssociationDescriptor, Cardinality, Descriptor, DescriptorBuilder};
pub use error::{AccessorKind, DescriptorError, SerializeError, SerializeResult, SettingsError};
pub use object::{AsAny, DomainObject, Related};
pub use recursive::SerializationContext;
pub use registry::{FallbackResolver, SerializerRegistry, SharedSerializer};
pub use serializable::{SerializableAssociation, SerializableObject};
pub use serialization::{Serialization, serialize};
pub use serializer::{DescriptorSerializer, ObjectSerializer};
pub use settings::SerializationSettings;
