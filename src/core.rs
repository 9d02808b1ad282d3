//! Descriptors, the serializer registry and object-graph serialization.
//!
//! # Examples
//!
//! ```rust
//! use sideload::core::{Descriptor, SerializerRegistry};
//!
//! let registry = SerializerRegistry::new();
//! let descriptor = Descriptor::builder("show").attribute("id").build().unwrap();
//! assert_eq!(descriptor.identity_key(), "id");
//! assert!(registry.is_empty());
//! ```

pub use sideload_core::*;
