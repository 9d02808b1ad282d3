//! Serializer registry and resolver
//!
//! Maps the runtime type of a domain object to the serializer responsible for
//! it. Lookups go, in order:
//!
//! 1. the object's `TypeId`,
//! 2. the object's [`type_tag`](crate::object::DomainObject::type_tag),
//! 3. the fallback resolver, if one is configured.
//!
//! A process-wide registry is available through the free functions in this
//! module. It is meant to be populated once during start-up and only read
//! afterwards.

use crate::error::{SerializeError, SerializeResult};
use crate::object::DomainObject;
use crate::serializer::ObjectSerializer;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handle to a registered serializer.
pub type SharedSerializer = Arc<dyn ObjectSerializer>;

/// Last-resort resolver consulted when no registration matches.
pub type FallbackResolver =
	Arc<dyn Fn(&dyn DomainObject) -> Option<SharedSerializer> + Send + Sync>;

/// Registry of serializers keyed by runtime type or tag.
#[derive(Default)]
pub struct SerializerRegistry {
	by_type: RwLock<HashMap<TypeId, SharedSerializer>>,
	by_tag: RwLock<HashMap<String, SharedSerializer>>,
	fallback: RwLock<Option<FallbackResolver>>,
}

impl SerializerRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register the serializer for domain type `T`.
	///
	/// Registering `T` again replaces the previous serializer.
	pub fn register<T: DomainObject>(&self, serializer: impl ObjectSerializer + 'static) {
		self.register_shared::<T>(Arc::new(serializer));
	}

	/// Register an already shared serializer for domain type `T`.
	pub fn register_shared<T: DomainObject>(&self, serializer: SharedSerializer) {
		let replaced = self
			.by_type
			.write()
			.insert(TypeId::of::<T>(), serializer)
			.is_some();
		tracing::debug!(
			type_name = std::any::type_name::<T>(),
			replaced,
			"registered serializer"
		);
	}

	/// Register a serializer under a type tag.
	///
	/// Tags match [`DomainObject::type_tag`] and are consulted only when no
	/// `TypeId` registration exists for the object.
	pub fn register_tag(&self, tag: impl Into<String>, serializer: impl ObjectSerializer + 'static) {
		let tag = tag.into();
		let replaced = self
			.by_tag
			.write()
			.insert(tag.clone(), Arc::new(serializer))
			.is_some();
		tracing::debug!(tag = %tag, replaced, "registered serializer for tag");
	}

	/// Install the fallback resolver, replacing any previous one.
	pub fn set_fallback<F>(&self, resolver: F)
	where
		F: Fn(&dyn DomainObject) -> Option<SharedSerializer> + Send + Sync + 'static,
	{
		*self.fallback.write() = Some(Arc::new(resolver));
	}

	/// Use one serializer for every object no registration matches.
	pub fn set_default(&self, serializer: impl ObjectSerializer + 'static) {
		let serializer: SharedSerializer = Arc::new(serializer);
		self.set_fallback(move |_| Some(Arc::clone(&serializer)));
	}

	/// Remove the fallback resolver.
	pub fn clear_fallback(&self) {
		*self.fallback.write() = None;
	}

	/// Resolve the serializer for `object` by its runtime type.
	pub fn resolver_for(&self, object: &dyn DomainObject) -> SerializeResult<SharedSerializer> {
		let type_id = object.as_any().type_id();
		if let Some(serializer) = self.by_type.read().get(&type_id) {
			return Ok(Arc::clone(serializer));
		}

		let tag = object.type_tag();
		if let Some(serializer) = self.by_tag.read().get(tag) {
			return Ok(Arc::clone(serializer));
		}

		let fallback = self.fallback.read().clone();
		if let Some(resolver) = fallback
			&& let Some(serializer) = resolver(object)
		{
			tracing::warn!(tag, "no serializer registered, using fallback");
			return Ok(serializer);
		}

		Err(SerializeError::UnresolvedType {
			type_tag: tag.to_string(),
		})
	}

	/// Check whether a serializer is registered for `T` by type.
	pub fn contains<T: DomainObject>(&self) -> bool {
		self.by_type.read().contains_key(&TypeId::of::<T>())
	}

	/// Check whether a serializer is registered under `tag`.
	pub fn contains_tag(&self, tag: &str) -> bool {
		self.by_tag.read().contains_key(tag)
	}

	/// Number of type and tag registrations.
	pub fn len(&self) -> usize {
		self.by_type.read().len() + self.by_tag.read().len()
	}

	/// `true` when nothing is registered (the fallback is not counted).
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Remove every registration and the fallback.
	///
	/// This is primarily useful for testing.
	pub fn clear(&self) {
		self.by_type.write().clear();
		self.by_tag.write().clear();
		self.clear_fallback();
	}
}

impl std::fmt::Debug for SerializerRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SerializerRegistry")
			.field("types", &self.by_type.read().len())
			.field("tags", &self.by_tag.read().keys().collect::<Vec<_>>())
			.field("fallback", &self.fallback.read().is_some())
			.finish()
	}
}

// Global registry instance
static GLOBAL_REGISTRY: Lazy<SerializerRegistry> = Lazy::new(SerializerRegistry::new);

/// The process-wide registry.
pub fn global() -> &'static SerializerRegistry {
	&GLOBAL_REGISTRY
}

/// Register the serializer for `T` in the global registry.
pub fn register<T: DomainObject>(serializer: impl ObjectSerializer + 'static) {
	GLOBAL_REGISTRY.register::<T>(serializer);
}

/// Register a serializer under a tag in the global registry.
pub fn register_tag(tag: impl Into<String>, serializer: impl ObjectSerializer + 'static) {
	GLOBAL_REGISTRY.register_tag(tag, serializer);
}

/// Install the global fallback resolver.
pub fn set_fallback<F>(resolver: F)
where
	F: Fn(&dyn DomainObject) -> Option<SharedSerializer> + Send + Sync + 'static,
{
	GLOBAL_REGISTRY.set_fallback(resolver);
}

/// Resolve a serializer from the global registry.
pub fn resolver_for(object: &dyn DomainObject) -> SerializeResult<SharedSerializer> {
	GLOBAL_REGISTRY.resolver_for(object)
}
