//! Error types for descriptor construction and object serialization.

use thiserror::Error;

/// Result type for object serialization.
pub type SerializeResult<T> = Result<T, SerializeError>;

/// Which kind of accessor a descriptor referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
	/// A scalar attribute (including the identity key).
	Attribute,
	/// A `single` or `multiple` association.
	Association,
}

impl std::fmt::Display for AccessorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Attribute => write!(f, "attribute"),
			Self::Association => write!(f, "association"),
		}
	}
}

/// Errors raised while turning domain objects into serializable objects.
///
/// None of these are recovered internally: each one points at a malformed
/// descriptor or object graph that the caller has to fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SerializeError {
	/// No serializer is registered for the object's runtime type and no
	/// fallback resolver produced one.
	#[error("no serializer registered for type '{type_tag}'")]
	UnresolvedType {
		/// Tag reported by the unresolved object.
		type_tag: String,
	},

	/// The descriptor names an attribute or association the object does not expose.
	#[error("'{type_name}' does not expose {kind} '{name}'")]
	MissingAccessor {
		/// Root key of the descriptor being applied.
		type_name: String,
		/// Attribute or association.
		kind: AccessorKind,
		/// Accessor name that could not be read.
		name: String,
	},

	/// A `single` association yielded more than one related object.
	#[error("single association '{association}' on '{type_name}' yielded {count} objects")]
	InvalidCardinality {
		/// Root key of the owning descriptor.
		type_name: String,
		/// Association name.
		association: String,
		/// Number of objects the accessor returned.
		count: usize,
	},

	/// Association nesting went past the configured maximum depth.
	#[error("maximum depth exceeded while serializing '{type_name}': depth={depth}, max={max_depth}")]
	DepthExceeded {
		/// Root key of the object that would have been serialized.
		type_name: String,
		/// Depth the object sits at.
		depth: usize,
		/// Configured limit.
		max_depth: usize,
	},

	/// The same object was reached again while it was still being serialized.
	#[error("circular reference detected at '{type_name}' ({identity})")]
	CycleDetected {
		/// Root key of the object that closed the cycle.
		type_name: String,
		/// Identity value of that object, rendered as JSON.
		identity: String,
	},
}

impl SerializeError {
	pub(crate) fn missing_attribute(type_name: &str, name: &str) -> Self {
		Self::MissingAccessor {
			type_name: type_name.to_string(),
			kind: AccessorKind::Attribute,
			name: name.to_string(),
		}
	}

	pub(crate) fn missing_association(type_name: &str, name: &str) -> Self {
		Self::MissingAccessor {
			type_name: type_name.to_string(),
			kind: AccessorKind::Association,
			name: name.to_string(),
		}
	}
}

/// Errors raised when building a [`Descriptor`](crate::descriptor::Descriptor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DescriptorError {
	/// Root key was empty.
	#[error("descriptor root key must not be empty")]
	EmptyRootKey,

	/// Identity key was empty.
	#[error("descriptor identity key must not be empty")]
	EmptyIdentityKey,

	/// The same attribute name was declared twice.
	#[error("attribute '{0}' declared more than once")]
	DuplicateAttribute(String),

	/// The same association name was declared twice.
	#[error("association '{0}' declared more than once")]
	DuplicateAssociation(String),
}

/// Errors raised when loading [`SerializationSettings`](crate::settings::SerializationSettings).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SettingsError {
	/// An environment variable held a value that could not be parsed.
	#[error("invalid value for {variable}: {value}")]
	InvalidEnv {
		/// Variable name.
		variable: String,
		/// Raw value found.
		value: String,
	},

	/// Settings failed validation.
	#[error("settings validation failed: {0}")]
	Validation(String),
}
