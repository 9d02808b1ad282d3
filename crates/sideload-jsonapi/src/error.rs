//! Error types for rendering JSON:API documents.

use sideload_core::SerializeError;
use thiserror::Error;

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while flattening resources into a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RenderError {
	/// A resource reached during flattening has no type to key it under.
	#[error("resource at '{path}' has no type")]
	UnresolvedResourceType {
		/// Relation names leading from the top-level resource, joined by `.`
		path: String,
	},

	/// Object serialization failed before rendering started.
	#[error(transparent)]
	Serialize(#[from] SerializeError),
}
