//! JSON:API rendering module.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "jsonapi")]
//! use sideload::jsonapi::{JsonApiRenderer, MEDIA_TYPE};
//! # #[cfg(feature = "jsonapi")]
//! assert_eq!(JsonApiRenderer::new().media_type(), MEDIA_TYPE);
//! ```

#[cfg(feature = "jsonapi")]
pub use sideload_jsonapi::*;
