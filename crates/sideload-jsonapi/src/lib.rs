//! # sideload-jsonapi
//!
//! JSON:API transducer for sideload. Turns [`Resource`]s, or the
//! [`SerializableObject`](sideload_core::SerializableObject)s produced by
//! `sideload-core`, into a document whose related resources are flattened
//! into a single deduplicated `linked` section.
//!
//! ## Features
//!
//! - **Pluralized collection keys** with per-type overrides
//! - **Identity-only links** from each record to its related resources
//! - **Linked-resource dedup** by structural equality per collection
//! - **End-to-end pipeline** from domain objects to a rendered document
//!
//! ## Examples
//!
//! ```rust
//! use serde_json::json;
//! use sideload_jsonapi::{JsonApiRenderer, Resource, Subresource};
//!
//! let episodes = Subresource::many(vec![
//!     Resource::new("episode", json!(1)).attribute("id", json!(1)),
//!     Resource::new("episode", json!(2)).attribute("id", json!(2)),
//! ]);
//! let show = Resource::new("show", json!(1))
//!     .attribute("id", json!(1))
//!     .subresource("episodes", episodes);
//!
//! let document = JsonApiRenderer::new().render(&[show]).unwrap();
//!
//! assert_eq!(document.primary("shows").unwrap()[0]["links"]["episodes"], json!([1, 2]));
//! assert_eq!(document.linked("episodes").unwrap().len(), 2);
//! ```

pub mod document;
pub mod error;
pub mod inflection;
pub mod linked;
pub mod renderer;
pub mod resource;
pub mod settings;

pub use document::Document;
pub use error::{RenderError, RenderResult};
pub use inflection::{Pluralizer, pluralize};
pub use linked::{Insertion, LinkedResources};
pub use renderer::{FORMAT_NAME, JsonApiRenderer, MEDIA_TYPE};
pub use resource::{Resource, Subresource};
pub use settings::{JsonApiSettings, LinkKeyStrategy};
