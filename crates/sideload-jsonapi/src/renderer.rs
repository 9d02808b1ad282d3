//! JSON:API renderer
//!
//! Flattens a sequence of [`Resource`]s into a [`Document`]. Each top-level
//! resource becomes a record under its pluralized type; every resource
//! reachable through sub-resources is written once into the linked section,
//! and parents refer to it by identity only. Record fields keep attribute
//! order.

use crate::document::Document;
use crate::error::{RenderError, RenderResult};
use crate::inflection::Pluralizer;
use crate::linked::{LinkedResources, WalkedSubtrees};
use crate::resource::{Resource, Subresource};
use crate::settings::{JsonApiSettings, LinkKeyStrategy};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use sideload_core::{DomainObject, SerializableObject, Serialization};

/// Media type of rendered documents.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// Short format name used when registering the renderer with a host.
pub const FORMAT_NAME: &str = "json_api";

/// Renders resources into JSON:API documents.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sideload_jsonapi::renderer::JsonApiRenderer;
/// use sideload_jsonapi::resource::{Resource, Subresource};
///
/// let show = Resource::new("show", json!(1))
///     .attribute("id", json!(1))
///     .attribute("name", json!("Lost"))
///     .subresource("network", Subresource::One(
///         Resource::new("network", json!(9))
///             .attribute("id", json!(9))
///             .attribute("name", json!("ABC")),
///     ));
///
/// let document = JsonApiRenderer::new().render(&[show]).unwrap();
///
/// assert_eq!(document.to_value(), json!({
///     "shows": [{"id": 1, "name": "Lost", "links": {"networks": 9}}],
///     "linked": {"networks": [{"id": 9, "name": "ABC"}]},
/// }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonApiRenderer {
	settings: JsonApiSettings,
	pluralizer: Pluralizer,
}

impl JsonApiRenderer {
	/// Renderer with default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Renderer with the given settings.
	pub fn with_settings(settings: JsonApiSettings) -> Self {
		let pluralizer = Pluralizer::new().with_overrides(settings.plurals.clone());
		Self {
			settings,
			pluralizer,
		}
	}

	/// Active settings.
	pub fn settings(&self) -> &JsonApiSettings {
		&self.settings
	}

	/// Media type of rendered documents.
	pub fn media_type(&self) -> &'static str {
		MEDIA_TYPE
	}

	/// Collection key for a singular type.
	pub fn pluralize(&self, type_name: &str) -> String {
		self.pluralizer.pluralize(type_name)
	}

	/// Render `resources` into a document.
	///
	/// An empty input yields a document with no primary collections and an
	/// empty linked section.
	pub fn render(&self, resources: &[Resource]) -> RenderResult<Document> {
		self.render_into(IndexMap::new(), resources)
	}

	/// Render a collection of `type_name` resources.
	///
	/// The collection key is present even when `resources` is empty.
	pub fn render_collection(&self, type_name: &str, resources: &[Resource]) -> RenderResult<Document> {
		let primary = IndexMap::from([(self.pluralize(type_name), Vec::new())]);
		self.render_into(primary, resources)
	}

	/// Serialize domain objects through `serialization`, then render them.
	///
	/// Nothing is rendered if any object fails to serialize.
	pub fn render_objects<'o, I>(&self, serialization: &Serialization<'_>, objects: I) -> RenderResult<Document>
	where
		I: IntoIterator<Item = &'o dyn DomainObject>,
	{
		let serialized = serialization.serialize_all(objects)?;
		self.render_serialized(serialized)
	}

	/// Render already-serialized objects.
	pub fn render_serialized(&self, objects: Vec<SerializableObject>) -> RenderResult<Document> {
		let resources: Vec<Resource> = objects.into_iter().map(Resource::from).collect();
		self.render(&resources)
	}

	/// Record for one resource: its attributes, plus a link map when it has
	/// sub-resources.
	pub fn serialize_resource(&self, resource: &Resource) -> RenderResult<Value> {
		let path = resource.type_name().unwrap_or_default();
		self.record(resource, path).map(Value::Object)
	}

	fn render_into(
		&self,
		mut primary: IndexMap<String, Vec<Value>>,
		resources: &[Resource],
	) -> RenderResult<Document> {
		let mut linked = LinkedResources::new();
		let mut walked = WalkedSubtrees::new();

		for (index, resource) in resources.iter().enumerate() {
			let type_name = resource
				.type_name()
				.ok_or_else(|| RenderError::UnresolvedResourceType {
					path: format!("[{index}]"),
				})?;
			let key = self.pluralize(type_name);
			let path = format!("{key}[{index}]");
			let record = self.record(resource, &path)?;
			primary.entry(key).or_default().push(Value::Object(record));
			self.collect_linked(resource, &path, &mut linked, &mut walked)?;
		}

		tracing::debug!(
			primary = primary.values().map(Vec::len).sum::<usize>(),
			linked = linked.record_count(),
			"rendered json:api document"
		);
		Ok(Document::new(
			primary,
			linked.into_map(),
			self.settings.linked_key.as_str(),
		))
	}

	fn record(&self, resource: &Resource, path: &str) -> RenderResult<Map<String, Value>> {
		let mut record: Map<String, Value> = resource
			.attributes()
			.iter()
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect();

		if resource.subresources().is_empty() {
			return Ok(record);
		}

		let mut links = Map::new();
		for (relation, subresource) in resource.subresources() {
			let key = self.link_key(relation, subresource, path)?;
			let value = match subresource {
				Subresource::One(related) => related.identity().clone(),
				Subresource::Many { items, .. } => {
					Value::Array(items.iter().map(|item| item.identity().clone()).collect())
				}
			};
			if links.insert(key.clone(), value).is_some() {
				tracing::warn!(
					path,
					relation = relation.as_str(),
					key = key.as_str(),
					"link key collision, later relation wins"
				);
			}
		}
		record.insert(self.settings.links_key.clone(), Value::Object(links));
		Ok(record)
	}

	fn link_key(&self, relation: &str, subresource: &Subresource, path: &str) -> RenderResult<String> {
		if self.settings.link_keys == LinkKeyStrategy::RelationName {
			return Ok(relation.to_string());
		}
		match (subresource.type_name(), subresource) {
			(Some(type_name), _) => Ok(self.pluralize(type_name)),
			(None, Subresource::Many { items, .. }) if items.is_empty() => Ok(relation.to_string()),
			(None, _) => Err(RenderError::UnresolvedResourceType {
				path: format!("{path}.{relation}"),
			}),
		}
	}

	fn collect_linked<'r>(
		&self,
		resource: &'r Resource,
		path: &str,
		linked: &mut LinkedResources,
		walked: &mut WalkedSubtrees<'r>,
	) -> RenderResult<()> {
		for (relation, subresource) in resource.subresources() {
			let many = subresource.is_collection();
			for (index, related) in subresource.resources().iter().enumerate() {
				let path = if many {
					format!("{path}.{relation}[{index}]")
				} else {
					format!("{path}.{relation}")
				};
				let type_name = related
					.type_name()
					.ok_or_else(|| RenderError::UnresolvedResourceType { path: path.clone() })?;
				let key = self.pluralize(type_name);
				let record = self.record(related, &path)?;

				linked.insert(&key, related.identity(), Value::Object(record));
				// Copies with equal records can still differ further down
				if walked.first_walk(&key, related.identity(), related.subresources()) {
					self.collect_linked(related, &path, linked, walked)?;
				}
			}
		}
		Ok(())
	}
}
