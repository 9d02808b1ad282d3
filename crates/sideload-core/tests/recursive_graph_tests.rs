//! Integration tests for depth limits and circular references

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use sideload_core::{
	Descriptor, DescriptorSerializer, DomainObject, Related, SerializeError, Serialization,
	SerializationSettings, SerializerRegistry,
};
use std::cell::OnceCell;
use std::rc::Rc;

/// A node whose parent link can be set after construction, so a graph can loop.
struct Category {
	id: i64,
	parent: OnceCell<Rc<Category>>,
	children: Vec<Rc<Category>>,
}

impl Category {
	fn new(id: i64, children: Vec<Rc<Category>>) -> Rc<Self> {
		Rc::new(Self {
			id,
			parent: OnceCell::new(),
			children,
		})
	}
}

impl DomainObject for Category {
	fn read_attribute(&self, name: &str) -> Option<Value> {
		(name == "id").then(|| json!(self.id))
	}

	fn read_association(&self, name: &str) -> Option<Related<'_>> {
		match name {
			"parent" => Some(Related::optional(self.parent.get().map(|p| p.as_ref()))),
			"children" => Some(Related::many(self.children.iter().map(|c| c.as_ref()))),
			_ => None,
		}
	}
}

#[fixture]
fn registry() -> SerializerRegistry {
	let registry = SerializerRegistry::new();
	registry.register::<Category>(DescriptorSerializer::new(
		Descriptor::builder("category")
			.attribute("id")
			.has_one("parent")
			.has_many("children")
			.build()
			.unwrap(),
	));
	registry
}

fn chain(depth: i64) -> Rc<Category> {
	let mut node = Category::new(depth, Vec::new());
	for id in (0..depth).rev() {
		node = Category::new(id, vec![node]);
	}
	node
}

#[rstest]
fn test_chain_within_depth_limit(registry: SerializerRegistry) {
	// Arrange
	let root = chain(3);
	let serialization =
		Serialization::new(&registry).with_settings(SerializationSettings::new().max_depth(3));

	// Act
	let object = serialization.serialize_resolved(root.as_ref()).unwrap();

	// Assert
	let mut depth = 0;
	let mut current = &object;
	while let Some(child) = current.association("children").unwrap().items().first() {
		current = child;
		depth += 1;
	}
	assert_eq!(depth, 3);
	assert_eq!(current.identity(), &json!(3));
}

#[rstest]
fn test_chain_past_depth_limit(registry: SerializerRegistry) {
	let root = chain(3);
	let serialization =
		Serialization::new(&registry).with_settings(SerializationSettings::new().max_depth(2));

	let err = serialization
		.serialize_resolved(root.as_ref())
		.unwrap_err();

	assert_eq!(
		err,
		SerializeError::DepthExceeded {
			type_name: "category".to_string(),
			depth: 3,
			max_depth: 2,
		}
	);
}

#[rstest]
fn test_cycle_is_reported(registry: SerializerRegistry) {
	// Arrange: parent -> child -> parent
	let child = Category::new(2, Vec::new());
	let parent = Category::new(1, vec![Rc::clone(&child)]);
	let _ = child.parent.set(Rc::clone(&parent));

	// Act
	let err = Serialization::new(&registry)
		.serialize_resolved(parent.as_ref())
		.unwrap_err();

	// Assert
	assert_eq!(
		err,
		SerializeError::CycleDetected {
			type_name: "category".to_string(),
			identity: "1".to_string(),
		}
	);
}

#[rstest]
fn test_cycle_bounded_by_depth_when_detection_disabled(registry: SerializerRegistry) {
	let child = Category::new(2, Vec::new());
	let parent = Category::new(1, vec![Rc::clone(&child)]);
	let _ = child.parent.set(Rc::clone(&parent));
	let settings = SerializationSettings::new()
		.max_depth(5)
		.detect_cycles(false);

	let err = Serialization::new(&registry)
		.with_settings(settings)
		.serialize_resolved(parent.as_ref())
		.unwrap_err();

	assert!(matches!(err, SerializeError::DepthExceeded { max_depth: 5, .. }));
}

#[rstest]
fn test_shared_object_is_not_a_cycle(registry: SerializerRegistry) {
	// Two siblings pointing at the same parent object
	let shared = Category::new(7, Vec::new());
	let first = Category::new(1, Vec::new());
	let second = Category::new(2, Vec::new());
	let _ = first.parent.set(Rc::clone(&shared));
	let _ = second.parent.set(Rc::clone(&shared));
	let root = Category::new(0, vec![first, second]);

	let object = Serialization::new(&registry)
		.serialize_resolved(root.as_ref())
		.unwrap();

	let parents: Vec<_> = object
		.association("children")
		.unwrap()
		.items()
		.iter()
		.map(|child| child.association("parent").unwrap().items()[0].identity().clone())
		.collect();
	assert_eq!(parents, vec![json!(7), json!(7)]);
}

#[rstest]
fn test_multiple_association_count_matches_source(registry: SerializerRegistry) {
	let children = (1..=4).map(|id| Category::new(id, Vec::new())).collect();
	let root = Category::new(0, children);

	let object = Serialization::new(&registry)
		.serialize_resolved(root.as_ref())
		.unwrap();

	assert_eq!(object.association("children").unwrap().items().len(), 4);
	assert!(object.association("parent").unwrap().items().is_empty());
}
