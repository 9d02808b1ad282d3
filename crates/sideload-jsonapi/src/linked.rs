//! Accumulator for the flattened `linked` section
//!
//! Records are grouped by pluralized type key. Insertion is set-union: a
//! record already present under its key (by full value equality) is not
//! added again. Records are bucketed by identity so the equality check only
//! runs against records of the same resource.
//!
//! [`WalkedSubtrees`] tracks which sub-resource trees have already been
//! descended into for each `(key, identity)`, so the renderer walks each
//! distinct subtree once no matter how many paths lead to it.

use crate::resource::Subresource;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;

/// Outcome of [`LinkedResources::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
	/// The record was new and has been appended.
	Added,
	/// An equal record was already present.
	Duplicate,
}

#[derive(Debug, Clone, Default)]
struct LinkedCollection {
	records: Vec<Value>,
	by_identity: HashMap<String, Vec<usize>>,
}

impl LinkedCollection {
	fn insert(&mut self, identity: String, record: Value) -> Insertion {
		let bucket = self.by_identity.entry(identity).or_default();
		if bucket.iter().any(|&index| self.records[index] == record) {
			return Insertion::Duplicate;
		}
		bucket.push(self.records.len());
		self.records.push(record);
		Insertion::Added
	}
}

/// Linked records keyed by pluralized type, deduplicated by value.
#[derive(Debug, Clone, Default)]
pub struct LinkedResources {
	collections: IndexMap<String, LinkedCollection>,
}

impl LinkedResources {
	/// Create an empty accumulator.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert `record` for the resource identified by `identity` under `key`.
	///
	/// # Examples
	///
	/// ```
	/// use serde_json::json;
	/// use sideload_jsonapi::linked::{Insertion, LinkedResources};
	///
	/// let mut linked = LinkedResources::new();
	/// let record = json!({"id": 9, "name": "ABC"});
	///
	/// assert_eq!(linked.insert("networks", &json!(9), record.clone()), Insertion::Added);
	/// assert_eq!(linked.insert("networks", &json!(9), record), Insertion::Duplicate);
	/// assert_eq!(linked.get("networks").unwrap().len(), 1);
	/// ```
	pub fn insert(&mut self, key: &str, identity: &Value, record: Value) -> Insertion {
		let outcome = self
			.collections
			.entry(key.to_string())
			.or_default()
			.insert(identity_key(identity), record);
		tracing::trace!(key, %identity, ?outcome, "linked record");
		outcome
	}

	/// Records under `key`, in insertion order.
	pub fn get(&self, key: &str) -> Option<&[Value]> {
		self.collections.get(key).map(|c| c.records.as_slice())
	}

	/// Number of distinct type keys.
	pub fn len(&self) -> usize {
		self.collections.len()
	}

	/// `true` when nothing has been inserted.
	pub fn is_empty(&self) -> bool {
		self.collections.is_empty()
	}

	/// Total number of records across all keys.
	pub fn record_count(&self) -> usize {
		self.collections.values().map(|c| c.records.len()).sum()
	}

	/// Consume into records keyed by pluralized type.
	pub fn into_map(self) -> IndexMap<String, Vec<Value>> {
		self.collections
			.into_iter()
			.map(|(key, collection)| (key, collection.records))
			.collect()
	}
}

/// Sub-resource trees already walked, per `(key, identity)`.
///
/// Two copies of one resource may link identical records yet differ further
/// down, so a tree is only skipped when an equal one was already walked.
#[derive(Debug, Default)]
pub struct WalkedSubtrees<'r> {
	walked: HashMap<(String, String), Vec<&'r IndexMap<String, Subresource>>>,
}

impl<'r> WalkedSubtrees<'r> {
	/// Create an empty tracker.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record `subresources` for `(key, identity)`.
	///
	/// Returns `true` when the tree still needs walking: it is non-empty and
	/// no equal tree was recorded for the same resource before.
	pub fn first_walk(
		&mut self,
		key: &str,
		identity: &Value,
		subresources: &'r IndexMap<String, Subresource>,
	) -> bool {
		if subresources.is_empty() {
			return false;
		}
		let trees = self
			.walked
			.entry((key.to_string(), identity_key(identity)))
			.or_default();
		if trees.iter().any(|tree| *tree == subresources) {
			return false;
		}
		trees.push(subresources);
		true
	}
}

fn identity_key(identity: &Value) -> String {
	match identity {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resource::Resource;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_insert_deduplicates_by_value() {
		// Arrange
		let mut linked = LinkedResources::new();

		// Act
		let first = linked.insert("networks", &json!(9), json!({"id": 9, "name": "ABC"}));
		let second = linked.insert("networks", &json!(9), json!({"name": "ABC", "id": 9}));

		// Assert
		assert_eq!(first, Insertion::Added);
		assert_eq!(second, Insertion::Duplicate);
		assert_eq!(linked.record_count(), 1);
	}

	#[rstest]
	fn test_same_identity_different_record_is_kept() {
		let mut linked = LinkedResources::new();

		linked.insert("networks", &json!(9), json!({"id": 9, "name": "ABC"}));
		let outcome = linked.insert(
			"networks",
			&json!(9),
			json!({"id": 9, "name": "ABC", "links": {"shows": [1]}}),
		);

		assert_eq!(outcome, Insertion::Added);
		assert_eq!(linked.get("networks").unwrap().len(), 2);
	}

	#[rstest]
	fn test_keys_keep_first_insertion_order() {
		let mut linked = LinkedResources::new();

		linked.insert("networks", &json!(9), json!({"id": 9}));
		linked.insert("episodes", &json!(10), json!({"id": 10}));
		linked.insert("networks", &json!(8), json!({"id": 8}));

		let map = linked.into_map();
		assert_eq!(map.keys().collect::<Vec<_>>(), vec!["networks", "episodes"]);
		assert_eq!(map["networks"], vec![json!({"id": 9}), json!({"id": 8})]);
	}

	#[rstest]
	fn test_first_walk_skips_equal_trees() {
		// Arrange
		let owner = |name: &str| {
			IndexMap::from([(
				"owner".to_string(),
				Subresource::One(Resource::new("company", json!(3)).attribute("name", json!(name))),
			)])
		};
		let first = owner("X");
		let same = owner("X");
		let different = owner("Y");
		let mut walked = WalkedSubtrees::new();

		// Act & Assert
		assert!(walked.first_walk("networks", &json!(9), &first));
		assert!(!walked.first_walk("networks", &json!(9), &same));
		assert!(walked.first_walk("networks", &json!(9), &different));
		assert!(walked.first_walk("shows", &json!(9), &first));
	}

	#[rstest]
	fn test_first_walk_ignores_leaves() {
		let leaf = IndexMap::new();
		let mut walked = WalkedSubtrees::new();

		assert!(!walked.first_walk("networks", &json!(9), &leaf));
	}

	#[rstest]
	#[case(json!(9), "9")]
	#[case(json!("abc"), "abc")]
	#[case(json!({"a": 1}), r#"{"a":1}"#)]
	fn test_identity_key(#[case] identity: Value, #[case] expected: &str) {
		assert_eq!(identity_key(&identity), expected);
	}

	#[rstest]
	fn test_empty() {
		let linked = LinkedResources::new();

		assert!(linked.is_empty());
		assert_eq!(linked.len(), 0);
		assert!(linked.get("shows").is_none());
		assert!(linked.into_map().is_empty());
	}
}
