//! Depth tracking and circular reference detection
//!
//! The object graph handed to the serializer may nest arbitrarily deep and
//! may even loop back on itself. [`SerializationContext`] bounds the walk: it
//! counts association depth against a configured maximum and remembers which
//! objects are on the current path, so a loop is reported instead of
//! recursing until the stack runs out.

use crate::settings::SerializationSettings;
use std::any::TypeId;
use std::collections::HashSet;

/// Identity of an object on the current path.
pub(crate) type ObjectKey = (TypeId, usize);

/// Why the context refused to descend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
	/// Descending would pass the maximum depth.
	TooDeep {
		/// Depth of the refused object.
		depth: usize,
		/// Configured limit.
		max_depth: usize,
	},
	/// The object is already on the current path.
	Circular,
}

/// Context for tracking serialization depth and the objects being serialized.
#[derive(Debug, Clone)]
pub struct SerializationContext {
	/// Current depth level (0 = root)
	current_depth: usize,
	max_depth: usize,
	detect_cycles: bool,
	/// Objects entered but not yet left, keyed by runtime type and address
	path: HashSet<ObjectKey>,
}

impl SerializationContext {
	/// Create a context with the given maximum association depth.
	///
	/// # Examples
	///
	/// ```
	/// use sideload_core::recursive::SerializationContext;
	///
	/// let context = SerializationContext::new(3);
	/// assert_eq!(context.current_depth(), 0);
	/// assert_eq!(context.max_depth(), 3);
	/// ```
	pub fn new(max_depth: usize) -> Self {
		Self {
			current_depth: 0,
			max_depth,
			detect_cycles: true,
			path: HashSet::new(),
		}
	}

	/// Create a context from settings.
	pub fn from_settings(settings: &SerializationSettings) -> Self {
		Self {
			detect_cycles: settings.detect_cycles,
			..Self::new(settings.max_depth)
		}
	}

	/// Get the current depth
	pub fn current_depth(&self) -> usize {
		self.current_depth
	}

	/// Get the maximum depth
	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Get the remaining depth
	///
	/// ```
	/// use sideload_core::recursive::SerializationContext;
	///
	/// let context = SerializationContext::new(3);
	/// assert_eq!(context.remaining_depth(), 3);
	/// ```
	pub fn remaining_depth(&self) -> usize {
		self.max_depth.saturating_sub(self.current_depth)
	}

	/// Check if we can go deeper
	pub fn can_go_deeper(&self) -> bool {
		self.current_depth < self.max_depth
	}

	/// Number of objects currently on the path.
	pub fn path_len(&self) -> usize {
		self.path.len()
	}

	/// Enter `key` one level down, run `f`, then leave again.
	///
	/// The key is removed and the depth restored whether `f` succeeds or
	/// fails. Siblings that share a related object therefore never trip the
	/// cycle check; only a genuine loop on the current path does.
	pub(crate) fn descend_with<R, E>(
		&mut self,
		key: ObjectKey,
		refuse: impl FnOnce(Refusal) -> E,
		f: impl FnOnce(&mut Self) -> Result<R, E>,
	) -> Result<R, E> {
		if self.detect_cycles && self.path.contains(&key) {
			return Err(refuse(Refusal::Circular));
		}
		if !self.can_go_deeper() {
			return Err(refuse(Refusal::TooDeep {
				depth: self.current_depth + 1,
				max_depth: self.max_depth,
			}));
		}

		let inserted = self.detect_cycles && self.path.insert(key);
		self.current_depth += 1;
		let result = f(self);
		self.current_depth -= 1;
		if inserted {
			self.path.remove(&key);
		}
		result
	}

	/// Mark the root object as being on the path, run `f`, then clear it.
	pub(crate) fn enter_root<R, E>(
		&mut self,
		key: ObjectKey,
		f: impl FnOnce(&mut Self) -> Result<R, E>,
	) -> Result<R, E> {
		let inserted = self.detect_cycles && self.path.insert(key);
		let result = f(self);
		if inserted {
			self.path.remove(&key);
		}
		result
	}

	/// Reset the context to initial state
	pub fn reset(&mut self) {
		self.current_depth = 0;
		self.path.clear();
	}
}

impl Default for SerializationContext {
	fn default() -> Self {
		Self::from_settings(&SerializationSettings::default())
	}
}
