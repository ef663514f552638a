//! Line set

// Imports
use {crate::geometry::Tag, std::collections::VecDeque};

/// Lines of a single cache set.
///
/// Lines are kept in recency order, from the least recently used at the
/// front to the most recently used at the back. No two lines share a tag
/// and there are never more than `capacity` lines.
#[derive(Clone, Debug)]
pub struct LineSet {
	/// Resident tags, in recency order
	lines: VecDeque<Tag>,

	/// Capacity
	capacity: usize,
}

impl LineSet {
	/// Creates an empty line set with room for `capacity` lines
	pub fn new(capacity: usize) -> Self {
		// Note: We don't pre-allocate, since most sets of large caches are never touched.
		Self {
			lines: VecDeque::new(),
			capacity,
		}
	}

	/// Returns if a line with `tag` is resident
	pub fn lookup(&self, tag: Tag) -> bool {
		self.lines.contains(&tag)
	}

	/// Moves the line with `tag` to the most recently used position.
	///
	/// # Panics
	/// Panics if `tag` isn't resident.
	pub fn promote(&mut self, tag: Tag) {
		let idx = self
			.lines
			.iter()
			.position(|&line| line == tag)
			.expect("Promoted tag wasn't resident");

		// Note: The `remove` is `O(E)`, same as the search above it.
		//       Promoting the most recent line is common, so skip the shuffle.
		if idx + 1 != self.lines.len() {
			let line = self.lines.remove(idx).expect("Index was just found");
			self.lines.push_back(line);
		}
	}

	/// Inserts a line with `tag` as the most recently used.
	///
	/// If this takes the set over capacity, the least recently used line is
	/// evicted and its tag is returned.
	///
	/// Must only be called with a `tag` that isn't resident.
	pub fn insert(&mut self, tag: Tag) -> Option<Tag> {
		debug_assert!(!self.lookup(tag), "Inserted tag was already resident: {tag:?}");

		self.lines.push_back(tag);
		match self.lines.len() > self.capacity {
			true => self.lines.pop_front(),
			false => None,
		}
	}

	/// Returns the number of resident lines
	pub fn len(&self) -> usize {
		self.lines.len()
	}

	/// Returns if no lines are resident
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Returns the capacity
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Returns all resident tags, from least to most recently used
	pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
		self.lines.iter().copied()
	}
}

#[cfg(test)]
mod tests {
	use {
		super::LineSet,
		crate::geometry::Tag,
		itertools::Itertools,
		proptest::prelude::*,
	};

	fn tags(set: &LineSet) -> Vec<u64> {
		set.iter().map(Tag::to_u64).collect()
	}

	#[test]
	fn insert_until_full_then_evict_front() {
		let mut set = LineSet::new(2);
		assert!(set.is_empty());

		assert_eq!(set.insert(Tag::new(1)), None);
		assert_eq!(set.insert(Tag::new(2)), None);
		assert_eq!(tags(&set), [1, 2]);

		assert_eq!(set.insert(Tag::new(3)), Some(Tag::new(1)));
		assert_eq!(tags(&set), [2, 3]);
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn promote_reorders_only_target() {
		let mut set = LineSet::new(4);
		for tag in 1..=4 {
			assert_eq!(set.insert(Tag::new(tag)), None);
		}

		set.promote(Tag::new(2));
		assert_eq!(tags(&set), [1, 3, 4, 2]);

		set.promote(Tag::new(2));
		assert_eq!(tags(&set), [1, 3, 4, 2]);

		set.promote(Tag::new(1));
		assert_eq!(tags(&set), [3, 4, 2, 1]);

		assert_eq!(set.insert(Tag::new(5)), Some(Tag::new(3)));
	}

	#[test]
	fn single_line_always_evicts() {
		let mut set = LineSet::new(1);
		assert_eq!(set.insert(Tag::new(7)), None);
		assert_eq!(set.insert(Tag::new(8)), Some(Tag::new(7)));
		assert!(!set.lookup(Tag::new(7)));
		assert!(set.lookup(Tag::new(8)));
	}

	#[test]
	#[should_panic(expected = "Promoted tag wasn't resident")]
	fn promote_missing_panics() {
		let mut set = LineSet::new(1);
		set.promote(Tag::new(1));
	}

	proptest! {
		#[test]
		fn capacity_and_uniqueness_hold(capacity in 1usize..8, accesses in prop::collection::vec(0u64..16, 0..256)) {
			let mut set = LineSet::new(capacity);
			for tag in accesses.into_iter().map(Tag::new) {
				match set.lookup(tag) {
					true => set.promote(tag),
					false => {
						let _ = set.insert(tag);
					},
				}

				prop_assert!(set.len() <= capacity);
				prop_assert!(set.iter().all_unique());
				prop_assert_eq!(set.iter().last(), Some(tag));
			}
		}
	}
}
