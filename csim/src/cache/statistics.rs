//! Statistics

// Imports
use std::fmt;

/// Access statistics
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct Statistics {
	/// Hits
	pub hits: u64,

	/// Misses
	pub misses: u64,

	/// Evictions
	pub evictions: u64,
}

impl Statistics {
	/// Creates new, empty, statistics
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the total number of accesses
	pub fn accesses(&self) -> u64 {
		self.hits + self.misses
	}
}

/// Summary line, `hits:<n> misses:<n> evictions:<n>`
impl fmt::Display for Statistics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "hits:{} misses:{} evictions:{}", self.hits, self.misses, self.evictions)
	}
}
