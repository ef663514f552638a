//! Set-associative cache

// Modules
pub mod line_set;
pub mod statistics;

// Exports
pub use self::{line_set::LineSet, statistics::Statistics};

// Imports
use {
	crate::geometry::{Geometry, SetIdx, Tag},
	itertools::Itertools,
	std::fmt,
};

/// Set-associative cache with LRU replacement.
///
/// Only tags are tracked, no data.
#[derive(Debug)]
pub struct Cache {
	/// Geometry
	geometry: Geometry,

	/// All sets, by their index
	sets: Vec<LineSet>,

	/// Statistics
	statistics: Statistics,
}

impl Cache {
	/// Creates an empty cache
	pub fn new(geometry: Geometry) -> Self {
		let sets = vec![LineSet::new(geometry.lines_per_set()); geometry.sets()];
		Self {
			geometry,
			sets,
			statistics: Statistics::new(),
		}
	}

	/// Accesses `addr`.
	///
	/// Loads and stores are indistinguishable here: a modify is simply two accesses.
	pub fn access(&mut self, addr: u64) -> Outcome {
		let (set_idx, tag) = self.geometry.decode(addr);
		let set = &mut self.sets[set_idx.to_usize()];

		// If it's resident, it's now the most recently used
		if set.lookup(tag) {
			set.promote(tag);
			self.statistics.hits += 1;
			return Outcome::Hit;
		}

		// Else bring it in, possibly evicting the least recently used
		self.statistics.misses += 1;
		let evicted = set.insert(tag);
		if let Some(evicted) = evicted {
			tracing::trace!(?set_idx, ?tag, ?evicted, "Evicted line");
			self.statistics.evictions += 1;
		}

		Outcome::Miss { evicted }
	}

	/// Returns the geometry
	pub fn geometry(&self) -> &Geometry {
		&self.geometry
	}

	/// Returns a set
	///
	/// # Panics
	/// Panics if `set_idx` doesn't belong to this cache's geometry.
	pub fn set(&self, set_idx: SetIdx) -> &LineSet {
		&self.sets[set_idx.to_usize()]
	}

	/// Returns the statistics
	pub fn statistics(&self) -> &Statistics {
		&self.statistics
	}

	/// Formats debug output to `f`.
	pub fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		// Note: Start with a newline, since we're a multi-line output
		f.pad("\n")?;

		writeln!(f, "Statistics: {}", self.statistics)?;

		let used_sets = self.sets.iter().filter(|set| !set.is_empty()).count();
		let total_sets = self.sets.len();
		let used_sets_percentage = 100.0 * (used_sets as f64 / total_sets as f64);
		writeln!(f, "Used sets: {used_sets} / {total_sets} ({used_sets_percentage:.2}%)")?;

		let average_occupancy = self
			.sets
			.iter()
			.map(|set| set.len() as f64)
			.collect::<average::Variance>();
		let (min_occupancy, max_occupancy) = self
			.sets
			.iter()
			.map(LineSet::len)
			.minmax()
			.into_option()
			.unwrap_or((0, 0));
		writeln!(
			f,
			"Average set occupancy: {:.4} ± {:.4} ({min_occupancy}..{max_occupancy}) / {}",
			average_occupancy.mean(),
			average_occupancy.error(),
			self.geometry.lines_per_set()
		)?;

		Ok(())
	}
}

/// Outcome of a [`Cache::access`]
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Outcome {
	/// Line was resident
	Hit,

	/// Line wasn't resident and was brought in
	Miss {
		/// Line evicted to make room
		evicted: Option<Tag>,
	},
}

impl Outcome {
	/// Returns if this was a hit
	pub fn is_hit(self) -> bool {
		matches!(self, Self::Hit)
	}

	/// Returns if this was a miss
	pub fn is_miss(self) -> bool {
		matches!(self, Self::Miss { .. })
	}

	/// Returns if this caused an eviction
	pub fn is_eviction(self) -> bool {
		self.evicted().is_some()
	}

	/// Returns the evicted tag, if any
	pub fn evicted(self) -> Option<Tag> {
		match self {
			Self::Hit => None,
			Self::Miss { evicted } => evicted,
		}
	}
}

/// Verbose annotation, ` hit`, ` miss` or ` miss eviction`
impl fmt::Display for Outcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Hit => f.pad(" hit"),
			Self::Miss { evicted: None } => f.pad(" miss"),
			Self::Miss { evicted: Some(_) } => f.pad(" miss eviction"),
		}
	}
}
