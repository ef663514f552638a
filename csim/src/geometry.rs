//! Cache geometry and address decoding

// Imports
use std::fmt;

/// Cache geometry.
///
/// Fixed for the lifetime of a simulation. Addresses are split, from the
/// least significant bit up, into `block_offset_bits` of block offset,
/// `set_index_bits` of set index and the remaining bits.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Geometry {
	/// Set index bits (`s`)
	set_index_bits: u32,

	/// Lines per set (`E`)
	lines_per_set: usize,

	/// Block offset bits (`b`)
	block_offset_bits: u32,
}

impl Geometry {
	/// Address width, in bits
	pub const ADDR_BITS: u32 = u64::BITS;
	/// Maximum set index bits.
	///
	/// Every set is allocated up-front, so this caps the cache at `16Mi` sets.
	pub const MAX_SET_INDEX_BITS: u32 = 24;

	/// Creates a new geometry
	///
	/// # Errors
	/// Returns an error if any parameter is zero, if `set_index_bits` is over
	/// [`Self::MAX_SET_INDEX_BITS`], or if the set index and block offset
	/// don't fit in an address.
	pub fn new(set_index_bits: u32, lines_per_set: usize, block_offset_bits: u32) -> Result<Self, anyhow::Error> {
		anyhow::ensure!(set_index_bits > 0, "Set index bits must be positive");
		anyhow::ensure!(lines_per_set > 0, "Lines per set must be positive");
		anyhow::ensure!(block_offset_bits > 0, "Block offset bits must be positive");
		anyhow::ensure!(
			set_index_bits <= Self::MAX_SET_INDEX_BITS,
			"Set index bits must be at most {}, found {set_index_bits}",
			Self::MAX_SET_INDEX_BITS
		);
		anyhow::ensure!(
			set_index_bits.saturating_add(block_offset_bits) <= Self::ADDR_BITS,
			"Set index bits ({set_index_bits}) and block offset bits ({block_offset_bits}) exceed the {}-bit address \
			 width",
			Self::ADDR_BITS
		);

		Ok(Self {
			set_index_bits,
			lines_per_set,
			block_offset_bits,
		})
	}

	/// Returns the set index bits
	pub fn set_index_bits(&self) -> u32 {
		self.set_index_bits
	}

	/// Returns the lines per set
	pub fn lines_per_set(&self) -> usize {
		self.lines_per_set
	}

	/// Returns the block offset bits
	pub fn block_offset_bits(&self) -> u32 {
		self.block_offset_bits
	}

	/// Returns the number of sets
	pub fn sets(&self) -> usize {
		1 << self.set_index_bits
	}

	/// Decodes an address into its set index and tag.
	///
	/// The tag is everything above the block offset, so it also contains the set index bits.
	pub fn decode(&self, addr: u64) -> (SetIdx, Tag) {
		// Note: `block_offset_bits < 64`, since `set_index_bits` is positive.
		let block_addr = addr >> self.block_offset_bits;
		let set_mask = (1 << self.set_index_bits) - 1;

		// Note: `set_mask` fits in a `usize`, since the set index bits are capped.
		let set_idx = SetIdx((block_addr & set_mask) as usize);
		let tag = Tag(block_addr);

		(set_idx, tag)
	}

	/// Returns the block offset of an address
	pub fn block_offset(&self, addr: u64) -> u64 {
		addr & ((1 << self.block_offset_bits) - 1)
	}

	/// Re-assembles an address from a tag and a block offset.
	///
	/// Any bits of `block_offset` outside of the block offset are ignored.
	pub fn encode(&self, tag: Tag, block_offset: u64) -> u64 {
		(tag.0 << self.block_offset_bits) | self.block_offset(block_offset)
	}
}

/// Set index
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Debug)]
pub struct SetIdx(usize);

impl SetIdx {
	/// Returns this index as a `usize`
	pub fn to_usize(self) -> usize {
		self.0
	}
}

/// Tag.
///
/// Identifies a block within its set.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Tag(u64);

impl fmt::Debug for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Tag").field(&format_args!("{:#x}", self.0)).finish()
	}
}

impl Tag {
	/// Creates a tag from a `u64`
	pub fn new(tag: u64) -> Self {
		Self(tag)
	}

	/// Returns the tag as a `u64`
	pub fn to_u64(self) -> u64 {
		self.0
	}
}
