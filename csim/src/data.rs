//! Output data

// Imports
use crate::{cache::Statistics, sim::RunOutput, Geometry};

/// Output data
#[derive(PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Data {
	pub geometry:   GeometryData,
	pub statistics: StatisticsData,
	pub records:    RecordsData,
}

impl Data {
	/// Collects the output data of a finished run
	pub fn new(geometry: &Geometry, statistics: &Statistics, run_output: &RunOutput) -> Self {
		Self {
			geometry:   GeometryData {
				set_index_bits:    geometry.set_index_bits(),
				lines_per_set:     geometry.lines_per_set(),
				block_offset_bits: geometry.block_offset_bits(),
			},
			statistics: StatisticsData {
				hits:      statistics.hits,
				misses:    statistics.misses,
				evictions: statistics.evictions,
			},
			records:    RecordsData {
				loads:    run_output.loads,
				stores:   run_output.stores,
				modifies: run_output.modifies,
				ignored:  run_output.ignored,
			},
		}
	}
}

/// Geometry output data
#[derive(PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct GeometryData {
	pub set_index_bits:    u32,
	pub lines_per_set:     usize,
	pub block_offset_bits: u32,
}

/// Statistics output data
#[derive(PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StatisticsData {
	pub hits:      u64,
	pub misses:    u64,
	pub evictions: u64,
}

/// Record counts output data
#[derive(PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RecordsData {
	pub loads:    u64,
	pub stores:   u64,
	pub modifies: u64,
	pub ignored:  u64,
}
