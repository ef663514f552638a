//! Configuration

// Imports
use {crate::args::Args, anyhow::Context, csim::Geometry};

/// Configuration
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Set index bits
	#[serde(default)]
	pub set_index_bits: Option<u32>,

	/// Lines per set
	#[serde(default)]
	pub lines_per_set: Option<usize>,

	/// Block offset bits
	#[serde(default)]
	pub block_offset_bits: Option<u32>,

	/// Debug output period (in seconds)
	#[serde(default = "default_debug_output_period_secs")]
	pub debug_output_period_secs: f64,
}

impl Config {
	/// Builds the cache geometry, with any parameter given in `args` taking precedence.
	///
	/// # Errors
	/// Returns an error if a parameter is given by neither, or if the geometry is invalid.
	pub fn geometry(&self, args: &Args) -> Result<Geometry, anyhow::Error> {
		let set_index_bits = args.set_index_bits.or(self.set_index_bits);
		let lines_per_set = args.lines_per_set.or(self.lines_per_set);
		let block_offset_bits = args.block_offset_bits.or(self.block_offset_bits);
		let (Some(set_index_bits), Some(lines_per_set), Some(block_offset_bits)) =
			(set_index_bits, lines_per_set, block_offset_bits)
		else {
			anyhow::bail!("Missing required command line argument (`-s`, `-E` and `-b` are required)");
		};

		Geometry::new(set_index_bits, lines_per_set, block_offset_bits).context("Invalid cache geometry")
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			set_index_bits:           None,
			lines_per_set:            None,
			block_offset_bits:        None,
			debug_output_period_secs: self::default_debug_output_period_secs(),
		}
	}
}

fn default_debug_output_period_secs() -> f64 {
	1.0
}
