//! Arguments

// Imports
use std::path::PathBuf;

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
#[clap(about = "Simulates a set-associative LRU cache over a memory trace")]
#[clap(after_help = "Examples:
  csim -s 4 -E 1 -b 4 -t traces/yi.trace
  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace")]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Verbose output
	///
	/// Echoes every data access record along with its outcome.
	#[clap(short = 'v', long = "verbose")]
	pub verbose: bool,

	/// Number of set index bits
	#[clap(short = 's', long = "set-index-bits")]
	pub set_index_bits: Option<u32>,

	/// Number of lines per set
	#[clap(short = 'E', long = "lines-per-set")]
	pub lines_per_set: Option<usize>,

	/// Number of block offset bits
	#[clap(short = 'b', long = "block-offset-bits")]
	pub block_offset_bits: Option<u32>,

	/// Trace file
	#[clap(short = 't', long = "trace")]
	pub trace_file: PathBuf,

	/// Config file
	///
	/// Any geometry parameters given on the command line take precedence.
	#[clap(long = "config")]
	pub config_file: Option<PathBuf>,

	/// Output file
	#[clap(long = "output")]
	pub output_file: Option<PathBuf>,
}
