//! Simulator

// Imports
use {
	crate::{
		trace::{RecordAccessKind, TraceReader},
		Cache,
	},
	anyhow::Context,
	std::{
		io::{self, Write},
		time::{Duration, Instant},
	},
};

/// Simulator
#[derive(Debug)]
pub struct Simulator {
	/// Debug output period
	///
	/// Interval in which to output debug output for the cache
	debug_output_period: Duration,
}

impl Simulator {
	/// Creates a new simulator
	pub fn new(debug_output_period: Duration) -> Self {
		Self { debug_output_period }
	}

	/// Runs the simulator on all records from `trace_reader` with cache `cache`.
	///
	/// If `verbose_output` is given, each record is echoed to it along with the outcome of
	/// each of its accesses.
	pub fn run<R: io::BufRead>(
		&mut self,
		trace_reader: &mut TraceReader<R>,
		cache: &mut Cache,
		mut verbose_output: Option<&mut dyn io::Write>,
	) -> Result<RunOutput, anyhow::Error> {
		// Note: We start in the past so that we output right away at the start
		let start_time = Instant::now();
		let mut last_debug_time = start_time.checked_sub(self.debug_output_period).unwrap_or(start_time);

		let mut output = RunOutput::default();
		while let Some(record) = trace_reader.read_next().context("Unable to read next record")? {
			match record.kind {
				RecordAccessKind::Load => output.loads += 1,
				RecordAccessKind::Store => output.stores += 1,
				RecordAccessKind::Modify => output.modifies += 1,
			}

			if let Some(verbose_output) = &mut verbose_output {
				write!(verbose_output, "{}", trace_reader.cur_line()).context("Unable to write verbose output")?;
			}

			// Note: A modify is a load followed by a store to the same address,
			//       so the second access is always a hit.
			for _ in 0..record.kind.accesses() {
				let outcome = cache.access(record.addr);
				if let Some(verbose_output) = &mut verbose_output {
					write!(verbose_output, "{outcome}").context("Unable to write verbose output")?;
				}
			}

			if let Some(verbose_output) = &mut verbose_output {
				writeln!(verbose_output).context("Unable to write verbose output")?;
			}

			// Then show debug output, if it's been long enough
			let cur_time = Instant::now();
			if cur_time.duration_since(last_debug_time) >= self.debug_output_period {
				tracing::info!(
					"[{} lines] Debug: {}",
					trace_reader.lines_read(),
					csim_util::DisplayWrapper::new(|f| cache.fmt_debug(f))
				);
				last_debug_time = cur_time;
			}
		}
		output.ignored = trace_reader.lines_ignored();

		tracing::debug!(?output, elapsed = ?start_time.elapsed(), "Finished simulation");
		Ok(output)
	}
}

/// Output for [`Simulator::run`]
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct RunOutput {
	/// Load records
	pub loads: u64,

	/// Store records
	pub stores: u64,

	/// Modify records
	pub modifies: u64,

	/// Ignored lines
	pub ignored: u64,
}

impl RunOutput {
	/// Returns the number of cache accesses performed
	pub fn accesses(&self) -> u64 {
		self.loads + self.stores + 2 * self.modifies
	}
}
