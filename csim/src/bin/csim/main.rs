//! Set-associative LRU cache simulator (`csim`)

// Modules
mod args;
mod config;

// Imports
use {
	self::{args::Args, config::Config},
	anyhow::Context,
	clap::Parser,
	csim::{data, Cache, Simulator, TraceReader},
	csim_util::logger,
	std::{
		fs,
		io::{self, BufReader, Write},
		time::Duration,
	},
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Read the config file, if any
	let config = match &args.config_file {
		Some(config_file) => {
			let config_file = fs::File::open(config_file).context("Unable to open config file")?;
			serde_json::from_reader::<_, Config>(config_file).context("Unable to parse config file")?
		},
		None => Config::default(),
	};
	tracing::debug!(?config, "Loaded config");

	// Then build the geometry, preferring the command line
	let geometry = config.geometry(&args)?;
	tracing::debug!(?geometry, "Cache geometry");

	let debug_output_period = Duration::try_from_secs_f64(config.debug_output_period_secs)
		.context("Invalid debug output period")?;

	// Open the trace file
	let trace_file = fs::File::open(&args.trace_file).context("Unable to open trace file")?;
	let mut trace_reader = TraceReader::from_reader(BufReader::new(trace_file));

	// Run the simulator
	let mut sim = Simulator::new(debug_output_period);
	let mut cache = Cache::new(geometry);
	let stdout = io::stdout();
	let mut stdout = stdout.lock();
	let run_output = sim
		.run(
			&mut trace_reader,
			&mut cache,
			args.verbose.then_some(&mut stdout as &mut dyn io::Write),
		)
		.context("Unable to run simulator")?;

	// Print the summary
	let statistics = cache.statistics();
	writeln!(stdout, "{statistics}").context("Unable to write summary")?;
	stdout.flush().context("Unable to flush stdout")?;

	if let Some(output_path) = &args.output_file {
		let data = data::Data::new(&geometry, statistics, &run_output);

		let output_file = fs::File::create(output_path).context("Unable to create output file")?;
		serde_json::to_writer_pretty(output_file, &data).context("Unable to write to output file")?;
	}

	Ok(())
}
