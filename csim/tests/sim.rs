//! Simulator runs over whole traces

// Imports
use {
	csim::{cache::Statistics, data, sim::RunOutput, Cache, Geometry, Simulator, TraceReader},
	proptest::prelude::*,
	std::{io, time::Duration},
};

/// The classic `yi.trace`
const YI_TRACE: &str = " L 10,1\n M 20,1\n L 22,1\n S 18,1\n L 110,1\n L 210,1\n M 12,1\n";

/// Runs `trace` through a fresh cache, returning the statistics, run output and verbose output
fn run(trace: impl AsRef<[u8]>, geometry: Geometry) -> (Statistics, RunOutput, String) {
	let mut trace_reader = TraceReader::from_reader(io::Cursor::new(trace));
	let mut cache = Cache::new(geometry);
	let mut verbose_output = Vec::<u8>::new();

	let run_output = Simulator::new(Duration::from_secs(3600))
		.run(&mut trace_reader, &mut cache, Some(&mut verbose_output))
		.expect("Unable to run simulator");

	let verbose_output = String::from_utf8(verbose_output).expect("Verbose output wasn't utf-8");
	(*cache.statistics(), run_output, verbose_output)
}

#[test]
fn yi_direct_mapped() {
	let (statistics, run_output, verbose_output) = run(YI_TRACE, Geometry::new(4, 1, 4).unwrap());

	assert_eq!(statistics.to_string(), "hits:4 misses:5 evictions:3");
	assert_eq!(
		verbose_output,
		"L 10,1 miss\nM 20,1 miss hit\nL 22,1 hit\nS 18,1 hit\nL 110,1 miss eviction\nL 210,1 miss eviction\nM 12,1 \
		 miss eviction hit\n"
	);
	assert_eq!(run_output, RunOutput {
		loads:    4,
		stores:   1,
		modifies: 2,
		ignored:  0,
	});
}

#[test]
fn yi_two_way() {
	let (statistics, ..) = run(YI_TRACE, Geometry::new(4, 2, 4).unwrap());
	assert_eq!(statistics.to_string(), "hits:4 misses:5 evictions:2");
}

#[test]
fn yi_tiny() {
	let (statistics, ..) = run(YI_TRACE, Geometry::new(1, 1, 1).unwrap());
	assert_eq!(statistics.to_string(), "hits:2 misses:7 evictions:5");
}

#[test]
fn modify_on_unseen_address_misses_then_hits() {
	let (statistics, _, verbose_output) = run(" M 40,4\n", Geometry::new(2, 1, 2).unwrap());
	assert_eq!(statistics, Statistics {
		hits:      1,
		misses:    1,
		evictions: 0,
	});
	assert_eq!(verbose_output, "M 40,4 miss hit\n");
}

#[test]
fn ignored_lines_dont_count() {
	let trace = "I 0400d7d4,8\n\r\n\n X 10,1\n L nope,1\nI  04000000,3\n";
	let (statistics, run_output, verbose_output) = run(trace, Geometry::new(2, 2, 2).unwrap());

	assert_eq!(statistics, Statistics::new());
	assert_eq!(run_output.accesses(), 0);
	assert_eq!(run_output.ignored, 6);
	assert_eq!(verbose_output, "");
}

#[test]
fn non_utf8_lines_are_skipped() {
	let trace = b" L 10,1\n\xff\xfe garbage\n L 20,1\n";
	let (statistics, run_output, verbose_output) = run(trace, Geometry::new(4, 1, 4).unwrap());

	assert_eq!(statistics.to_string(), "hits:0 misses:2 evictions:0");
	assert_eq!(run_output.ignored, 1);
	assert_eq!(verbose_output, "L 10,1 miss\nL 20,1 miss\n");
}

#[test]
fn sizeless_and_prefixed_records_are_accessed() {
	let (statistics, _, verbose_output) = run(" L 10\n S 0x10,1\n", Geometry::new(4, 1, 4).unwrap());

	assert_eq!(statistics.to_string(), "hits:1 misses:1 evictions:0");
	assert_eq!(verbose_output, "L 10 miss\nS 0x10,1 hit\n");
}

#[test]
fn runs_are_independent() {
	let geometry = Geometry::new(4, 1, 4).unwrap();
	let (first, ..) = run(YI_TRACE, geometry);
	let (second, ..) = run(YI_TRACE, geometry);
	assert_eq!(first, second);
}

#[test]
fn output_data_serializes() {
	let geometry = Geometry::new(4, 1, 4).unwrap();
	let (statistics, run_output, _) = run(YI_TRACE, geometry);
	let data = data::Data::new(&geometry, &statistics, &run_output);

	let json = serde_json::to_value(&data).unwrap();
	assert_eq!(json["geometry"]["lines_per_set"], 1);
	assert_eq!(json["statistics"]["evictions"], 3);
	assert_eq!(json["records"]["modifies"], 2);
	assert_eq!(serde_json::from_value::<data::Data>(json).unwrap(), data);
}

/// Strategy for a trace line, valid or not
fn trace_line() -> impl Strategy<Value = String> {
	prop_oneof![
		(prop::sample::select(vec!['L', 'S', 'M']), 0u64..0x1000, 1u64..=8)
			.prop_map(|(op, addr, size)| format!(" {op} {addr:x},{size:x}")),
		(0u64..0x1000).prop_map(|addr| format!("I  {addr:08x},4")),
		Just(String::new()),
		Just(" Q 10,1".to_owned()),
	]
}

proptest! {
	#[test]
	fn hits_and_misses_cover_all_accesses(
		lines in prop::collection::vec(trace_line(), 0..256),
		set_index_bits in 1u32..4,
		lines_per_set in 1usize..4,
		block_offset_bits in 1u32..5,
	) {
		let trace = lines.join("\n");
		let geometry = Geometry::new(set_index_bits, lines_per_set, block_offset_bits).unwrap();
		let (statistics, run_output, verbose_output) = run(&trace, geometry);

		prop_assert_eq!(statistics.accesses(), run_output.accesses());
		prop_assert_eq!(verbose_output.lines().count() as u64, run_output.loads + run_output.stores + run_output.modifies);

		// Every modify's second access is a hit
		for line in verbose_output.lines().filter(|line| line.starts_with('M')) {
			prop_assert!(line.ends_with(" hit"), "Modify didn't end in a hit: {line:?}");
		}
	}
}
