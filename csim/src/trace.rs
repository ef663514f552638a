//! `valgrind` `lackey`-style trace parsing.
//!
//! Data access records look like ` <op> <addr>,<size>`, with a leading space,
//! `op` one of `L`, `S` or `M` and both `addr` and `size` in hexadecimal.
//! The size may be omitted. Every other line, including instruction fetches
//! (`I ...`) and lines that aren't utf-8, is ignored.

// Imports
use {
	anyhow::Context,
	csim_util::ReadTrimmedLine,
	std::{fmt, io},
};

/// Trace reader
#[derive(Clone, Debug)]
pub struct TraceReader<R> {
	/// Reader
	reader: R,

	/// Current line bytes
	line_bytes: Vec<u8>,

	/// Current line
	line: String,

	/// Lines read
	lines_read: u64,

	/// Lines ignored
	lines_ignored: u64,
}

impl<R: io::BufRead> TraceReader<R> {
	/// Creates a trace reader from a reader
	pub fn from_reader(reader: R) -> Self {
		Self {
			reader,
			line_bytes: vec![],
			line: String::new(),
			lines_read: 0,
			lines_ignored: 0,
		}
	}

	/// Reads the next record, skipping any ignored lines
	pub fn read_next(&mut self) -> Result<Option<Record>, anyhow::Error> {
		loop {
			// If we're done, return `None`
			let bytes_read = self
				.reader
				.read_trimmed_line(&mut self.line_bytes)
				.with_context(|| format!("Unable to read line {}", self.lines_read + 1))?;
			if bytes_read == 0 {
				return Ok(None);
			}
			self.lines_read += 1;

			self.line.clear();
			match std::str::from_utf8(&self.line_bytes) {
				Ok(line) => self.line.push_str(line),
				Err(err) => {
					tracing::debug!(line_idx = self.lines_read, ?err, "Skipping non utf-8 line");
					self.lines_ignored += 1;
					continue;
				},
			}

			match Record::parse(&self.line) {
				Some(record) => return Ok(Some(record)),
				// Note: Indented lines should have been data accesses, so they're worth a closer look
				None => {
					match self.line.starts_with(' ') {
						true => tracing::debug!(line_idx = self.lines_read, line = ?self.line, "Skipping malformed record"),
						false => tracing::trace!(line_idx = self.lines_read, line = ?self.line, "Ignoring line"),
					}
					self.lines_ignored += 1;
				},
			}
		}
	}

	/// Returns the line of the last record read, without its leading space.
	pub fn cur_line(&self) -> &str {
		self.line.strip_prefix(' ').unwrap_or(&self.line)
	}

	/// Returns the number of lines read
	pub fn lines_read(&self) -> u64 {
		self.lines_read
	}

	/// Returns the number of lines ignored
	pub fn lines_ignored(&self) -> u64 {
		self.lines_ignored
	}
}

/// Record
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Record {
	/// Access kind
	pub kind: RecordAccessKind,

	/// Address
	pub addr: u64,

	/// Size, in bytes, if given
	pub size: Option<u64>,
}

impl Record {
	/// Parses a record from a trace line.
	///
	/// Returns `None` if the line isn't a well-formed data access record.
	pub fn parse(line: &str) -> Option<Self> {
		// Note: Only data accesses are indented, everything else is ignored
		let line = line.strip_prefix(' ')?.trim_start();

		let mut chars = line.chars();
		let kind = match chars.next()? {
			'L' => RecordAccessKind::Load,
			'S' => RecordAccessKind::Store,
			'M' => RecordAccessKind::Modify,
			_ => return None,
		};

		let rest = chars.as_str().trim();
		let (addr, size) = match rest.split_once(',') {
			Some((addr, size)) => (addr.trim_end(), Some(size.trim())),
			None => (rest, None),
		};
		let addr = self::parse_hex(addr)?;
		let size = match size {
			Some(size) => Some(self::parse_hex(size)?),
			None => None,
		};

		Some(Self { kind, addr, size })
	}
}

/// Parses a hexadecimal number, with an optional `0x` prefix
fn parse_hex(s: &str) -> Option<u64> {
	let s = s
		.strip_prefix("0x")
		.or_else(|| s.strip_prefix("0X"))
		.unwrap_or(s);

	// Note: `from_str_radix` accepts a leading `+`, which isn't a hex digit
	if s.starts_with('+') {
		return None;
	}

	u64::from_str_radix(s, 16).ok()
}

impl fmt::Display for Record {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {:x}", self.kind, self.addr)?;
		if let Some(size) = self.size {
			write!(f, ",{size:x}")?;
		}

		Ok(())
	}
}

/// Record access kind
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum RecordAccessKind {
	/// Load
	Load,

	/// Store
	Store,

	/// Modify, a load followed by a store
	Modify,
}

impl RecordAccessKind {
	/// Returns the number of cache accesses this kind performs
	pub fn accesses(self) -> usize {
		match self {
			Self::Load | Self::Store => 1,
			Self::Modify => 2,
		}
	}
}

impl fmt::Display for RecordAccessKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let op = match self {
			Self::Load => "L",
			Self::Store => "S",
			Self::Modify => "M",
		};
		f.pad(op)
	}
}
