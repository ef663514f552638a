//! Utilities

// Modules
pub mod logger;

// Imports
use std::{cell::RefCell, fmt, io};

/// Extension trait for `R: io::BufRead` types to read a line without its terminator
#[extend::ext(name = ReadTrimmedLine)]
pub impl<R: io::BufRead> R {
	/// Reads a line's bytes into `line`, replacing its contents.
	///
	/// Any trailing `\n` or `\r\n` is removed. The bytes aren't required to be
	/// valid utf-8. Returns the number of bytes consumed from the reader,
	/// including the terminator, so `0` means EOF.
	fn read_trimmed_line(&mut self, line: &mut Vec<u8>) -> Result<usize, io::Error> {
		line.clear();
		let bytes_read = self.read_until(b'\n', line)?;

		// Pop the newline
		if line.ends_with(b"\n") {
			line.pop();
			if line.ends_with(b"\r") {
				line.pop();
			}
		}

		Ok(bytes_read)
	}
}

/// [`fmt::Display`] helper to display using a `FnMut(&mut fmt::Formatter)`
pub struct DisplayWrapper<F: FnMut(&mut fmt::Formatter) -> fmt::Result>(RefCell<F>);

impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> DisplayWrapper<F> {
	/// Creates a new display wrapper
	#[must_use]
	pub const fn new(func: F) -> Self {
		Self(RefCell::new(func))
	}
}


impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> fmt::Display for DisplayWrapper<F> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		// Note: `f` cannot be re-entrant, so this cannot fail
		self.0.borrow_mut()(f)
	}
}
