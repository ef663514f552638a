//! Logger

// Imports
use {
	std::{
		fs,
		io::{self, IsTerminal},
		path::Path,
		sync::Mutex,
	},
	tracing::metadata::LevelFilter,
	tracing_subscriber::{fmt, prelude::*, EnvFilter},
};

/// Initializes the logger.
///
/// Logs to stderr, filtered by `RUST_LOG` (`info` by default).
/// If `log_file` is given, also logs to it, filtered by `RUST_LOG_FILE` (`debug` by default).
///
/// Any messages queued with [`pre_init`] are emitted right after.
///
/// # Panics
/// Panics if a global subscriber was already installed.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let term_use_colors = io::stderr().is_terminal();
	let term_layer = fmt::layer()
		.with_writer(io::stderr)
		.with_ansi(term_use_colors)
		.with_filter(self::env_filter("RUST_LOG", LevelFilter::INFO));

	// Note: If we can't open the log file, we keep going with just stderr.
	let file_layer = log_file.and_then(|log_file| {
		let file = fs::OpenOptions::new()
			.create(true)
			.write(true)
			.append(log_file_append)
			.truncate(!log_file_append)
			.open(log_file);

		match file {
			Ok(file) => Some(
				fmt::layer()
					.with_writer(Mutex::new(file))
					.with_ansi(false)
					.with_filter(self::env_filter("RUST_LOG_FILE", LevelFilter::DEBUG)),
			),
			Err(err) => {
				pre_init::warn(format!("Unable to open log file {log_file:?}: {err}"));
				None
			},
		}
	});

	tracing_subscriber::registry().with(term_layer).with(file_layer).init();

	pre_init::flush();
}

/// Creates an env filter reading `env_var`, using `default` when it's unset
fn env_filter(env_var: &str, default: LevelFilter) -> EnvFilter {
	EnvFilter::builder()
		.with_default_directive(default.into())
		.with_env_var(env_var)
		.from_env_lossy()
}

/// Messages logged before the logger is initialized.
///
/// These are kept and emitted once [`init`](super::init) is called.
pub mod pre_init {
	// Imports
	use std::sync::{Mutex, PoisonError};

	/// Queued message level
	#[derive(Clone, Copy, Debug)]
	enum Level {
		Debug,
		Warn,
	}

	/// All queued messages
	static MESSAGES: Mutex<Vec<(Level, String)>> = Mutex::new(vec![]);

	/// Queues a message
	fn push(level: Level, msg: String) {
		MESSAGES
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push((level, msg));
	}

	/// Queues a debug message
	pub fn debug(msg: impl Into<String>) {
		self::push(Level::Debug, msg.into());
	}

	/// Queues a warning message
	pub fn warn(msg: impl Into<String>) {
		self::push(Level::Warn, msg.into());
	}

	/// Emits all queued messages
	pub(super) fn flush() {
		let messages = std::mem::take(&mut *MESSAGES.lock().unwrap_or_else(PoisonError::into_inner));
		for (level, msg) in messages {
			match level {
				Level::Debug => tracing::debug!("{msg}"),
				Level::Warn => tracing::warn!("{msg}"),
			}
		}
	}
}
