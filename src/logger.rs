//! Logging into a ring buffer that the log view can draw while the terminal is in raw mode.
use std::{
	collections::VecDeque,
	env,
	sync::{Mutex, PoisonError},
	time::{Duration, Instant},
};

use env_logger::filter::{self, Filter};
use log::{Level, LevelFilter, Log};
use once_cell::sync::OnceCell;

const LOG_ENV: &str = "RUST_LOG";
/// Records kept for the log view
const CAPACITY: usize = 200;

pub struct BufferLogger {
	entries: Mutex<VecDeque<Entry>>,
	filter: Filter,
	start: Instant,
	/// Also written to stderr when it is redirected
	stderr: Option<env_logger::Logger>,
}

#[derive(Debug, Clone)]
pub struct Entry {
	pub elapsed: Duration,
	pub level: Level,
	pub target: String,
	pub msg: String,
}

impl Entry {
	fn new(record: &log::Record<'_>, start: Instant) -> Self {
		Self {
			elapsed: start.elapsed(),
			level: record.level(),
			target: record.target().to_string(),
			msg: record.args().to_string(),
		}
	}
}

static LOGGER: OnceCell<BufferLogger> = OnceCell::new();

/// Up to `n` of the latest entries, newest first.
///
/// `None` if [`init`] was never called.
pub fn recent(n: usize) -> Option<Vec<Entry>> {
	let l = LOGGER.get()?;
	let entries = l.entries.lock().unwrap_or_else(PoisonError::into_inner);
	Some(entries.iter().rev().take(n).cloned().collect())
}

fn parse_filter() -> Filter {
	let mut filter = filter::Builder::new();
	match env::var(LOG_ENV) {
		Ok(v) if !v.trim().is_empty() => {
			filter.parse(&v);
		}
		Err(_) | Ok(_) => {
			filter.filter_level(LevelFilter::Info);
		}
	}
	filter.build()
}

pub fn init() {
	let filter = parse_filter();
	let max_level = filter.filter();

	let stderr = atty::isnt(atty::Stream::Stderr).then(|| env_logger::Builder::new().build());
	let logger = LOGGER.get_or_init(|| BufferLogger {
		entries: Mutex::new(VecDeque::with_capacity(CAPACITY)),
		filter,
		start: Instant::now(),
		stderr,
	});

	if let Err(e) = log::set_logger(logger) {
		eprintln!("Logger already set: {e}");
		return;
	}
	log::set_max_level(max_level);
	info!("Log level: {max_level}; set with {LOG_ENV:?} env var: <https://docs.rs/env_logger/#example>");
	debug!("Parsed log filters: {:?}", logger.filter);
}

impl Log for BufferLogger {
	fn enabled(&self, metadata: &log::Metadata) -> bool {
		self.filter.enabled(metadata)
	}

	fn log(&self, record: &log::Record) {
		if !self.filter.matches(record) {
			return;
		}

		if let Some(stderr) = self.stderr.as_ref() {
			stderr.log(record);
		}

		let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
		if entries.len() == CAPACITY {
			entries.pop_front();
		}
		entries.push_back(Entry::new(record, self.start));
	}

	fn flush(&self) {
		if let Some(stderr) = self.stderr.as_ref() {
			stderr.flush();
		}
	}
}
