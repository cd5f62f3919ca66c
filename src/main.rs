//! A terminal editor for circuit simulator options, in the spirit of nano and htop.
use std::{error::Error, io, panic, path::PathBuf};

use crossterm::{
	cursor,
	event::{self, Event},
	execute,
	terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

#[macro_use]
extern crate log;
use structopt::StructOpt;
use tui::{
	backend::{Backend, CrosstermBackend},
	Terminal,
};

use crate::{
	host::Storage,
	program::{ExternalAction, TerminalHost},
	store::JsonStore,
};

mod bindings;
mod color;
mod editable;
mod host;
mod input;
mod locale;
mod logger;
mod options;
mod program;
mod store;
mod styles;
mod units;
mod views;

use program::Program;

#[derive(Debug, StructOpt)]
struct Opt {
	/// JSON file the options are persisted in
	#[structopt(long, parse(from_os_str), default_value = "optedit.json")]
	store: PathBuf,
	/// Run without persistent storage
	#[structopt(long)]
	no_store: bool,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct XY<T> {
	pub x: T,
	pub y: T,
}

fn setup_terminal() -> io::Result<Terminal<impl Backend>> {
	enable_raw_mode()?;
	let mut stdout = io::stdout();
	execute!(stdout, EnterAlternateScreen)?;
	let backend = CrosstermBackend::new(stdout);
	Terminal::new(backend)
}

fn teardown_terminal() -> io::Result<()> {
	// restore terminal
	disable_raw_mode()?;
	let mut stdout = io::stdout();
	execute!(stdout, LeaveAlternateScreen, cursor::Show)?;
	Ok(())
}

fn open_store(opt: &Opt) -> Option<JsonStore> {
	if opt.no_store {
		info!("Running without storage");
		return None;
	}
	match JsonStore::open(&opt.store) {
		Ok(s) => Some(s),
		Err(e) => {
			warn!("Storage unavailable: {e}");
			None
		}
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	logger::init();
	info!("Starting");

	let opt = Opt::from_args();
	let mut store = open_store(&opt);
	let store_name = match &store {
		Some(s) => s.path().display().to_string(),
		None => "no storage".to_string(),
	};

	let mut terminal = setup_terminal()?;

	// reset terminal on panic
	let default_panic = panic::take_hook();
	panic::set_hook(Box::new(move |info| {
		if let Err(e) = teardown_terminal() {
			eprintln!("Error resetting terminal: {}", e);
		}
		println!();
		default_panic(info);
	}));

	'restart: loop {
		let mut program = Program::new(
			store.as_ref().map(|s| s as &dyn Storage),
			store_name.as_str(),
		);
		program.draw(&mut terminal)?;

		loop {
			let event = event::read()?;
			trace!("New event: {event:?}");
			let k = match event {
				Event::Key(k) => k,
				Event::Resize(..) => {
					program.draw(&mut terminal)?;
					continue;
				}
				e => {
					debug!("Unhandled event: {e:?}");
					continue;
				}
			};

			let mut host = TerminalHost::new(&mut terminal, store.as_mut());
			let action = program.handle_input(k.into(), &mut host)?;
			let restart = host.restart_requested();

			if let Some(action) = action {
				match action {
					ExternalAction::Quit => break 'restart,
				}
			}

			if restart {
				info!("Restarting");
				continue 'restart;
			}

			if program.should_redraw {
				program.draw(&mut terminal)?;
			}
		}
	}

	info!("Stopping");
	teardown_terminal()?;

	Ok(())
}
