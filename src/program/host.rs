use std::{io, ops::ControlFlow};

use crossterm::event::{self, Event};
use tui::{backend::Backend, Terminal};

use crate::{
	host::{Host, Storage},
	store::JsonStore,
	views::{Dialog, ModalView, Prompt},
};

/// [`Host`] backed by the terminal: modal popups that block until answered.
pub struct TerminalHost<'t, B: Backend> {
	terminal: &'t mut Terminal<B>,
	store: Option<&'t mut JsonStore>,
	restart: bool,
}

impl<'t, B: Backend> TerminalHost<'t, B> {
	pub fn new(terminal: &'t mut Terminal<B>, store: Option<&'t mut JsonStore>) -> Self {
		Self {
			terminal,
			store,
			restart: false,
		}
	}

	/// Whether [`Host::reload`] was called.
	pub fn restart_requested(&self) -> bool {
		self.restart
	}

	fn prompt(&mut self, msg: &str, prompt: Prompt) -> io::Result<bool> {
		self.terminal.hide_cursor()?;
		self.terminal
			.draw(|f| f.render_widget(ModalView::new(msg, prompt), f.size()))?;
		loop {
			let Event::Key(k) = event::read()? else {
				continue;
			};
			if let ControlFlow::Break(answer) = prompt.handle_input(k.into()) {
				return Ok(answer);
			}
		}
	}
}

impl<'t, B: Backend> Host for TerminalHost<'t, B> {
	fn storage(&mut self) -> Option<&mut dyn Storage> {
		self.store.as_deref_mut().map(|s| s as &mut dyn Storage)
	}

	fn alert(&mut self, msg: &str) {
		info!("Alert: {msg}");
		if let Err(e) = self.prompt(msg, Prompt::Alert) {
			error!("Could not show alert: {e}");
		}
	}

	fn confirm(&mut self, msg: &str) -> bool {
		let answer = self.prompt(msg, Prompt::Confirm).unwrap_or_else(|e| {
			error!("Could not ask for confirmation: {e}");
			false
		});
		info!("Confirm {msg:?}: {answer}");
		answer
	}

	fn reload(&mut self) {
		info!("Restart requested");
		self.restart = true;
	}
}

#[cfg(test)]
mod test {
	use tui::backend::TestBackend;

	use super::*;

	#[test]
	fn reload_only_sets_flag() {
		let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
		let dir = tempfile::tempdir().unwrap();
		let mut store = JsonStore::open(dir.path().join("s.json")).unwrap();

		let mut host = TerminalHost::new(&mut terminal, Some(&mut store));
		assert!(!host.restart_requested());
		host.storage().unwrap().set("language", "it");
		host.reload();
		assert!(host.restart_requested());
		assert_eq!(store.get("language").as_deref(), Some("it"));

		let mut host = TerminalHost::new(&mut terminal, None);
		assert!(host.storage().is_none());
	}
}
