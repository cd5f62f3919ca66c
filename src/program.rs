use std::{fmt::Display, io};

use tui::{
	backend::Backend,
	layout::{self, Constraint, Layout, Rect},
	style::Style,
	text::{Span, Spans, Text},
	widgets::{Block, Borders, Clear, Paragraph},
	Terminal,
};

use crate::{
	bindings::Bindings,
	editable::Refresh,
	host::{Host, Storage},
	input::Input,
	options::SimOptions,
	styles,
	views::{Applied, DebugView, Dialog, FormState, FormView},
	XY,
};

mod action;
pub use action::*;
mod host;
pub use host::*;

#[derive(Debug)]
enum Status {
	Applied { committed: usize, rejected: usize },
	NothingToApply,
	Reverted,
	Dumped(serde_json::Result<()>),
}

impl Status {
	fn is_err(&self) -> bool {
		matches!(
			self,
			Status::Dumped(Err(_)) | Status::Applied { rejected: 1.., .. }
		)
	}
}

impl Display for Status {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Status::Applied {
				committed,
				rejected: 0,
			} => write!(f, "Applied {committed} change(s)")?,
			Status::Applied {
				committed,
				rejected,
			} => write!(f, "Applied {committed} change(s), rejected {rejected}")?,
			Status::NothingToApply => write!(f, "Nothing to apply")?,
			Status::Reverted => write!(f, "Dropped uncommitted changes")?,
			Status::Dumped(Ok(())) => write!(f, "Dumped options to log")?,
			Status::Dumped(Err(e)) => write!(f, "Error dumping options: {e}")?,
		}
		Ok(())
	}
}

impl<'s, 't> From<&'s Status> for Text<'t> {
	fn from(s: &'s Status) -> Self {
		Text::styled(
			s.to_string(),
			if s.is_err() {
				styles::error()
			} else {
				Style::default()
			},
		)
	}
}

#[derive(Debug)]
pub struct Program {
	state: State,
	options: SimOptions,
	form: FormState,
	bindings: Bindings<Action>,
	/// Where options are persisted, for the title
	store_name: String,
	pub should_redraw: bool,
	/// Result of latest action to display to user
	status_msg: Option<Status>,
}

impl Program {
	/// Fresh state, with persisted options read from `storage`.
	pub fn new(storage: Option<&dyn Storage>, store_name: impl Into<String>) -> Self {
		let options = SimOptions::load(storage);
		let form = FormState::new(&options);
		Self {
			state: State::Normal,
			options,
			form,
			bindings: Default::default(),
			store_name: store_name.into(),
			should_redraw: true,
			status_msg: None,
		}
	}

	pub fn handle_input(
		&mut self,
		i: Input,
		host: &mut dyn Host,
	) -> io::Result<Option<ExternalAction>> {
		let action = match self.state {
			State::Normal if self.form.is_editing() => {
				let _ = self.form.handle_input(i);
				None
			}
			State::Normal => self.handle_input_normal(i, host),
			State::Debug => {
				if let Some(Action::ToggleDebug | Action::Quit) = self.bindings.get(i) {
					self.state = State::Normal;
				}
				None
			}
		};
		self.should_redraw = true;
		Ok(action)
	}

	fn handle_input_normal(&mut self, i: Input, host: &mut dyn Host) -> Option<ExternalAction> {
		let Some(&action) = self.bindings.get(i) else {
			debug!("Unhandled input: {i}");
			return None;
		};
		debug!("{i} -> {action:?}");

		use Action::*;
		match action {
			Quit => return Some(ExternalAction::Quit),
			Move(d @ (Direction::Up | Direction::Down)) => self.form.move_selection(d),
			Move(d) => {
				if self.form.cycle(d == Direction::Right) {
					self.clear_status();
				}
			}
			Edit => {
				if self.form.start_edit() {
					self.clear_status();
				} else {
					// choices and checkboxes have nothing to edit, so confirm them
					self.apply(host);
				}
			}
			Apply => self.apply(host),
			Toggle => {
				if let Some(applied) = self.form.toggle(&mut self.options, host) {
					self.applied(applied);
				}
			}
			Revert => {
				self.form.rebuild(&self.options);
				self.set_status(Status::Reverted);
			}
			DumpState => {
				let res = serde_json::to_string_pretty(&self.options).map(|s| info!("{s}"));
				self.set_status(Status::Dumped(res));
			}
			ToggleDebug => self.state = State::Debug,
		}

		None
	}

	fn apply(&mut self, host: &mut dyn Host) {
		if self.form.has_changes() {
			let applied = self.form.apply(&mut self.options, host);
			self.applied(applied);
		} else {
			self.set_status(Status::NothingToApply);
		}
	}

	fn applied(&mut self, applied: Applied) {
		if applied.refresh == Refresh::Dialog {
			debug!("Options shown changed");
		}
		self.set_status(Status::Applied {
			committed: applied.committed,
			rejected: applied.rejected,
		});
	}

	fn set_status(&mut self, status: Status) {
		if status.is_err() {
			error!("{}", status);
		} else {
			info!("{status}");
		}
		self.status_msg = Some(status);
	}

	fn clear_status(&mut self) {
		self.status_msg = None;
	}

	fn help_line(&self) -> Spans<'static> {
		let mut spans = Vec::new();
		for a in [
			Action::Edit,
			Action::Toggle,
			Action::Apply,
			Action::Revert,
			Action::ToggleDebug,
			Action::Quit,
		] {
			if let Some(k) = self.bindings.key_for(&a) {
				spans.push(Span::styled(format!(" {k} "), styles::keybind()));
				spans.push(Span::raw(format!("{}", Doc(&a))));
			}
		}
		Spans::from(spans)
	}

	/// Voltage colors from `-range` to `range` volts across `width` cells.
	fn scale_line(&self, width: u16) -> Spans<'static> {
		let range = self.options.voltage_range;
		let last = width.saturating_sub(1).max(1) as f64;
		Spans::from(
			(0..width)
				.map(|i| {
					let volts = range * (i as f64 * 2.0 / last - 1.0);
					let c = self.options.colors.voltage_color(volts, range);
					Span::styled("█", Style::default().fg(c.into()))
				})
				.collect::<Vec<_>>(),
		)
	}

	pub fn draw(&mut self, t: &mut Terminal<impl Backend>) -> io::Result<()> {
		let mut cursor_pos = None;
		trace!("Beginning draw");
		t.draw(|f| {
			let [main, scale, help, info]: [Rect; 4] = Layout::default()
				.direction(layout::Direction::Vertical)
				.constraints(vec![
					Constraint::Min(1),
					Constraint::Length(1),
					Constraint::Length(1),
					Constraint::Length(1),
				])
				.split(f.size())
				.try_into()
				.unwrap_or([Rect::default(); 4]);

			// status bar
			{
				let state_msg = format!(
					" {}/{} {}",
					self.form.selected() + 1,
					self.form.len(),
					self.options
						.language
						.map(|l| l.tag())
						.unwrap_or("--")
				);
				let [status, state]: [Rect; 2] = Layout::default()
					.direction(layout::Direction::Horizontal)
					.constraints([
						Constraint::Min(0),
						Constraint::Length(state_msg.len() as u16),
					])
					.split(info)
					.try_into()
					.unwrap_or([Rect::default(); 2]);
				let status_text: Text = match &self.status_msg {
					Some(s) => s.into(),
					None => Text::raw(""),
				};
				f.render_widget(Paragraph::new(status_text).style(styles::status()), status);
				f.render_widget(Paragraph::new(state_msg).style(styles::status()), state);
			}

			f.render_widget(Paragraph::new(self.help_line()), help);
			f.render_widget(Paragraph::new(self.scale_line(scale.width)), scale);

			let block = Block::default()
				.title(format!("Options ({})", self.store_name))
				.borders(Borders::ALL);
			let inner = block.inner(main);
			f.render_widget(block, main);
			f.render_stateful_widget(FormView, inner, &mut self.form);
			cursor_pos = self.form.cursor(inner);

			match self.state {
				State::Normal => {}
				State::Debug => {
					cursor_pos = None;
					let border = Block::default().title("Logs").borders(Borders::ALL);
					let inner = border.inner(main);
					f.render_widget(Clear, main);
					f.render_widget(border, main);
					f.render_widget(DebugView, inner);
				}
			}
		})?;

		if let Some(XY { x, y }) = cursor_pos {
			t.set_cursor(x, y)?;
			t.show_cursor()?;
		} else {
			t.hide_cursor()?;
		}

		self.should_redraw = false;
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, Default)]
enum State {
	/// Moving around the options
	#[default]
	Normal,
	Debug,
}

#[cfg(test)]
mod test {
	use crossterm::event::KeyCode;
	use tui::backend::TestBackend;

	use super::*;
	use crate::host::mock::MockHost;

	fn press(p: &mut Program, host: &mut MockHost, keys: &[Input]) {
		for &k in keys {
			assert!(p.handle_input(k, host).unwrap().is_none());
		}
	}

	#[test]
	fn keyboard_round_trip() {
		let mut host = MockHost::with_store();
		let mut p = Program::new(None, "test");
		let down = Input::from(KeyCode::Down);

		// voltage range: edit, clear, type, apply
		press(&mut p, &mut host, &[down, KeyCode::Enter.into()]);
		press(&mut p, &mut host, &[KeyCode::Backspace.into(), KeyCode::Char('9').into()]);
		press(&mut p, &mut host, &[KeyCode::Enter.into(), Input::ctrl('s')]);
		assert_eq!(p.options.voltage_range, 9.0);

		// auto-adjust reveals the minimum time step
		press(&mut p, &mut host, &[down, down, down, down, KeyCode::Char(' ').into()]);
		assert!(p.options.adjust_time_step);
		assert_eq!(p.form.len(), 7);

		assert!(matches!(
			p.handle_input(Input::ctrl('c'), &mut host).unwrap(),
			Some(ExternalAction::Quit)
		));
	}

	#[test]
	fn language_confirmed_with_enter() {
		let mut host = MockHost::with_store().answering(true);
		let mut p = Program::new(None, "test");
		let down = Input::from(KeyCode::Down);
		let right = Input::from(KeyCode::Right);
		press(&mut p, &mut host, &[down, down, right, right, right]);
		assert_eq!(host.writes(), 0);

		press(&mut p, &mut host, &[KeyCode::Enter.into()]);
		assert_eq!(host.stored("language").as_deref(), Some("en"));
		assert_eq!(host.writes(), 1);
		assert_eq!(host.confirms.len(), 1);
		assert_eq!(host.reloads, 1);
	}

	#[test]
	fn debug_view_swallows_input() {
		let mut host = MockHost::with_store();
		let mut p = Program::new(None, "test");
		press(&mut p, &mut host, &[KeyCode::F(12).into(), KeyCode::Char(' ').into()]);
		assert!(matches!(p.state, State::Debug));
		press(&mut p, &mut host, &[KeyCode::F(12).into()]);
		assert!(matches!(p.state, State::Normal));
		assert_eq!(p.form.len(), 6);
	}

	#[test]
	fn draws_without_panicking() {
		let mut t = Terminal::new(TestBackend::new(80, 20)).unwrap();
		let mut p = Program::new(None, "test");
		p.draw(&mut t).unwrap();
		assert!(!p.should_redraw);
		// narrow terminals too
		let mut t = Terminal::new(TestBackend::new(20, 6)).unwrap();
		p.draw(&mut t).unwrap();
	}
}
