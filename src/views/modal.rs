use std::ops::ControlFlow::{self, *};

use crossterm::event::KeyCode;
use tui::{
	layout::{Alignment, Rect},
	text::{Span, Spans, Text},
	widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{input::Input, styles};

use super::{centered, Dialog};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Prompt {
	/// Dismissed by any key
	Alert,
	/// Answered with y/n
	Confirm,
}

impl Prompt {
	fn hint(&self) -> &'static str {
		match self {
			Prompt::Alert => "Press any key",
			Prompt::Confirm => "[y]es / [n]o",
		}
	}
}

/// Blocking message box drawn over everything else.
pub struct ModalView<'m> {
	msg: &'m str,
	prompt: Prompt,
}

impl<'m> ModalView<'m> {
	pub fn new(msg: &'m str, prompt: Prompt) -> Self {
		Self { msg, prompt }
	}
}

impl<'m> Widget for ModalView<'m> {
	fn render(self, area: Rect, buf: &mut tui::buffer::Buffer) {
		let borders = 2;
		let width = self.msg.width().max(self.prompt.hint().len()) as u16 + borders + 2;
		// message, gap, hint
		let area = centered(area, width, 3 + borders);

		let text = Text::from(vec![
			Spans::from(self.msg),
			Spans::default(),
			Spans::from(Span::styled(self.prompt.hint(), styles::keybind())),
		]);
		let title = match self.prompt {
			Prompt::Alert => "Alert",
			Prompt::Confirm => "Confirm",
		};
		Clear.render(area, buf);
		Paragraph::new(text)
			.block(Block::default().title(title).borders(Borders::ALL))
			.alignment(Alignment::Center)
			.wrap(Wrap { trim: true })
			.render(area, buf);
	}
}

impl Dialog for Prompt {
	/// Whether the user agreed
	type Output = bool;

	fn handle_input(self, key: Input) -> ControlFlow<Self::Output> {
		use KeyCode::*;
		match (self, key.0) {
			(Prompt::Alert, _) => Break(true),
			(Prompt::Confirm, Char('y' | 'Y') | Enter) => Break(true),
			(Prompt::Confirm, Char('n' | 'N') | Esc) => Break(false),
			(Prompt::Confirm, _) => Continue(()),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn confirm_waits_for_answer() {
		let p = Prompt::Confirm;
		assert_eq!(p.handle_input(Input::from(KeyCode::Char('x'))), Continue(()));
		assert_eq!(p.handle_input(Input::from(KeyCode::Char('y'))), Break(true));
		assert_eq!(p.handle_input(Input::from(KeyCode::Esc)), Break(false));
		assert_eq!(Prompt::Alert.handle_input(Input::from(KeyCode::Esc)), Break(true));
	}

	#[test]
	fn renders_message() {
		let area = Rect::new(0, 0, 60, 10);
		let mut buf = tui::buffer::Buffer::empty(area);
		ModalView::new("Can't set language", Prompt::Alert).render(area, &mut buf);
		let text: String = buf.content().iter().map(|c| c.symbol.as_str()).collect();
		assert!(text.contains("Can't set language"));
		assert!(text.contains("Press any key"));
	}
}
