use std::{
	mem,
	ops::ControlFlow::{self, *},
};

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use tui::{layout::Rect, style::Style, widgets::StatefulWidget};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{bindings::Bindings, input::Input, program::Direction, XY};

use super::Dialog;

#[derive(Default)]
pub struct EditView {
	style: Style,
}

impl EditView {
	pub fn style(mut self, style: Style) -> Self {
		self.style = style;
		self
	}
}

#[derive(Debug, Copy, Clone, Deserialize, Serialize)]
pub enum EditAction {
	Char(char),
	Backspace,
	Delete,
	Move(Direction),
	Jump(Direction),
	Cancel,
	Submit,
}

impl EditAction {
	pub fn bindings() -> Bindings<Self> {
		let mut b = Bindings::empty();
		use EditAction as A;
		use KeyCode::*;

		b.insert(Esc.into(), A::Cancel);
		b.insert(Enter.into(), A::Submit);
		b.insert(Backspace.into(), A::Backspace);
		b.insert(Delete.into(), A::Delete);
		b.insert(Left.into(), A::Move(Direction::Left));
		b.insert(Right.into(), A::Move(Direction::Right));
		b.insert(Home.into(), A::Jump(Direction::Left));
		b.insert(End.into(), A::Jump(Direction::Right));

		b
	}
}

/// A single line of text being edited.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct EditState {
	buffer: String,
	/// Byte offset on a grapheme boundary, [0, buffer.len()]
	cursor: usize,
}

impl EditState {
	pub fn from_str(s: &str) -> Self {
		let buffer = s.to_string();
		Self {
			cursor: buffer.len(),
			buffer,
		}
	}

	/// Reference of the current text being edited
	pub fn contents(&self) -> &str {
		&self.buffer
	}

	/// Byte offset of the grapheme boundary before the cursor.
	fn prev_boundary(&self) -> Option<usize> {
		self.buffer[..self.cursor]
			.grapheme_indices(true)
			.next_back()
			.map(|(i, _)| i)
	}

	/// Byte offset of the grapheme boundary after the cursor.
	fn next_boundary(&self) -> Option<usize> {
		self.buffer[self.cursor..]
			.graphemes(true)
			.next()
			.map(|g| self.cursor + g.len())
	}

	/// Remove the grapheme right of the cursor.
	fn pop_right(&mut self) {
		if let Some(end) = self.next_boundary() {
			self.buffer.replace_range(self.cursor..end, "");
		}
	}

	/// Remove the grapheme left of the cursor.
	fn pop_left(&mut self) {
		if let Some(start) = self.prev_boundary() {
			self.buffer.replace_range(start..self.cursor, "");
			self.cursor = start;
		}
	}

	fn insert_char(&mut self, c: char) {
		self.buffer.insert(self.cursor, c);
		self.cursor += c.len_utf8();
	}

	fn move_left(&mut self) {
		if let Some(i) = self.prev_boundary() {
			self.cursor = i;
		}
	}

	fn move_right(&mut self) {
		if let Some(i) = self.next_boundary() {
			self.cursor = i;
		}
	}

	/// Remove the contents as a string
	pub fn take(&mut self) -> String {
		self.cursor = 0;
		mem::take(&mut self.buffer)
	}

	/// Position of the editing cursor if the view is rendered in area.
	pub fn cursor(&self, area: Rect) -> XY<u16> {
		let width = self.buffer[..self.cursor].width() as u16;
		XY {
			x: area.x + width.min(area.width.saturating_sub(1)),
			y: area.y,
		}
	}
}

impl StatefulWidget for EditView {
	type State = EditState;

	fn render(self, area: Rect, buf: &mut tui::buffer::Buffer, state: &mut Self::State) {
		buf.set_style(area, self.style);
		buf.set_stringn(
			area.x,
			area.y,
			state.contents(),
			area.width as usize,
			self.style,
		);
	}
}

impl Dialog for &mut EditState {
	type Output = Option<String>;

	fn handle_input(self, key: Input) -> ControlFlow<Self::Output> {
		let action = match key {
			Input(KeyCode::Char(c), m) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
				EditAction::Char(c)
			}
			_ => {
				let Some(a) = EditAction::bindings().get(key).copied() else {
					debug!("Unhandled editor input: {key}");
					return Continue(());
				};
				a
			}
		};

		self.handle_input(action)
	}
}

impl Dialog<EditAction> for &mut EditState {
	type Output = Option<String>;

	fn handle_input(self, action: EditAction) -> ControlFlow<Self::Output> {
		use Direction::*;
		use EditAction::*;
		match action {
			Cancel => return Break(None),
			Submit => return Break(Some(self.take())),
			Backspace => self.pop_left(),
			Delete => self.pop_right(),
			Move(Left) => self.move_left(),
			Move(Right) => self.move_right(),
			Move(Up) | Jump(Up) | Jump(Left) => self.cursor = 0,
			Move(Down) | Jump(Down) | Jump(Right) => self.cursor = self.buffer.len(),
			Char(c) => self.insert_char(c),
		}

		Continue(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn type_keys(state: &mut EditState, keys: &[EditAction]) -> ControlFlow<Option<String>> {
		for &k in keys {
			if let Break(o) = Dialog::handle_input(&mut *state, k) {
				return Break(o);
			}
		}
		Continue(())
	}

	#[test]
	fn edits_in_place() {
		use EditAction::*;
		let mut s = EditState::from_str("5u");
		let r = type_keys(
			&mut s,
			&[Move(Direction::Left), Char('0'), Jump(Direction::Right), Submit],
		);
		assert_eq!(r, Break(Some("50u".to_string())));
	}

	#[test]
	fn cancel_returns_nothing() {
		let mut s = EditState::from_str("#00ff00");
		assert_eq!(
			type_keys(&mut s, &[EditAction::Backspace, EditAction::Cancel]),
			Break(None)
		);
	}

	#[test]
	fn cursor_steps_over_graphemes() {
		use EditAction::*;
		let mut s = EditState::from_str("Españ");
		let _ = type_keys(&mut s, &[Backspace, Char('n'), Move(Direction::Left), Delete]);
		assert_eq!(s.contents(), "Espa");
		let _ = type_keys(&mut s, &[Jump(Direction::Left), Delete]);
		assert_eq!(s.contents(), "spa");
		// at the start, nothing left of the cursor
		let _ = type_keys(&mut s, &[Backspace, Move(Direction::Left)]);
		assert_eq!(s.contents(), "spa");
		assert_eq!(s.cursor(Rect::new(2, 3, 10, 1)), XY { x: 2, y: 3 });
	}

	#[test]
	fn typed_keys_become_chars() {
		let mut s = EditState::from_str("");
		let _ = (&mut s).handle_input(Input::from(KeyCode::Char('k')));
		let r = (&mut s).handle_input(Input::from(KeyCode::Enter));
		assert_eq!(r, Break(Some("k".to_string())));
	}
}
