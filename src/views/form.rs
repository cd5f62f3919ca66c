//! Dialog listing every property of an [`Editable`], one row per index.
use std::ops::ControlFlow::{self, *};

use tui::{
	buffer::Buffer,
	layout::Rect,
	style::Style,
	text::{Span, Spans},
	widgets::{Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
	color::Color,
	editable::{Control, EditInfo, Editable, Refresh},
	host::Host,
	input::Input,
	program::Direction,
	styles,
	units::{format_units, parse_units},
	XY,
};

use super::{Dialog, EditState, EditView};

#[derive(Debug, Clone)]
struct Row {
	info: EditInfo,
	/// Shown for numeric and text controls, possibly edited
	text: Option<String>,
	/// Edited since the last enumeration
	changed: bool,
}

impl Row {
	fn new(info: EditInfo) -> Self {
		let text = match &info.control {
			&Control::Numeric { value, .. } => Some(format_units(value)),
			Control::Text(t) => Some(t.clone()),
			Control::Choice(_) | Control::Checkbox(_) => None,
		};
		Self {
			info,
			text,
			changed: false,
		}
	}

	fn value_spans(&self) -> Vec<Span<'_>> {
		let style = if self.changed {
			styles::pending()
		} else {
			Style::default()
		};
		if let Some(c) = self.info.choice_ref() {
			return vec![Span::styled(
				format!("< {} >", c.selected_item().unwrap_or_default()),
				style,
			)];
		}
		if let Some(cb) = self.info.checkbox_ref() {
			return vec![Span::raw(format!(
				"[{}] {}",
				if cb.checked { "x" } else { " " },
				cb.caption
			))];
		}

		let text = self.text.as_deref().unwrap_or_default();
		let mut spans = vec![Span::styled(text, style)];
		if let Some((min, max)) = self.bounds() {
			spans.push(Span::styled(
				format!(" ({} .. {})", format_units(min), format_units(max)),
				styles::label(),
			));
		}
		// swatch for color text
		if self.info.text_ref().is_some() {
			if let Ok(c) = text.parse::<Color>() {
				spans.push(Span::raw(" "));
				spans.push(Span::styled("██", Style::default().fg(c.into())));
			}
		}
		spans
	}

	/// Enforced range of a numeric row
	fn bounds(&self) -> Option<(f64, f64)> {
		match self.info.control {
			Control::Numeric { min, max, .. } if min != 0.0 || max != 0.0 => Some((min, max)),
			_ => None,
		}
	}
}

/// Counts from [`FormState::apply`]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Applied {
	pub committed: usize,
	/// Numbers that could not be parsed or were out of range
	pub rejected: usize,
	/// Whether any commit asked for the rows to be enumerated again
	pub refresh: Refresh,
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
	rows: Vec<Row>,
	selected: usize,
	/// Text edit in progress on the selected row
	editing: Option<EditState>,
}

impl FormState {
	pub fn new(src: &dyn Editable) -> Self {
		let mut s = Self::default();
		s.rebuild(src);
		s
	}

	/// Enumerate again from index 0, dropping uncommitted edits.
	pub fn rebuild(&mut self, src: &dyn Editable) {
		self.rows = src.edit_infos().into_iter().map(Row::new).collect();
		self.selected = self.selected.min(self.rows.len().saturating_sub(1));
		self.editing = None;
		trace!("Form has {} rows", self.rows.len());
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn selected(&self) -> usize {
		self.selected
	}

	pub fn is_editing(&self) -> bool {
		self.editing.is_some()
	}

	pub fn has_changes(&self) -> bool {
		self.rows.iter().any(|r| r.changed)
	}

	fn current(&mut self) -> Option<&mut Row> {
		self.rows.get_mut(self.selected)
	}

	pub fn move_selection(&mut self, d: Direction) {
		match d {
			Direction::Up => self.selected = self.selected.saturating_sub(1),
			Direction::Down if self.selected + 1 < self.rows.len() => self.selected += 1,
			_ => {}
		}
	}

	/// Start editing the selected row's text. `false` if it has none.
	pub fn start_edit(&mut self) -> bool {
		let Some(text) = self.current().and_then(|r| r.text.clone()) else {
			return false;
		};
		self.editing = Some(EditState::from_str(&text));
		true
	}

	/// Step the selected choice. Committed by the next [`FormState::apply`].
	pub fn cycle(&mut self, forward: bool) -> bool {
		let Some(row) = self.rows.get_mut(self.selected) else {
			return false;
		};
		let Control::Choice(c) = &mut row.info.control else {
			return false;
		};
		if forward {
			c.select_next();
		} else {
			c.select_prev();
		}
		row.changed = true;
		true
	}

	/// Flip the selected checkbox and apply everything pending.
	pub fn toggle(&mut self, src: &mut dyn Editable, host: &mut dyn Host) -> Option<Applied> {
		let row = self.rows.get_mut(self.selected)?;
		let Control::Checkbox(cb) = &mut row.info.control else {
			return None;
		};
		cb.checked = !cb.checked;
		row.changed = true;
		Some(self.apply(src, host))
	}

	/// Commit every changed row, last index first, then enumerate again.
	///
	/// A commit may only show or hide rows after its own index, so going
	/// backwards keeps every pending index valid.
	/// Numbers that do not parse or fall outside the row's bounds are reported
	/// through `host` and skipped.
	pub fn apply(&mut self, src: &mut dyn Editable, host: &mut dyn Host) -> Applied {
		let mut applied = Applied::default();
		let pending = self
			.rows
			.iter_mut()
			.enumerate()
			.rev()
			.filter(|(_, r)| r.changed);
		for (i, row) in pending {
			let text = row.text.clone().unwrap_or_default();
			if let Control::Text(t) = &mut row.info.control {
				*t = text;
			} else if row.info.value().is_some() {
				let parsed = parse_units(&text).map_err(|e| e.to_string()).and_then(|v| {
					match row.bounds() {
						Some((min, max)) if !(min..=max).contains(&v) => Err(format!(
							"must be between {} and {}",
							format_units(min),
							format_units(max)
						)),
						_ => Ok(v),
					}
				});
				match parsed {
					Ok(v) => row.info.set_value(v),
					Err(e) => {
						warn!("Rejected {:?} for {:?}: {e}", text, row.info.label);
						host.alert(&format!("{}: {e}", row.info.label));
						applied.rejected += 1;
						continue;
					}
				}
			}
			if src.set_edit_value(i, &row.info, host) == Refresh::Dialog {
				applied.refresh = Refresh::Dialog;
			}
			applied.committed += 1;
		}
		self.rebuild(src);
		applied
	}

	/// Where the terminal cursor goes while editing, if the form is drawn in `area`.
	pub fn cursor(&self, area: Rect) -> Option<XY<u16>> {
		let edit = self.editing.as_ref()?;
		Some(edit.cursor(self.value_area(area, self.selected)?))
	}

	fn label_width(&self) -> u16 {
		self.rows
			.iter()
			.map(|r| r.info.label.width())
			.max()
			.unwrap_or_default() as u16
	}

	fn value_area(&self, area: Rect, row: usize) -> Option<Rect> {
		let y = area.y + row as u16;
		if row >= area.height as usize {
			return None;
		}
		let x = (self.label_width() + 2).min(area.width);
		Some(Rect::new(area.x + x, y, area.width - x, 1))
	}
}

impl Dialog for &mut FormState {
	/// Breaks once the text edit is finished or cancelled
	type Output = ();

	fn handle_input(self, key: Input) -> ControlFlow<Self::Output> {
		let Some(edit) = self.editing.as_mut() else {
			return Break(());
		};
		let Break(result) = edit.handle_input(key) else {
			return Continue(());
		};
		self.editing = None;
		if let (Some(new), Some(row)) = (result, self.rows.get_mut(self.selected)) {
			if row.text.as_deref() != Some(new.as_str()) {
				debug!("{:?} edited to {new:?}", row.info.label);
				row.text = Some(new);
				row.changed = true;
			}
		}
		Break(())
	}
}

#[derive(Default)]
pub struct FormView;

impl StatefulWidget for FormView {
	type State = FormState;

	fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
		let label_width = state.label_width();
		for (i, row) in state.rows.iter().enumerate() {
			let Some(value_area) = state.value_area(area, i) else {
				break;
			};
			let label_area = Rect::new(area.x, value_area.y, label_width.min(area.width), 1);
			Paragraph::new(Span::styled(row.info.label.as_str(), styles::label()))
				.render(label_area, buf);

			let selected = i == state.selected;
			match &mut state.editing {
				Some(edit) if selected => {
					EditView::default()
						.style(styles::selected())
						.render(value_area, buf, edit);
				}
				_ => {
					let mut p = Paragraph::new(Spans::from(row.value_spans()));
					if selected {
						p = p.style(styles::selected());
					}
					p.render(value_area, buf);
				}
			}
		}
	}
}
