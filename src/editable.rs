//! Index-addressed property editing.
//!
//! An [`Editable`] describes its properties one index at a time and takes edited
//! descriptors back. The dialog that drives it never learns the concrete type.
use serde::Serialize;

use crate::host::Host;

/// Snapshot of one editable property, and the edit buffer carrying the new value back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditInfo {
	/// May be empty when the control carries its own caption.
	pub label: String,
	pub control: Control,
}

/// The single editing modality of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Control {
	/// A plain number. `(0, 0)` bounds mean no range is enforced.
	Numeric { value: f64, min: f64, max: f64 },
	Choice(Choice),
	Checkbox(Checkbox),
	/// Free text, e.g. a hex color
	Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Choice {
	pub items: Vec<String>,
	pub selected: usize,
}

impl Choice {
	pub fn new(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			items: items.into_iter().map(Into::into).collect(),
			selected: 0,
		}
	}

	pub fn select_next(&mut self) {
		if self.items.is_empty() {
			return;
		}
		self.selected = (self.selected + 1) % self.items.len();
	}

	pub fn select_prev(&mut self) {
		if self.items.is_empty() {
			return;
		}
		self.selected = self
			.selected
			.checked_sub(1)
			.unwrap_or(self.items.len() - 1);
	}

	pub fn selected_item(&self) -> Option<&str> {
		self.items.get(self.selected).map(String::as_str)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Checkbox {
	pub caption: String,
	pub checked: bool,
}

impl Checkbox {
	pub fn new(caption: impl Into<String>, checked: bool) -> Self {
		Self {
			caption: caption.into(),
			checked,
		}
	}
}

impl EditInfo {
	/// Numeric property with no enforced range.
	pub fn numeric(label: impl Into<String>, value: f64) -> Self {
		Self {
			label: label.into(),
			control: Control::Numeric {
				value,
				min: 0.0,
				max: 0.0,
			},
		}
	}

	pub fn text(label: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			control: Control::Text(text.into()),
		}
	}

	pub fn choice(label: impl Into<String>, choice: Choice) -> Self {
		Self {
			label: label.into(),
			control: Control::Choice(choice),
		}
	}

	pub fn checkbox(checkbox: Checkbox) -> Self {
		Self {
			label: String::new(),
			control: Control::Checkbox(checkbox),
		}
	}

	pub fn value(&self) -> Option<f64> {
		match self.control {
			Control::Numeric { value, .. } => Some(value),
			_ => None,
		}
	}

	pub fn set_value(&mut self, v: f64) {
		if let Control::Numeric { value, .. } = &mut self.control {
			*value = v;
		}
	}

	pub fn choice_ref(&self) -> Option<&Choice> {
		match &self.control {
			Control::Choice(c) => Some(c),
			_ => None,
		}
	}

	pub fn checkbox_ref(&self) -> Option<&Checkbox> {
		match &self.control {
			Control::Checkbox(c) => Some(c),
			_ => None,
		}
	}

	pub fn text_ref(&self) -> Option<&str> {
		match &self.control {
			Control::Text(t) => Some(t),
			_ => None,
		}
	}
}

/// What the dialog must do after a commit.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Refresh {
	#[default]
	None,
	/// The visible properties may have changed; enumerate again from index 0.
	Dialog,
}

pub trait Editable {
	/// Descriptor for the property at `n`, or `None` past the last visible one.
	///
	/// Later indices may appear or vanish depending on earlier values.
	fn edit_info(&self, n: usize) -> Option<EditInfo>;

	/// Apply an edited descriptor. Invalid input is ignored rather than reported.
	fn set_edit_value(&mut self, n: usize, ei: &EditInfo, host: &mut dyn Host) -> Refresh;

	/// All currently visible descriptors, in index order.
	fn edit_infos(&self) -> Vec<EditInfo> {
		(0..).map_while(|n| self.edit_info(n)).collect()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn choice_wraps() {
		let mut c = Choice::new(["a", "b", "c"]);
		assert_eq!(c.selected_item(), Some("a"));
		c.select_prev();
		assert_eq!(c.selected_item(), Some("c"));
		c.select_next();
		assert_eq!(c.selected, 0);
	}

	#[test]
	fn empty_choice_stays_put() {
		let mut c = Choice::default();
		c.select_next();
		c.select_prev();
		assert_eq!(c.selected, 0);
		assert_eq!(c.selected_item(), None);
	}

	#[test]
	fn value_only_for_numeric() {
		let mut ei = EditInfo::numeric("x", 1.0);
		ei.set_value(2.0);
		assert_eq!(ei.value(), Some(2.0));

		let mut t = EditInfo::text("t", "#00ff00");
		t.set_value(3.0);
		assert_eq!(t.value(), None);
		assert_eq!(t.text_ref(), Some("#00ff00"));
	}
}
