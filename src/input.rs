use std::fmt::{Debug, Display};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input(pub KeyCode, pub KeyModifiers);

impl From<KeyEvent> for Input {
	fn from(
		KeyEvent {
			code, modifiers, ..
		}: KeyEvent,
	) -> Self {
		Self(code, modifiers)
	}
}

impl From<KeyCode> for Input {
	fn from(code: KeyCode) -> Self {
		Self(code, KeyModifiers::NONE)
	}
}

impl Input {
	pub fn ctrl(c: char) -> Self {
		Self(KeyCode::Char(c), KeyModifiers::CONTROL)
	}
}

impl Display for Input {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let Self(code, modifiers) = self;

		if modifiers.contains(KeyModifiers::CONTROL) {
			write!(f, "Ctrl ")?;
		}
		if modifiers.contains(KeyModifiers::ALT) {
			write!(f, "Alt ")?;
		}
		if modifiers.contains(KeyModifiers::SHIFT) {
			write!(f, "Shift ")?;
		}

		match code {
			KeyCode::F(num) => write!(f, "F{num}")?,
			KeyCode::Char(' ') => write!(f, "Space")?,
			KeyCode::Char(c) => write!(f, "{}", c)?,
			_ => write!(f, "{:?}", code)?,
		}

		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn displays_modifiers() {
		assert_eq!(Input::ctrl('s').to_string(), "Ctrl s");
		assert_eq!(Input::from(KeyCode::F(12)).to_string(), "F12");
		assert_eq!(Input::from(KeyCode::Char(' ')).to_string(), "Space");
		assert_eq!(Input::from(KeyCode::Enter).to_string(), "Enter");
	}
}
