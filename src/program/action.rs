use std::fmt::Display;

use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use strum::EnumMessage;

pub enum ExternalAction {
	Quit,
}

#[derive(
	Debug,
	Copy,
	Clone,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Sequence,
	EnumMessage,
	Serialize,
	Deserialize,
)]
pub enum Action {
	/// Select another option, or cycle a choice
	Move(Direction),
	/// Edit the selected value
	Edit,
	/// Toggle the selected checkbox
	Toggle,
	/// Commit all changed values
	Apply,
	/// Drop uncommitted changes
	Revert,
	/// Quit the program
	Quit,
	/// Show the log
	ToggleDebug,
	/// Log the current options as JSON
	DumpState,
}

pub struct Doc<'a>(pub &'a Action);

impl<'a> Display for Doc<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if let Some(d) = self.0.get_documentation() {
			write!(f, "{}", d)?;
		} else {
			write!(f, "{:?}", self.0)?;
		}

		Ok(())
	}
}

#[derive(
	Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence, Serialize, Deserialize,
)]
pub enum Direction {
	Down,
	Left,
	Right,
	Up,
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn every_action_documented() {
		for a in enum_iterator::all::<Action>() {
			assert!(a.get_documentation().is_some(), "{a:?} has no doc comment");
			assert_ne!(Doc(&a).to_string(), format!("{a:?}"));
		}
	}
}
