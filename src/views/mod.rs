use std::ops::ControlFlow;

use tui::layout::Rect;

mod edit;
pub use edit::*;
mod debug;
pub use debug::*;
mod form;
pub use form::*;
mod modal;
pub use modal::*;

use crate::input;

/// Temporary interactive widget that takes control of input.
pub trait Dialog<Input = input::Input> {
	type Output;

	/// called until it returns Break(Output)
	fn handle_input(self, input: Input) -> ControlFlow<Self::Output>;
}

/// Area of `width` by `height` centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
	let width = width.min(area.width);
	let height = height.min(area.height);
	Rect {
		x: area.x + (area.width - width) / 2,
		y: area.y + (area.height - height) / 2,
		width,
		height,
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn centers_and_clamps() {
		let area = Rect::new(0, 0, 80, 24);
		assert_eq!(centered(area, 40, 4), Rect::new(20, 10, 40, 4));
		assert_eq!(centered(area, 100, 30), area);
	}
}
