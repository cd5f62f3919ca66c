use tui::style::{Color, Modifier, Style};

pub fn selected() -> Style {
	Style::default().add_modifier(Modifier::REVERSED)
}

pub fn error() -> Style {
	Style::default().fg(Color::Red)
}

pub fn keybind() -> Style {
	Style::default().add_modifier(Modifier::BOLD)
}

pub fn label() -> Style {
	Style::default().add_modifier(Modifier::DIM)
}

/// Values edited but not yet applied
pub fn pending() -> Style {
	Style::default().add_modifier(Modifier::ITALIC)
}

pub fn status() -> Style {
	Style::default().add_modifier(Modifier::REVERSED)
}
