use log::Level;
use tui::{
	layout::Rect,
	text::{Span, Spans},
	widgets::{List, ListItem, Paragraph, Widget},
};

use crate::styles;

/// Latest log entries, newest on top.
pub struct DebugView;

impl Widget for DebugView {
	fn render(self, area: Rect, buf: &mut tui::buffer::Buffer) {
		let Some(entries) = crate::logger::recent(area.height as usize) else {
			let alert = Paragraph::new("Logger not initialized!").style(styles::error());
			return Widget::render(alert, area, buf);
		};

		let items: Vec<_> = entries
			.into_iter()
			.map(|e| {
				let level_style = if e.level <= Level::Warn {
					styles::error()
				} else {
					styles::keybind()
				};
				ListItem::new(Spans::from(vec![
					Span::raw(format!("{: >6.2}s [", e.elapsed.as_secs_f64())),
					Span::styled(format!("{:5}", e.level), level_style),
					Span::raw("] "),
					Span::styled(format!("{}: ", e.target), styles::label()),
					Span::raw(e.msg),
				]))
			})
			.collect();

		Widget::render(List::new(items), area, buf);
	}
}
