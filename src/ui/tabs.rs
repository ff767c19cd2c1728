//! Screen switcher.
//!
//! One entry per screen with its record count; the frame title names the
//! screen in view.

use crate::app::{App, Tab};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Short name and record count shown for `tab`.
fn tab_label(app: &App, tab: Tab) -> String {
    match tab {
        Tab::Saved => format!("Saved ({})", app.favorites.items.len()),
        Tab::Explore => format!("Explore ({})", app.explore.points_of_interest.len()),
        Tab::Trips => format!("Trips ({})", app.trips.trips.len()),
    }
}

/// Render the screen switcher.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
pub fn render_tabs(app: &App, area: Rect, buf: &mut Buffer) {
    let current = app.active_tab();
    let selected = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let spans: Vec<Span> = Tab::ALL
        .into_iter()
        .flat_map(|tab| {
            let style = if tab == current {
                selected
            } else {
                Style::default().fg(Color::Gray)
            };
            [
                Span::styled(format!(" {} ", tab_label(app, tab)), style),
                Span::raw("  "),
            ]
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(current.title())
        .title_bottom(Line::from(Span::styled(
            " Tab / Shift-Tab ",
            Style::default().fg(Color::DarkGray),
        )));

    Widget::render(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block),
        area,
        buf,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::travel::TravelClient;
    use std::time::Duration;

    fn rendered_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_tabs_show_counts_and_active_title() {
        let client = TravelClient::with_seed(Default::default(), Duration::ZERO);
        let mut app = App::new(&Config::default(), client);
        app.switch_tab(Tab::Trips);

        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        render_tabs(&app, area, &mut buf);

        let text = rendered_text(&buf);
        assert!(text.contains("Saved (0)"));
        assert!(text.contains("Trips (0)"));
        assert!(text.contains("Trip Management"));
    }
}
