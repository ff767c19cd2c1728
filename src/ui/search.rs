//! Free-text search bar.
//!
//! Shows the search text of the screen in view and how many records it matches.

use crate::app::{App, Tab, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// What the search bar matches against on each screen.
fn search_scope(tab: Tab) -> &'static str {
    match tab {
        Tab::Saved => "airline, route, date, hotel or city",
        Tab::Explore => "place name or location",
        Tab::Trips => "client, date or status",
    }
}

fn match_count(app: &App) -> usize {
    match app.active_tab() {
        Tab::Saved => app.favorites.visible().total_matches,
        Tab::Explore => app.explore.visible().total_matches,
        Tab::Trips => app.trips.visible().total_matches,
    }
}

/// Render the search bar.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// While typing, the bar is highlighted and a cursor follows the text.
pub fn render_search(app: &App, area: Rect, buf: &mut Buffer) {
    let editing = app.mode == UiMode::Search;
    let text = app.search_text();

    let mut spans = vec![Span::styled("🔍 ", Style::default().fg(Color::Cyan))];
    if text.is_empty() && !editing {
        spans.push(Span::styled(
            format!("'/' to search by {}", search_scope(app.active_tab())),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)));
        if editing {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
    }

    let mut block = Block::default().borders(Borders::ALL).title(if editing {
        "Search (Enter/Esc to finish)"
    } else {
        "Search"
    });
    if editing {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }
    if !text.is_empty() {
        block = block.title_bottom(Line::from(format!(" {} matches ", match_count(app))));
    }

    Widget::render(Paragraph::new(Line::from(spans)).block(block), area, buf);
}
