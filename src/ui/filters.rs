//! Filters widget rendering.
//!
//! Displays the active screen's filters, sort order and page position.

use crate::app::{App, Tab};
use crate::query::QueryDescriptor;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

fn label(name: &'static str) -> Span<'static> {
    Span::styled(name, Style::default().fg(Color::Cyan))
}

fn value(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(Color::White))
}

/// "Page x of y" with prev/next arrows dimmed at the boundaries.
pub fn pagination_spans(query: &QueryDescriptor, total_pages: usize) -> Vec<Span<'static>> {
    let arrow = |text: &'static str, enabled: bool| {
        Span::styled(
            text,
            Style::default().fg(if enabled { Color::Magenta } else { Color::DarkGray }),
        )
    };
    vec![
        arrow("◀ ", query.has_prev()),
        Span::styled(
            format!("Page {} of {}", query.page(), total_pages),
            Style::default().fg(Color::Gray),
        ),
        arrow(" ▶", query.has_next(total_pages)),
    ]
}

/// Render the filters widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
pub fn render_filters(app: &App, area: Rect, buf: &mut Buffer) {
    let mut spans = Vec::new();
    let hint;

    match app.active_tab() {
        Tab::Saved => {
            let screen = &app.favorites;
            let total = screen.visible().total_pages;
            spans.extend([
                label("Type: "),
                value(screen.type_filter_name()),
                label("   Sort: "),
                value(screen.sort_name()),
                Span::raw("   "),
            ]);
            spans.extend(pagination_spans(&screen.query, total));
            hint = "'t' type, 's' sort, 'n'/'p' page, 'd' delete";
        }
        Tab::Explore => {
            let screen = &app.explore;
            let result = screen.visible();
            spans.extend([
                label("Points of interest: "),
                value(result.total_matches.to_string()),
                Span::raw("   "),
            ]);
            spans.extend(pagination_spans(&screen.query, result.total_pages));
            hint = "'r' refresh insights, Enter activity details, 'n'/'p' page";
        }
        Tab::Trips => {
            let screen = &app.trips;
            let total = screen.visible().total_pages;
            spans.extend([
                label("Status: "),
                value(screen.status_filter_name()),
                label("   Type: "),
                value(screen.type_filter_name()),
                Span::raw("   "),
            ]);
            spans.extend(pagination_spans(&screen.query, total));
            hint = "'f' status, 't' type, 'e' edit, 'c' cancel, 'i' check-in, 'n'/'p' page";
        }
    }

    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(hint, Style::default().fg(Color::Yellow))),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().title("Filters").borders(Borders::ALL));

    Widget::render(paragraph, area, buf);
}
