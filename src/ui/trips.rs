//! Trips screen rendering.
//!
//! Displays the commission defaults and the current page of client trips.

use crate::app::App;
use crate::travel::models::{Category, Trip, TripStatus};
use crate::ui::favorites::scroll_offset;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

const LINES_PER_TRIP: u16 = 4;

fn status_color(status: TripStatus) -> Color {
    match status {
        TripStatus::Upcoming => Color::Blue,
        TripStatus::Completed => Color::Green,
        TripStatus::Process => Color::Yellow,
        TripStatus::Cancelled => Color::Red,
    }
}

fn trip_lines(trip: &Trip, is_selected: bool) -> Vec<Line<'_>> {
    let name_style = Style::default()
        .fg(if is_selected { Color::Yellow } else { Color::White })
        .add_modifier(Modifier::BOLD);
    let icon = match trip.category {
        Category::Flight => "✈ ",
        Category::Hotel => "⌂ ",
    };

    let mut header = vec![
        Span::raw(icon),
        Span::styled(trip.client_name.as_str(), name_style),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", trip.status.title()),
            Style::default().fg(status_color(trip.status)),
        ),
    ];
    if trip.check_in_available() {
        header.push(Span::styled("  check-in", Style::default().fg(Color::Magenta)));
    }

    let amounts = Line::from(vec![
        Span::styled("Vendor: ", Style::default().fg(Color::Gray)),
        Span::raw(format!("${}", trip.vendor_amount)),
        Span::styled("   Commission: ", Style::default().fg(Color::Gray)),
        Span::raw(trip.commission.to_string()),
        Span::styled("   Total: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("${}", trip.total_amount),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    vec![
        Line::from(header),
        Line::from(Span::styled(
            format!("{}  ·  {}", trip.route, trip.date),
            Style::default().fg(Color::Cyan),
        )),
        amounts,
    ]
}

fn render_defaults(app: &App, area: Rect, buf: &mut Buffer) {
    let defaults = &app.trips.defaults;
    let line = Line::from(vec![
        Span::styled("Commission Type: ", Style::default().fg(Color::Cyan)),
        Span::raw(defaults.commission_type.title()),
        Span::styled("   Commission Value: ", Style::default().fg(Color::Cyan)),
        Span::raw(defaults.commission_value.to_string()),
        Span::styled("   Service Fee: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("${}", defaults.service_fee)),
    ]);
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title("Default Commission Settings")
            .borders(Borders::ALL),
    );
    Widget::render(paragraph, area, buf);
}

/// Render the Trips screen.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
pub fn render_trips(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    render_defaults(app, chunks[0], buf);

    let screen = &app.trips;
    let result = screen.visible();
    let mut title = format!("Client Trips ({}/{})", result.total_matches, screen.trips.len());
    if screen.is_checking_in() {
        title.push_str(" - fetching check-in link...");
    }
    let area = chunks[1];

    if result.items.is_empty() {
        let list = List::new(vec![ListItem::new("No trips to display")])
            .block(Block::default().title(title).borders(Borders::ALL));
        Widget::render(list, area, buf);
        return;
    }

    let selected_index = screen.selected_index.min(result.items.len() - 1);
    let separator_line = "─".repeat(area.width.saturating_sub(2).max(10) as usize);
    let visible = (area.height.saturating_sub(2) / LINES_PER_TRIP).max(1) as usize;
    let offset = scroll_offset(selected_index, result.items.len(), visible);

    let items: Vec<ListItem> = result
        .items
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, trip)| {
            let is_selected = idx == selected_index;
            let mut lines = trip_lines(trip, is_selected);
            lines.push(Line::from(Span::styled(
                separator_line.clone(),
                Style::default().fg(Color::DarkGray),
            )));
            ListItem::new(lines)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index - offset));

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray));

    StatefulWidget::render(list, area, buf, &mut list_state);
}
