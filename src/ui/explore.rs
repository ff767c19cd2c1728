//! Explore screen rendering.
//!
//! Travel insights, points of interest and tours side by side.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn render_insights(app: &App, area: Rect, buf: &mut Buffer) {
    let insights = &app.explore.insights;
    let mut lines = Vec::new();
    if insights.is_empty() {
        lines.push(Line::from(Span::styled(
            "No insights available",
            Style::default().fg(Color::Gray),
        )));
    }

    if let Some(purpose) = &insights.trip_purpose {
        lines.push(heading("Trip Purpose Prediction"));
        lines.push(Line::from(format!(
            "Predicted Purpose: {} (Confidence: {})",
            purpose.prediction, purpose.confidence
        )));
    }
    if !insights.most_booked.is_empty() {
        lines.push(heading("Most Booked Routes"));
        lines.extend(
            insights
                .most_booked
                .iter()
                .map(|stat| Line::from(format!("{} ({} bookings)", stat.route, stat.count))),
        );
    }
    if !insights.most_traveled.is_empty() {
        lines.push(heading("Most Traveled Routes"));
        lines.extend(
            insights
                .most_traveled
                .iter()
                .map(|stat| Line::from(format!("{} ({} travelers)", stat.route, stat.count))),
        );
    }
    let title = if app.explore.is_refreshing() {
        "Travel Insights and Analytics (refreshing...)"
    } else {
        "Travel Insights and Analytics ('r' refresh)"
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title).borders(Borders::ALL));
    Widget::render(paragraph, area, buf);
}

fn render_points_of_interest(app: &App, area: Rect, buf: &mut Buffer) {
    let result = app.explore.visible();
    let items: Vec<ListItem> = if result.items.is_empty() {
        vec![ListItem::new("No points of interest")]
    } else {
        result
            .items
            .iter()
            .map(|poi| {
                ListItem::new(Line::from(vec![
                    Span::raw(poi.name.as_str()),
                    Span::styled(
                        format!(" ({})", poi.location),
                        Style::default().fg(Color::Gray),
                    ),
                ]))
            })
            .collect()
    };
    let list = List::new(items).block(
        Block::default()
            .title("Points of Interest")
            .borders(Borders::ALL),
    );
    Widget::render(list, area, buf);
}

fn render_activities(app: &App, area: Rect, buf: &mut Buffer) {
    let screen = &app.explore;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(area);

    let items: Vec<ListItem> = if screen.activities.is_empty() {
        vec![ListItem::new("No activities")]
    } else {
        screen
            .activities
            .iter()
            .map(|activity| ListItem::new(activity.name.as_str()))
            .collect()
    };
    let mut state = ListState::default();
    if !screen.activities.is_empty() {
        state.select(Some(screen.selected_activity));
    }
    let list = List::new(items)
        .block(
            Block::default()
                .title("Tours and Activities")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    StatefulWidget::render(list, chunks[0], buf, &mut state);

    let details = if screen.is_loading_details() {
        "Loading...".to_string()
    } else {
        screen
            .activity_details
            .as_ref()
            .and_then(|activity| activity.description.clone())
            .unwrap_or_else(|| "Press Enter on an activity".to_string())
    };
    let paragraph = Paragraph::new(details)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Activity Details").borders(Borders::ALL));
    Widget::render(paragraph, chunks[1], buf);
}

/// Render the Explore screen.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
pub fn render_explore(app: &App, area: Rect, buf: &mut Buffer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    render_insights(app, rows[0], buf);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_points_of_interest(app, columns[0], buf);
    render_activities(app, columns[1], buf);
}
