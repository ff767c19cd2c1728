//! Modal dialogs for the Trips screen.
//!
//! The edit-trip form and the typed cancellation confirmation.

use crate::app::App;
use crate::screens::trips::{CANCEL_WORD, TripEditor};
use crate::travel::models::{CommissionType, TripStatus};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Rectangle of at most `width` x `height` centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn radio(label: &str, checked: bool) -> Span<'static> {
    let marker = if checked { "(•) " } else { "( ) " };
    Span::styled(
        format!("{}{}  ", marker, label),
        if checked {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        },
    )
}

fn editor_lines(editor: &TripEditor) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::Cyan);
    let mut type_line = vec![Span::styled("Commission Type:  ", label)];
    type_line.extend(
        [CommissionType::Percentage, CommissionType::Fixed]
            .into_iter()
            .map(|kind| radio(kind.title(), kind == editor.commission_type)),
    );
    let mut status_line = vec![Span::styled("Status:           ", label)];
    status_line.extend(
        TripStatus::EDITABLE
            .into_iter()
            .map(|status| radio(status.title(), status == editor.status)),
    );

    vec![
        Line::from(vec![
            Span::styled("Commission Value: ", label),
            Span::styled(
                editor.commission_input.as_str(),
                Style::default().fg(Color::White),
            ),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(type_line),
        Line::from(status_line),
        Line::from(""),
        Line::from(Span::styled(
            "←/→ commission type, ↑/↓ status, Enter save, Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Render whichever Trips modal is open, if any.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Full frame area
/// * `buf` - Buffer to render to
pub fn render_modal(app: &App, area: Rect, buf: &mut Buffer) {
    if let Some(editor) = &app.trips.editor {
        let title = app
            .trips
            .trip(editor.trip_id)
            .map(|trip| format!("Edit Trip: {}", trip.client_name))
            .unwrap_or_else(|| "Edit Trip".to_string());
        let rect = centered_rect(72, 9, area);
        Clear.render(rect, buf);
        let paragraph = Paragraph::new(editor_lines(editor)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
        Widget::render(paragraph, rect, buf);
        return;
    }

    if let Some(input) = app.trips.cancel_gate.input() {
        let rect = centered_rect(60, 7, area);
        Clear.render(rect, buf);
        let lines = vec![
            Line::from(format!(
                "Type \"{}\" to confirm cancellation",
                CANCEL_WORD
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Yellow)),
                Span::raw(input),
                Span::styled("_", Style::default().fg(Color::Yellow)),
            ]),
            Line::from(Span::styled(
                "Enter confirm, Esc keep trip",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Cancel Trip")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        Widget::render(paragraph, rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 10, area);
        assert_eq!(rect, Rect::new(20, 15, 60, 10));

        let small = Rect::new(5, 5, 30, 4);
        let clipped = centered_rect(60, 10, small);
        assert_eq!(clipped, small);
    }
}
