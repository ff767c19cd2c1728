//! Saved items list rendering.
//!
//! Displays the current page of saved flights and hotels with selection.

use crate::app::App;
use crate::travel::models::{Favorite, FavoriteDetails};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Lines taken by one saved item (3 content + 1 separator).
const LINES_PER_ITEM: u16 = 4;

/// First visible row so the selection stays centered.
pub fn scroll_offset(selected: usize, len: usize, visible: usize) -> usize {
    let center = visible / 2;
    let offset = selected.saturating_sub(center);
    offset.min(len.saturating_sub(visible))
}

fn favorite_lines(favorite: &Favorite, is_selected: bool, deleting: bool) -> Vec<Line<'_>> {
    let title_style = Style::default()
        .fg(if is_selected { Color::Yellow } else { Color::White })
        .add_modifier(Modifier::BOLD);
    let detail_style = Style::default().fg(Color::Gray);

    let mut headline = match &favorite.details {
        FavoriteDetails::Flight { airline, .. } => {
            vec![Span::raw("✈ "), Span::styled(airline.as_str(), title_style)]
        }
        FavoriteDetails::Hotel { name, .. } => {
            vec![Span::raw("⌂ "), Span::styled(name.as_str(), title_style)]
        }
    };
    headline.push(Span::styled(
        format!("  ${}", favorite.price),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ));
    if is_selected && deleting {
        headline.push(Span::styled("  Deleting...", Style::default().fg(Color::Red)));
    }

    let (second, third) = match &favorite.details {
        FavoriteDetails::Flight { route, date, .. } => (route.clone(), date.to_string()),
        FavoriteDetails::Hotel {
            location, rating, ..
        } => (location.clone(), format!("★ {}", rating)),
    };

    vec![
        Line::from(headline),
        Line::from(Span::styled(second, detail_style)),
        Line::from(Span::styled(third, detail_style)),
    ]
}

/// Render the saved items list.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
pub fn render_favorites(app: &App, area: Rect, buf: &mut Buffer) {
    let screen = &app.favorites;
    let result = screen.visible();
    let title = format!("Saved Items ({}/{})", result.total_matches, screen.items.len());

    if result.items.is_empty() {
        let list = List::new(vec![ListItem::new("No saved items to display")])
            .block(Block::default().title(title).borders(Borders::ALL));
        Widget::render(list, area, buf);
        return;
    }

    let selected_index = screen.selected_index.min(result.items.len() - 1);
    let separator_line = "─".repeat(area.width.saturating_sub(2).max(10) as usize);
    let visible = (area.height.saturating_sub(2) / LINES_PER_ITEM).max(1) as usize;
    let offset = scroll_offset(selected_index, result.items.len(), visible);
    let deleting = screen.is_deleting();

    let items: Vec<ListItem> = result
        .items
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, favorite)| {
            let is_selected = idx == selected_index;
            let mut lines = favorite_lines(favorite, is_selected, deleting);
            lines.push(Line::from(Span::styled(
                separator_line.clone(),
                Style::default().fg(if is_selected { Color::Magenta } else { Color::DarkGray }),
            )));
            ListItem::new(lines)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index - offset));

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    StatefulWidget::render(list, area, buf, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 20, 5), 0);
        assert_eq!(scroll_offset(10, 20, 5), 8);
        assert_eq!(scroll_offset(19, 20, 5), 15);
        assert_eq!(scroll_offset(3, 3, 5), 0);
    }
}
