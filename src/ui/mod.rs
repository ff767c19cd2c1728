//! UI components module.
//!
//! Contains ratatui widgets for displaying the application interface.

pub mod explore;
pub mod favorites;
pub mod filters;
pub mod modal;
pub mod search;
pub mod tabs;
pub mod trips;

pub use explore::render_explore;
pub use favorites::render_favorites;
pub use filters::render_filters;
pub use modal::render_modal;
pub use search::render_search;
pub use tabs::render_tabs;
pub use trips::render_trips;

use crate::app::{App, Tab};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

const DEFAULT_HINT: &str =
    "Tab switch screen, '/' search, Esc back, 'q' quit";

/// Render the complete UI.
///
/// # Arguments
/// * `f` - Frame to render to
/// * `app` - Application state
///
/// # Details
/// Lays out tabs, search, filters, the active screen and the status bar,
/// then draws any open modal on top.
pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(3), // Search bar
            Constraint::Length(4), // Filters
            Constraint::Min(0),    // Active screen
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_tabs(app, chunks[0], f.buffer_mut());
    render_search(app, chunks[1], f.buffer_mut());
    render_filters(app, chunks[2], f.buffer_mut());

    match app.active_tab() {
        Tab::Saved => render_favorites(app, chunks[3], f.buffer_mut()),
        Tab::Explore => render_explore(app, chunks[3], f.buffer_mut()),
        Tab::Trips => render_trips(app, chunks[3], f.buffer_mut()),
    }

    let status_text = app.status_message.as_deref().unwrap_or(DEFAULT_HINT);
    let status = Paragraph::new(Line::from(status_text))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[4]);

    let area = f.area();
    render_modal(app, area, f.buffer_mut());
}
