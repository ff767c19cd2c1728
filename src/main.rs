//! Travel TUI - Terminal User Interface for saved items, destinations and client trips.
//!
//! Main entry point and event loop for the application.

mod app;
mod browser;
mod config;
mod error;
mod query;
mod screens;
mod task;
mod travel;
mod ui;

use anyhow::Context;
use app::{App, Tab, UiMode};
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use travel::TravelClient;

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration, initializes logging, fetches initial data, and runs the event loop.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_or_init(None)?;
    init_tracing(&config.log_file_path()?)?;
    tracing::info!("starting travel-tui");

    let client = TravelClient::new(&config)?;
    let mut app = App::new(&config, client);

    app.set_status("Loading...".to_string());
    app.load().await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
    }
    result
}

/// Initialize the tracing subscriber.
///
/// # Arguments
/// * `log_path` - File that receives log output
///
/// # Details
/// The terminal belongs to the UI, so logs go to a file. `RUST_LOG` overrides
/// the default INFO level.
fn init_tracing(log_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Redraws, collects finished background operations, then handles at most one input event.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::render_ui(f, app))?;

        app.poll_tasks().await;

        // Use non-blocking event polling with timeout to keep UI responsive
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if !handle_key(key, app) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Dispatch a key press.
///
/// # Returns
/// * `bool` - False when the application should exit
fn handle_key(key: KeyEvent, app: &mut App) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match app.mode {
        UiMode::Search => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.mode = UiMode::List,
            KeyCode::Backspace => app.remove_search_char(),
            KeyCode::Char(c) => app.add_search_char(c),
            _ => {}
        },
        UiMode::EditTrip => match key.code {
            KeyCode::Enter => app.save_trip_edit(),
            KeyCode::Esc => app.close_trip_editor(),
            code => {
                let Some(editor) = app.trips.editor.as_mut() else {
                    app.close_trip_editor();
                    return true;
                };
                match code {
                    KeyCode::Backspace => editor.pop_char(),
                    KeyCode::Left | KeyCode::Right => editor.toggle_commission_type(),
                    KeyCode::Up => editor.cycle_status(false),
                    KeyCode::Down => editor.cycle_status(true),
                    KeyCode::Char(c) => editor.push_char(c),
                    _ => {}
                }
            }
        },
        UiMode::ConfirmCancel => match key.code {
            KeyCode::Enter => app.confirm_trip_cancel(),
            KeyCode::Esc => app.dismiss_trip_cancel(),
            KeyCode::Backspace => app.trips.cancel_gate.pop_char(),
            KeyCode::Char(c) => app.trips.cancel_gate.push_char(c),
            _ => {}
        },
        UiMode::List => return handle_list_key(key, app),
    }
    true
}

fn handle_list_key(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return false,
        KeyCode::Esc => return app.go_back(),
        KeyCode::Tab => app.switch_tab(app.active_tab().next()),
        KeyCode::BackTab => app.switch_tab(app.active_tab().prev()),
        KeyCode::Char('/') => app.mode = UiMode::Search,
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Right | KeyCode::Char('n') => app.next_page(),
        KeyCode::Left | KeyCode::Char('p') => app.prev_page(),
        code => match (app.active_tab(), code) {
            (Tab::Saved, KeyCode::Char('t')) => app.favorites.cycle_type_filter(),
            (Tab::Saved, KeyCode::Char('s')) => {
                app.favorites.cycle_sort();
                app.set_status(format!("Sort: {}", app.favorites.sort_name()));
            }
            (Tab::Saved, KeyCode::Char('d') | KeyCode::Delete) => app.delete_selected_favorite(),
            (Tab::Explore, KeyCode::Char('r')) => app.refresh_insights(),
            (Tab::Explore, KeyCode::Enter) => app.open_selected_activity(),
            (Tab::Trips, KeyCode::Char('f')) => app.trips.cycle_status_filter(),
            (Tab::Trips, KeyCode::Char('t')) => app.trips.cycle_type_filter(),
            (Tab::Trips, KeyCode::Char('e') | KeyCode::Enter) => app.edit_selected_trip(),
            (Tab::Trips, KeyCode::Char('c')) => app.cancel_selected_trip(),
            (Tab::Trips, KeyCode::Char('i')) => app.check_in_selected_trip(),
            _ => {}
        },
    }
    true
}

/// Mouse wheel scrolls the active list.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App) {
    if app.mode != UiMode::List {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        _ => {}
    }
}
