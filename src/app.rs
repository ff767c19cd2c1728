//! Application state management.
//!
//! Owns the three screens, the active tab, the UI mode and the status line.

use crate::browser::open_url;
use crate::config::Config;
use crate::screens::{ExploreScreen, FavoritesScreen, Notice, TripsScreen};
use crate::travel::TravelClient;

/// Input mode of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal list navigation
    List,
    /// Typing into the active screen's search bar
    Search,
    /// Edit-trip modal
    EditTrip,
    /// Cancel-trip confirmation modal
    ConfirmCancel,
}

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Saved flights and hotels
    Saved,
    /// Points of interest, activities and insights
    Explore,
    /// Client trip management
    Trips,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Saved, Tab::Explore, Tab::Trips];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Saved => "Saved Items",
            Tab::Explore => "Explore the World",
            Tab::Trips => "Trip Management",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Saved => Tab::Explore,
            Tab::Explore => Tab::Trips,
            Tab::Trips => Tab::Saved,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Saved => Tab::Trips,
            Tab::Explore => Tab::Saved,
            Tab::Trips => Tab::Explore,
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    pub mode: UiMode,
    active_tab: Tab,
    /// Previously shown tabs, most recent last
    back_stack: Vec<Tab>,
    pub favorites: FavoritesScreen,
    pub explore: ExploreScreen,
    pub trips: TripsScreen,
    /// Status message to display
    pub status_message: Option<String>,
    client: TravelClient,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `config` - Page sizes and commission defaults
    /// * `client` - Travel data provider
    pub fn new(config: &Config, client: TravelClient) -> Self {
        Self {
            mode: UiMode::List,
            active_tab: Tab::Saved,
            back_stack: Vec::new(),
            favorites: FavoritesScreen::new(config.favorites_page_size),
            explore: ExploreScreen::new(config.explore_page_size),
            trips: TripsScreen::new(config.trips_page_size, config.default_commission),
            status_message: None,
            client,
        }
    }

    pub fn client(&self) -> &TravelClient {
        &self.client
    }

    /// Fetch every screen's initial records.
    ///
    /// # Details
    /// A failed fetch leaves that screen empty and is reported in the status bar.
    pub async fn load(&mut self) {
        let client = self.client.clone();
        let (favorites, trips, points, activities, insights) = tokio::join!(
            client.fetch_favorites(),
            client.fetch_trips(),
            client.fetch_points_of_interest(),
            client.fetch_activities(),
            client.fetch_insights(),
        );

        let mut failures = Vec::new();
        match favorites {
            Ok(items) => self.favorites.set_items(items),
            Err(e) => failures.push(("favorites", e)),
        }
        match trips {
            Ok(items) => self.trips.set_trips(items),
            Err(e) => failures.push(("trips", e)),
        }
        match points {
            Ok(items) => self.explore.set_points_of_interest(items),
            Err(e) => failures.push(("points of interest", e)),
        }
        match activities {
            Ok(items) => self.explore.set_activities(items),
            Err(e) => failures.push(("activities", e)),
        }
        match insights {
            Ok(insights) => self.explore.insights = insights,
            Err(e) => failures.push(("insights", e)),
        }

        for (what, e) in &failures {
            tracing::warn!(error = %e, "failed to fetch {}", what);
        }
        match failures.first() {
            Some((what, e)) => self.set_status(format!("Error fetching {}: {}", what, e)),
            None => self.set_status(format!(
                "Loaded {} saved items, {} trips",
                self.favorites.items.len(),
                self.trips.trips.len()
            )),
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Switch to a different tab, remembering the current one.
    pub fn switch_tab(&mut self, tab: Tab) {
        if tab == self.active_tab {
            return;
        }
        self.back_stack.push(self.active_tab);
        self.active_tab = tab;
        self.mode = UiMode::List;
    }

    /// Return to the previously shown tab.
    ///
    /// # Returns
    /// * `bool` - False when there is nothing to go back to
    pub fn go_back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(tab) => {
                self.active_tab = tab;
                self.mode = UiMode::List;
                true
            }
            None => false,
        }
    }

    /// Add a character to the active screen's search text.
    pub fn add_search_char(&mut self, ch: char) {
        if self.mode != UiMode::Search {
            return;
        }
        match self.active_tab {
            Tab::Saved => self.favorites.push_search_char(ch),
            Tab::Explore => self.explore.push_search_char(ch),
            Tab::Trips => self.trips.push_search_char(ch),
        }
    }

    /// Remove the last character from the active screen's search text.
    pub fn remove_search_char(&mut self) {
        if self.mode != UiMode::Search {
            return;
        }
        match self.active_tab {
            Tab::Saved => self.favorites.pop_search_char(),
            Tab::Explore => self.explore.pop_search_char(),
            Tab::Trips => self.trips.pop_search_char(),
        }
    }

    /// Search text of the active screen.
    pub fn search_text(&self) -> &str {
        match self.active_tab {
            Tab::Saved => self.favorites.query.search_text(),
            Tab::Explore => self.explore.query.search_text(),
            Tab::Trips => self.trips.query.search_text(),
        }
    }

    pub fn move_up(&mut self) {
        match self.active_tab {
            Tab::Saved => self.favorites.move_up(),
            Tab::Explore => self.explore.move_up(),
            Tab::Trips => self.trips.move_up(),
        }
    }

    pub fn move_down(&mut self) {
        match self.active_tab {
            Tab::Saved => self.favorites.move_down(),
            Tab::Explore => self.explore.move_down(),
            Tab::Trips => self.trips.move_down(),
        }
    }

    pub fn next_page(&mut self) {
        match self.active_tab {
            Tab::Saved => self.favorites.next_page(),
            Tab::Explore => self.explore.next_page(),
            Tab::Trips => self.trips.next_page(),
        }
    }

    pub fn prev_page(&mut self) {
        match self.active_tab {
            Tab::Saved => self.favorites.prev_page(),
            Tab::Explore => self.explore.prev_page(),
            Tab::Trips => self.trips.prev_page(),
        }
    }

    /// Delete the selected saved item.
    pub fn delete_selected_favorite(&mut self) {
        let client = self.client.clone();
        match self.favorites.request_delete(&client) {
            Ok(Some(id)) => self.set_status(format!("Deleting item {}...", id)),
            Ok(None) => {}
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn refresh_insights(&mut self) {
        let client = self.client.clone();
        match self.explore.refresh_insights(&client) {
            Ok(()) => self.set_status("Refreshing insights...".to_string()),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn open_selected_activity(&mut self) {
        let client = self.client.clone();
        self.explore.open_selected_activity(&client);
    }

    /// Open the edit modal for the selected trip.
    pub fn edit_selected_trip(&mut self) {
        let Some(trip_id) = self.trips.selected().map(|trip| trip.id) else {
            return;
        };
        match self.trips.open_editor(trip_id) {
            Ok(()) => self.mode = UiMode::EditTrip,
            Err(e) => {
                tracing::warn!(trip_id, error = %e, "refused to edit trip");
                self.set_status(e.to_string());
            }
        }
    }

    /// Save the edit modal; invalid input keeps it open.
    pub fn save_trip_edit(&mut self) {
        match self.trips.save_edit() {
            Ok(total) => {
                self.mode = UiMode::List;
                self.set_status(format!("Trip updated. Total: ${:.2}", total));
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected trip edit");
                self.set_status(e.to_string());
            }
        }
    }

    pub fn close_trip_editor(&mut self) {
        self.trips.close_editor();
        self.mode = UiMode::List;
    }

    /// Open the cancellation modal for the selected trip.
    pub fn cancel_selected_trip(&mut self) {
        let Some(trip_id) = self.trips.selected().map(|trip| trip.id) else {
            return;
        };
        match self.trips.request_cancel(trip_id) {
            Ok(()) => self.mode = UiMode::ConfirmCancel,
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Confirm the cancellation modal; a mismatch keeps it open.
    pub fn confirm_trip_cancel(&mut self) {
        if let Some(trip_id) = self.trips.confirm_cancel() {
            self.trips.cancel_gate.dismiss();
            self.mode = UiMode::List;
            self.set_status(format!("Trip {} cancelled", trip_id));
        }
    }

    pub fn dismiss_trip_cancel(&mut self) {
        self.trips.cancel_gate.dismiss();
        self.mode = UiMode::List;
    }

    pub fn check_in_selected_trip(&mut self) {
        let client = self.client.clone();
        match self.trips.start_check_in(&client) {
            Ok(()) => self.set_status("Fetching check-in link...".to_string()),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Collect results of finished background operations.
    pub async fn poll_tasks(&mut self) {
        let notices = [
            self.favorites.poll().await,
            self.explore.poll().await,
            self.trips.poll().await,
        ];
        for notice in notices.into_iter().flatten() {
            self.handle_notice(notice);
        }
    }

    fn handle_notice(&mut self, notice: Notice) {
        match notice {
            Notice::Status(message) => self.set_status(message),
            Notice::OpenUrl(url) => match open_url(&url) {
                Ok(()) => self.set_status(format!("Opened check-in: {}", url)),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to open url");
                    self.set_status(format!("Check-in link: {}", url));
                }
            },
        }
    }

    /// Abort every in-flight operation.
    pub fn shutdown(&mut self) {
        self.favorites.cancel_pending();
        self.explore.cancel_pending();
        self.trips.cancel_pending();
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::client::SeedData;
    use crate::travel::models::{Category, Commission, Favorite, Trip, TripStatus};
    use chrono::NaiveDate;
    use std::time::Duration;

    fn seeded_app() -> App {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let seed = SeedData {
            favorites: vec![
                Favorite::flight(1, "Iberia", "MAD - LIS", date, 90.0),
                Favorite::hotel(2, "Pestana", "Lisbon", 4.5, 150.0),
            ],
            trips: vec![Trip {
                id: 10,
                client_name: "Ada Lovelace".to_string(),
                route: "LHR - CDG".to_string(),
                date,
                status: TripStatus::Upcoming,
                commission: Commission::percentage(10.0),
                vendor_amount: 1000.0,
                total_amount: 1100.0,
                category: Category::Flight,
                airline_code: Some("BA".to_string()),
            }],
            ..SeedData::default()
        };
        App::new(&Config::default(), TravelClient::with_seed(seed, Duration::ZERO))
    }

    #[test]
    fn test_app_new() {
        let app = seeded_app();
        assert_eq!(app.mode, UiMode::List);
        assert_eq!(app.active_tab(), Tab::Saved);
        assert!(app.favorites.items.is_empty());
    }

    #[tokio::test]
    async fn test_app_load() {
        let mut app = seeded_app();
        app.load().await;
        assert_eq!(app.favorites.items.len(), 2);
        assert_eq!(app.trips.trips.len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Loaded 2 saved items, 1 trips"));
    }

    #[test]
    fn test_switch_tab_and_go_back() {
        let mut app = seeded_app();
        app.switch_tab(Tab::Trips);
        app.switch_tab(Tab::Explore);
        assert_eq!(app.active_tab(), Tab::Explore);

        assert!(app.go_back());
        assert_eq!(app.active_tab(), Tab::Trips);
        assert!(app.go_back());
        assert_eq!(app.active_tab(), Tab::Saved);
        assert!(!app.go_back());
    }

    #[tokio::test]
    async fn test_search_goes_to_active_screen() {
        let mut app = seeded_app();
        app.load().await;
        app.add_search_char('x');
        assert_eq!(app.search_text(), "");

        app.mode = UiMode::Search;
        for ch in "lisbon".chars() {
            app.add_search_char(ch);
        }
        assert_eq!(app.favorites.visible().items.len(), 1);
        assert_eq!(app.trips.query.search_text(), "");

        app.remove_search_char();
        assert_eq!(app.search_text(), "lisbo");
    }

    #[tokio::test]
    async fn test_edit_and_cancel_flow() {
        let mut app = seeded_app();
        app.load().await;
        app.switch_tab(Tab::Trips);

        app.edit_selected_trip();
        assert_eq!(app.mode, UiMode::EditTrip);
        if let Some(editor) = app.trips.editor.as_mut() {
            editor.commission_input = "abc".to_string();
        }
        app.save_trip_edit();
        assert_eq!(app.mode, UiMode::EditTrip);
        app.close_trip_editor();
        assert_eq!(app.mode, UiMode::List);

        app.cancel_selected_trip();
        assert_eq!(app.mode, UiMode::ConfirmCancel);
        for ch in "no".chars() {
            app.trips.cancel_gate.push_char(ch);
        }
        app.confirm_trip_cancel();
        assert_eq!(app.mode, UiMode::ConfirmCancel);

        app.dismiss_trip_cancel();
        app.cancel_selected_trip();
        for ch in "Cancel".chars() {
            app.trips.cancel_gate.push_char(ch);
        }
        app.confirm_trip_cancel();
        assert_eq!(app.mode, UiMode::List);
        assert_eq!(app.trips.trips[0].status, TripStatus::Cancelled);

        app.edit_selected_trip();
        assert_eq!(app.mode, UiMode::List);
        assert_eq!(app.status_message.as_deref(), Some("Trip 10 is cancelled"));
    }

    #[tokio::test]
    async fn test_delete_through_poll() {
        let mut app = seeded_app();
        app.load().await;
        app.delete_selected_favorite();
        assert!(app.favorites.is_deleting());
        while app.favorites.is_deleting() {
            tokio::time::sleep(Duration::from_millis(1)).await;
            app.poll_tasks().await;
        }
        assert_eq!(app.favorites.items.len(), 1);
        assert_eq!(app.favorites.items[0].id, 2);
        assert_eq!(app.status_message.as_deref(), Some("Removed: Iberia"));
    }
}
