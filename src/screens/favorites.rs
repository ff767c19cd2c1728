//! Saved items screen state.
//!
//! Manages saved flights and hotels, their query, selection and deletion.

use crate::error::TravelError;
use crate::query::{self, Filter, QueryDescriptor, QueryResult};
use crate::screens::{Notice, wrap_next, wrap_prev};
use crate::task::{Outcome, PendingOp, take_finished};
use crate::travel::TravelClient;
use crate::travel::models::{Category, Favorite};
use std::num::NonZeroUsize;

const TYPE_OPTIONS: [Category; 2] = [Category::Flight, Category::Hotel];

/// State of the Saved screen.
#[derive(Debug)]
pub struct FavoritesScreen {
    /// All saved items, in provider order
    pub items: Vec<Favorite>,
    /// Search, filter, sort and page
    pub query: QueryDescriptor,
    /// Selected row on the current page
    pub selected_index: usize,
    /// Delete request in flight, resolving to the deleted id
    deleting: Option<PendingOp<u64>>,
}

impl FavoritesScreen {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            items: Vec::new(),
            query: QueryDescriptor::new(page_size),
            selected_index: 0,
            deleting: None,
        }
    }

    pub fn set_items(&mut self, items: Vec<Favorite>) {
        self.items = items;
        self.after_change();
    }

    /// Current page of the filtered and sorted list.
    pub fn visible(&self) -> QueryResult<'_, Favorite> {
        query::query(&self.items, &self.query)
    }

    pub fn selected(&self) -> Option<&Favorite> {
        self.visible().items.get(self.selected_index).copied()
    }

    pub fn move_up(&mut self) {
        let len = self.visible().items.len();
        self.selected_index = wrap_prev(self.selected_index, len);
    }

    pub fn move_down(&mut self) {
        let len = self.visible().items.len();
        self.selected_index = wrap_next(self.selected_index, len);
    }

    pub fn next_page(&mut self) {
        let total = self.visible().total_pages;
        self.query.next_page(total);
        self.selected_index = 0;
    }

    pub fn prev_page(&mut self) {
        self.query.prev_page();
        self.selected_index = 0;
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.query.push_search_char(ch);
        self.selected_index = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.query.pop_search_char();
        self.selected_index = 0;
    }

    /// Cycle All -> Flights -> Hotels.
    pub fn cycle_type_filter(&mut self) {
        self.query.set_type_filter(self.query.type_filter().cycle(&TYPE_OPTIONS));
        self.selected_index = 0;
    }

    /// Cycle none -> price low to high -> price high to low.
    pub fn cycle_sort(&mut self) {
        self.query.set_sort(self.query.sort().cycle());
        self.selected_index = 0;
    }

    pub fn type_filter_name(&self) -> &'static str {
        match self.query.type_filter() {
            Filter::All => "All",
            Filter::Only(category) => category.plural_label(),
        }
    }

    pub fn sort_name(&self) -> &'static str {
        match self.query.sort() {
            query::SortKey::None => "None",
            query::SortKey::Ascending => "Price: Low to High",
            query::SortKey::Descending => "Price: High to Low",
        }
    }

    /// Whether the delete control is disabled.
    pub fn is_deleting(&self) -> bool {
        self.deleting.is_some()
    }

    /// Ask the provider to delete the selected item.
    ///
    /// # Returns
    /// * `Result<Option<u64>, TravelError>` - Id being deleted, `None` when nothing is selected
    ///
    /// # Details
    /// Refused while another delete is in flight.
    pub fn request_delete(&mut self, client: &TravelClient) -> Result<Option<u64>, TravelError> {
        if let Some(op) = &self.deleting {
            return Err(TravelError::Busy(op.label()));
        }
        let Some(id) = self.selected().map(|favorite| favorite.id) else {
            return Ok(None);
        };
        let client = client.clone();
        self.deleting = Some(PendingOp::spawn("Deleting", async move {
            client.delete_favorite(id).await?;
            Ok(id)
        }));
        Ok(Some(id))
    }

    /// Remove the item with `id`, keeping the others in order.
    pub fn remove(&mut self, id: u64) -> Option<Favorite> {
        let position = self.items.iter().position(|favorite| favorite.id == id)?;
        let removed = self.items.remove(position);
        self.after_change();
        Some(removed)
    }

    /// Apply the result of a finished delete, if any.
    pub async fn poll(&mut self) -> Option<Notice> {
        match take_finished(&mut self.deleting).await? {
            Outcome::Success(id) => {
                let removed = self.remove(id);
                Some(Notice::Status(match removed {
                    Some(favorite) => format!("Removed: {}", favorite.headline()),
                    None => format!("Removed item {}", id),
                }))
            }
            Outcome::Failure(e) => {
                tracing::warn!(error = %e, "failed to delete favorite");
                Some(Notice::Status(format!("Failed to delete favorite: {}", e)))
            }
            Outcome::Cancelled => None,
        }
    }

    /// Abort any in-flight request.
    pub fn cancel_pending(&mut self) {
        if let Some(op) = self.deleting.take() {
            op.cancel();
        }
    }

    /// Keep page and selection valid after the item set changed.
    fn after_change(&mut self) {
        let total = self.visible().total_pages;
        self.query.clamp_page(total);
        let len = self.visible().items.len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn screen_with(items: Vec<Favorite>, page_size: usize) -> FavoritesScreen {
        let mut screen = FavoritesScreen::new(NonZeroUsize::new(page_size).unwrap());
        screen.set_items(items);
        screen
    }

    fn sample() -> Vec<Favorite> {
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        vec![
            Favorite::flight(1, "Lufthansa", "FRA - JFK", date, 300.0),
            Favorite::hotel(2, "Hotel Adlon", "Berlin", 4.8, 100.0),
            Favorite::flight(3, "Air France", "CDG - NRT", date, 200.0),
            Favorite::hotel(4, "Ritz", "Paris", 4.9, 400.0),
        ]
    }

    fn ids(screen: &FavoritesScreen) -> Vec<u64> {
        screen.items.iter().map(|f| f.id).collect()
    }

    async fn wait_for_delete(screen: &mut FavoritesScreen) -> Option<Notice> {
        loop {
            if let Some(notice) = screen.poll().await {
                return Some(notice);
            }
            if !screen.is_deleting() {
                return None;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut screen = screen_with(sample(), 20);
        let removed = screen.remove(2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(ids(&screen), vec![1, 3, 4]);
        assert!(screen.remove(2).is_none());
        assert_eq!(ids(&screen), vec![1, 3, 4]);
    }

    #[test]
    fn test_remove_last_item_on_last_page_clamps_page() {
        let mut screen = screen_with(sample(), 3);
        screen.next_page();
        assert_eq!(screen.query.page(), 2);
        screen.remove(4);
        assert_eq!(screen.query.page(), 1);
        assert_eq!(screen.visible().items.len(), 3);
    }

    #[test]
    fn test_cycle_type_filter_resets_page() {
        let mut screen = screen_with(sample(), 2);
        screen.next_page();
        assert_eq!(screen.query.page(), 2);
        screen.cycle_type_filter();
        assert_eq!(screen.type_filter_name(), "Flights");
        assert_eq!(screen.query.page(), 1);
        let visible: Vec<u64> = screen.visible().items.iter().map(|f| f.id).collect();
        assert_eq!(visible, vec![1, 3]);
    }

    #[test]
    fn test_cycle_sort() {
        let mut screen = screen_with(sample(), 20);
        screen.cycle_sort();
        assert_eq!(screen.sort_name(), "Price: Low to High");
        assert_eq!(screen.selected().map(|f| f.id), Some(2));
        screen.cycle_sort();
        assert_eq!(screen.selected().map(|f| f.id), Some(4));
        screen.cycle_sort();
        assert_eq!(screen.sort_name(), "None");
        assert_eq!(screen.selected().map(|f| f.id), Some(1));
    }

    #[test]
    fn test_search_and_selection() {
        let mut screen = screen_with(sample(), 20);
        screen.move_down();
        screen.move_down();
        assert_eq!(screen.selected_index, 2);
        for ch in "paris".chars() {
            screen.push_search_char(ch);
        }
        assert_eq!(screen.selected_index, 0);
        assert_eq!(screen.selected().map(|f| f.id), Some(4));
        screen.move_up();
        assert_eq!(screen.selected_index, 0);
    }

    #[tokio::test]
    async fn test_delete_removes_selected_item() {
        let client = TravelClient::with_seed(Default::default(), Duration::ZERO);
        let mut screen = screen_with(sample(), 20);
        screen.move_down();

        let requested = screen.request_delete(&client).unwrap();
        assert_eq!(requested, Some(2));
        assert!(screen.is_deleting());
        assert_eq!(screen.request_delete(&client), Err(TravelError::Busy("Deleting")));

        let notice = wait_for_delete(&mut screen).await;
        assert_eq!(notice, Some(Notice::Status("Removed: Hotel Adlon".to_string())));
        assert_eq!(ids(&screen), vec![1, 3, 4]);
        assert!(!screen.is_deleting());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_items_unchanged() {
        let client =
            TravelClient::with_seed(Default::default(), Duration::ZERO).failing_mutations(true);
        let mut screen = screen_with(sample(), 20);

        screen.request_delete(&client).unwrap();
        let notice = wait_for_delete(&mut screen).await;
        assert!(matches!(notice, Some(Notice::Status(msg)) if msg.starts_with("Failed to delete favorite")));
        assert_eq!(ids(&screen), vec![1, 2, 3, 4]);
        assert!(!screen.is_deleting());
    }

    #[tokio::test]
    async fn test_delete_with_empty_list_is_noop() {
        let client = TravelClient::with_seed(Default::default(), Duration::ZERO);
        let mut screen = screen_with(Vec::new(), 20);
        assert_eq!(screen.request_delete(&client), Ok(None));
        assert!(!screen.is_deleting());
    }
}
