//! List query pipeline.
//!
//! Narrows a collection by free-text search, category and status, orders it
//! by a numeric key, and cuts out one page. Every screen list goes through
//! [`query`]; screen state only owns a [`QueryDescriptor`].

use crate::travel::models::{Category, Favorite, FavoriteDetails, PointOfInterest, Trip, TripStatus};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::num::NonZeroUsize;

/// A record that can be listed by the pipeline.
pub trait Record {
    /// Fields consulted by free-text search.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Category used by the type filter, if the record has one.
    fn category(&self) -> Option<Category> {
        None
    }

    /// Status used by the status filter, if the record has one.
    fn status(&self) -> Option<TripStatus> {
        None
    }

    /// Numeric sort key.
    fn sort_value(&self) -> Option<f64> {
        None
    }
}

/// Exact-match filter with an "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: Copy + PartialEq> Filter<T> {
    /// Whether a record carrying `value` passes the filter.
    pub fn admits(&self, value: Option<T>) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => value == Some(*wanted),
        }
    }

    /// Advance to the next option: `All`, then each of `options` in order.
    pub fn cycle(self, options: &[T]) -> Self {
        match self {
            Filter::All => options.first().map_or(Filter::All, |first| Filter::Only(*first)),
            Filter::Only(current) => {
                let position = options.iter().position(|option| *option == current);
                match position.and_then(|idx| options.get(idx + 1)) {
                    Some(next) => Filter::Only(*next),
                    None => Filter::All,
                }
            }
        }
    }
}

/// Sort order over [`Record::sort_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep filtered order
    #[default]
    None,
    /// Lowest value first
    Ascending,
    /// Highest value first
    Descending,
}

impl SortKey {
    pub fn cycle(self) -> Self {
        match self {
            SortKey::None => SortKey::Ascending,
            SortKey::Ascending => SortKey::Descending,
            SortKey::Descending => SortKey::None,
        }
    }
}

/// Transient list state of one screen.
///
/// Any change to search text, filters or sort order resets `page` to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    search_text: String,
    type_filter: Filter<Category>,
    status_filter: Filter<TripStatus>,
    sort: SortKey,
    page: usize,
    page_size: NonZeroUsize,
}

impl QueryDescriptor {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            search_text: String::new(),
            type_filter: Filter::All,
            status_filter: Filter::All,
            sort: SortKey::None,
            page: 1,
            page_size,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn type_filter(&self) -> Filter<Category> {
        self.type_filter
    }

    pub fn status_filter(&self) -> Filter<TripStatus> {
        self.status_filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    #[cfg(test)]
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search_text.push(ch);
        self.page = 1;
    }

    pub fn pop_search_char(&mut self) {
        self.search_text.pop();
        self.page = 1;
    }

    pub fn set_type_filter(&mut self, filter: Filter<Category>) {
        self.type_filter = filter;
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, filter: Filter<TripStatus>) {
        self.status_filter = filter;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Jump to `page`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    /// Pull the page back into range after the result set shrank.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.set_page(self.page, total_pages);
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, total_pages: usize) -> bool {
        self.page < total_pages
    }

    /// Move forward one page; a no-op on the last page.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.has_next(total_pages) {
            self.page += 1;
        }
    }

    /// Move back one page; a no-op on the first page.
    pub fn prev_page(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }
}

/// One page of query output.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a, T> {
    /// Records on the requested page
    pub items: Vec<&'a T>,
    /// Page count, at least 1
    pub total_pages: usize,
    /// Records that passed every filter
    pub total_matches: usize,
}

/// Number of pages needed for `count` records; never less than 1.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get()).max(1)
}

/// Case-insensitive literal substring match over the record's search fields.
pub fn matches_search<T: Record>(record: &T, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle_lower))
}

/// Records passing search, type and status filters, in their original order.
pub fn filter_records<'a, T: Record>(records: &'a [T], descriptor: &QueryDescriptor) -> Vec<&'a T> {
    let needle = descriptor.search_text.to_lowercase();
    records
        .iter()
        .filter(|record| matches_search(*record, &needle))
        .filter(|record| descriptor.type_filter.admits(record.category()))
        .filter(|record| descriptor.status_filter.admits(record.status()))
        .collect()
}

/// Stable sort by [`Record::sort_value`]; records without a value go last.
pub fn sort_records<T: Record>(records: &mut [&T], sort: SortKey) {
    let compare = |a: Option<f64>, b: Option<f64>| match (a, b) {
        (Some(a), Some(b)) => Some(a.total_cmp(&b)),
        (None, None) => Some(Ordering::Equal),
        _ => None,
    };
    match sort {
        SortKey::None => {}
        SortKey::Ascending => records.sort_by(|a, b| {
            let (a, b) = (a.sort_value(), b.sort_value());
            compare(a, b).unwrap_or_else(|| missing_last(a))
        }),
        SortKey::Descending => records.sort_by(|a, b| {
            let (a, b) = (a.sort_value(), b.sort_value());
            compare(b, a).unwrap_or_else(|| missing_last(a))
        }),
    }
}

fn missing_last(left: Option<f64>) -> Ordering {
    if left.is_some() {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Run the whole pipeline: search, type, status, sort, paginate.
///
/// A page outside `[1, total_pages]` yields an empty `items`; callers are
/// expected to clamp navigation before asking.
pub fn query<'a, T: Record>(records: &'a [T], descriptor: &QueryDescriptor) -> QueryResult<'a, T> {
    let mut matched = filter_records(records, descriptor);
    sort_records(&mut matched, descriptor.sort);

    let total_matches = matched.len();
    let size = descriptor.page_size.get();
    let total_pages = total_pages(total_matches, descriptor.page_size);

    let items = match descriptor.page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size);
            matched
                .into_iter()
                .skip(start)
                .take(size)
                .collect()
        }
        None => Vec::new(),
    };

    QueryResult {
        items,
        total_pages,
        total_matches,
    }
}

impl Record for Favorite {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        match &self.details {
            FavoriteDetails::Flight {
                airline,
                route,
                date,
            } => vec![
                Cow::Borrowed(airline.as_str()),
                Cow::Borrowed(route.as_str()),
                Cow::Owned(date.to_string()),
            ],
            FavoriteDetails::Hotel { name, location, .. } => {
                vec![Cow::Borrowed(name.as_str()), Cow::Borrowed(location.as_str())]
            }
        }
    }

    fn category(&self) -> Option<Category> {
        Some(Favorite::category(self))
    }

    fn sort_value(&self) -> Option<f64> {
        Some(self.price)
    }
}

impl Record for Trip {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.client_name.as_str()),
            Cow::Owned(self.date.to_string()),
            Cow::Borrowed(self.status.label()),
        ]
    }

    fn category(&self) -> Option<Category> {
        Some(self.category)
    }

    fn status(&self) -> Option<TripStatus> {
        Some(self.status)
    }

    fn sort_value(&self) -> Option<f64> {
        Some(self.total_amount)
    }
}

impl Record for PointOfInterest {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.name.as_str()), Cow::Borrowed(self.location.as_str())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::models::Commission;
    use chrono::NaiveDate;

    fn page_size(size: usize) -> NonZeroUsize {
        NonZeroUsize::new(size).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn sample_favorites() -> Vec<Favorite> {
        vec![
            Favorite::flight(1, "Lufthansa", "FRA - JFK", date(1), 300.0),
            Favorite::hotel(2, "Hotel Adlon", "Berlin", 4.8, 100.0),
            Favorite::flight(3, "Air France", "CDG - NRT", date(15), 200.0),
        ]
    }

    fn make_trip(id: u64, client: &str, status: TripStatus, category: Category) -> Trip {
        Trip {
            id,
            client_name: client.to_string(),
            route: "LHR - CDG".to_string(),
            date: date(id as u32 % 28 + 1),
            status,
            commission: Commission::percentage(10.0),
            vendor_amount: 1000.0,
            total_amount: 1100.0,
            category,
            airline_code: None,
        }
    }

    fn ids(result: &QueryResult<'_, Favorite>) -> Vec<u64> {
        result.items.iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let favorites = sample_favorites();
        let descriptor = QueryDescriptor::new(page_size(20));
        let result = query(&favorites, &descriptor);
        assert_eq!(ids(&result), vec![1, 2, 3]);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_search_is_case_insensitive_per_category() {
        let favorites = sample_favorites();
        let mut descriptor = QueryDescriptor::new(page_size(20));

        descriptor.set_search_text("LUFT");
        assert_eq!(ids(&query(&favorites, &descriptor)), vec![1]);

        descriptor.set_search_text("berlin");
        assert_eq!(ids(&query(&favorites, &descriptor)), vec![2]);

        descriptor.set_search_text("2025-06-15");
        assert_eq!(ids(&query(&favorites, &descriptor)), vec![3]);

        descriptor.set_search_text("nowhere");
        let result = query(&favorites, &descriptor);
        assert!(result.items.is_empty());
        assert_eq!(result.total_matches, 0);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_every_field_substring_is_found() {
        let favorites = sample_favorites();
        let mut descriptor = QueryDescriptor::new(page_size(20));
        for favorite in &favorites {
            for field in favorite.search_fields() {
                let needle = &field[1..field.len().min(4)];
                descriptor.set_search_text(needle.to_uppercase());
                let result = query(&favorites, &descriptor);
                assert!(
                    result.items.iter().any(|f| f.id == favorite.id),
                    "{needle:?} should find record {}",
                    favorite.id
                );
            }
        }
    }

    #[test]
    fn test_search_treats_pattern_characters_literally() {
        let favorites = vec![
            Favorite::hotel(1, "Stay (City) *Center*", "Paris", 4.0, 90.0),
            Favorite::hotel(2, "Stay City Center", "Paris", 4.0, 80.0),
        ];
        let mut descriptor = QueryDescriptor::new(page_size(20));
        descriptor.set_search_text("(city) *");
        assert_eq!(ids(&query(&favorites, &descriptor)), vec![1]);

        descriptor.set_search_text(".*");
        assert!(query(&favorites, &descriptor).items.is_empty());
    }

    #[test]
    fn test_type_filter() {
        let favorites = sample_favorites();
        let mut descriptor = QueryDescriptor::new(page_size(20));
        descriptor.set_type_filter(Filter::Only(Category::Flight));
        assert_eq!(ids(&query(&favorites, &descriptor)), vec![1, 3]);
        descriptor.set_type_filter(Filter::Only(Category::Hotel));
        assert_eq!(ids(&query(&favorites, &descriptor)), vec![2]);
    }

    #[test]
    fn test_status_filter_on_trips() {
        let trips = vec![
            make_trip(1, "Ada", TripStatus::Upcoming, Category::Flight),
            make_trip(2, "Grace", TripStatus::Cancelled, Category::Hotel),
            make_trip(3, "Linus", TripStatus::Upcoming, Category::Hotel),
        ];
        let mut descriptor = QueryDescriptor::new(page_size(12));
        descriptor.set_status_filter(Filter::Only(TripStatus::Upcoming));
        let result = query(&trips, &descriptor);
        assert_eq!(result.items.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);

        descriptor.set_type_filter(Filter::Only(Category::Hotel));
        let result = query(&trips, &descriptor);
        assert_eq!(result.items.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_trip_search_matches_status_label() {
        let trips = vec![
            make_trip(1, "Ada", TripStatus::Upcoming, Category::Flight),
            make_trip(2, "Grace", TripStatus::Cancelled, Category::Hotel),
        ];
        let mut descriptor = QueryDescriptor::new(page_size(12));
        descriptor.set_search_text("CANCEL");
        let result = query(&trips, &descriptor);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].client_name, "Grace");
    }

    #[test]
    fn test_status_filter_excludes_records_without_status() {
        let pois = vec![PointOfInterest {
            id: "p1".to_string(),
            name: "Louvre".to_string(),
            location: "Paris".to_string(),
            kind: "sights".to_string(),
        }];
        let mut descriptor = QueryDescriptor::new(page_size(10));
        assert_eq!(query(&pois, &descriptor).items.len(), 1);
        descriptor.set_status_filter(Filter::Only(TripStatus::Upcoming));
        assert!(query(&pois, &descriptor).items.is_empty());
    }

    #[test]
    fn test_sort_by_price() {
        let favorites = sample_favorites();
        let mut descriptor = QueryDescriptor::new(page_size(20));

        descriptor.set_sort(SortKey::Ascending);
        let prices: Vec<f64> = query(&favorites, &descriptor).items.iter().map(|f| f.price).collect();
        assert_eq!(prices, vec![100.0, 200.0, 300.0]);

        descriptor.set_sort(SortKey::Descending);
        let prices: Vec<f64> = query(&favorites, &descriptor).items.iter().map(|f| f.price).collect();
        assert_eq!(prices, vec![300.0, 200.0, 100.0]);

        descriptor.set_sort(SortKey::None);
        let prices: Vec<f64> = query(&favorites, &descriptor).items.iter().map(|f| f.price).collect();
        assert_eq!(prices, vec![300.0, 100.0, 200.0]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let favorites = vec![
            Favorite::hotel(1, "A", "X", 3.0, 50.0),
            Favorite::hotel(2, "B", "X", 3.0, 10.0),
            Favorite::hotel(3, "C", "X", 3.0, 50.0),
            Favorite::hotel(4, "D", "X", 3.0, 10.0),
        ];
        let mut descriptor = QueryDescriptor::new(page_size(20));
        descriptor.set_sort(SortKey::Ascending);
        assert_eq!(ids(&query(&favorites, &descriptor)), vec![2, 4, 1, 3]);
        descriptor.set_sort(SortKey::Descending);
        assert_eq!(ids(&query(&favorites, &descriptor)), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_pagination_45_items() {
        let favorites: Vec<Favorite> = (1..=45)
            .map(|id| Favorite::hotel(id, "Hotel", "City", 4.0, id as f64))
            .collect();
        let mut descriptor = QueryDescriptor::new(page_size(20));
        descriptor.set_sort(SortKey::Ascending);

        let first = query(&favorites, &descriptor);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_matches, 45);
        assert_eq!(first.items.len(), 20);

        descriptor.next_page(first.total_pages);
        let second = query(&favorites, &descriptor);
        assert_eq!(second.items.len(), 20);
        assert_eq!(second.items[0].id, 21);

        descriptor.next_page(second.total_pages);
        let third = query(&favorites, &descriptor);
        assert_eq!(third.items.len(), 5);
        assert_eq!(ids(&third), vec![41, 42, 43, 44, 45]);

        descriptor.next_page(third.total_pages);
        assert_eq!(descriptor.page(), 3);
        assert!(!descriptor.has_next(third.total_pages));
    }

    #[test]
    fn test_filter_change_resets_and_clamps_page() {
        let mut favorites: Vec<Favorite> = (1..=35)
            .map(|id| Favorite::hotel(id, "Hotel", "City", 4.0, 10.0))
            .collect();
        favorites.extend((36..=45).map(|id| Favorite::flight(id, "KLM", "AMS - OSL", date(2), 10.0)));

        let mut descriptor = QueryDescriptor::new(page_size(20));
        let total = query(&favorites, &descriptor).total_pages;
        descriptor.set_page(3, total);
        assert_eq!(descriptor.page(), 3);
        assert_eq!(query(&favorites, &descriptor).items.len(), 5);

        descriptor.set_type_filter(Filter::Only(Category::Flight));
        assert_eq!(descriptor.page(), 1);
        let result = query(&favorites, &descriptor);
        assert_eq!(result.total_pages, 1);
        descriptor.clamp_page(result.total_pages);
        assert_eq!(descriptor.page(), 1);
        assert_eq!(query(&favorites, &descriptor).items.len(), 10);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let favorites = sample_favorites();
        let mut descriptor = QueryDescriptor::new(page_size(2));
        descriptor.page = 9;
        let result = query(&favorites, &descriptor);
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 2);

        descriptor.page = 0;
        assert!(query(&favorites, &descriptor).items.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let favorites: Vec<Favorite> = Vec::new();
        let descriptor = QueryDescriptor::new(page_size(20));
        let result = query(&favorites, &descriptor);
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 1);
        assert!(!descriptor.has_prev());
        assert!(!descriptor.has_next(result.total_pages));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, page_size(20)), 1);
        assert_eq!(total_pages(20, page_size(20)), 1);
        assert_eq!(total_pages(21, page_size(20)), 2);
        assert_eq!(total_pages(45, page_size(20)), 3);
    }

    #[test]
    fn test_filter_cycle() {
        let options = [Category::Flight, Category::Hotel];
        let filter = Filter::All.cycle(&options);
        assert_eq!(filter, Filter::Only(Category::Flight));
        let filter = filter.cycle(&options);
        assert_eq!(filter, Filter::Only(Category::Hotel));
        assert_eq!(filter.cycle(&options), Filter::All);
    }
}
