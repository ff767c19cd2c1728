//! Explore screen state: points of interest, activities and travel insights.

use crate::error::TravelError;
use crate::query::{self, QueryDescriptor, QueryResult};
use crate::screens::{Notice, wrap_next, wrap_prev};
use crate::task::{Outcome, PendingOp, take_finished};
use crate::travel::TravelClient;
use crate::travel::models::{Activity, Insights, PointOfInterest};
use std::num::NonZeroUsize;

#[derive(Debug)]
pub struct ExploreScreen {
    pub points_of_interest: Vec<PointOfInterest>,
    pub activities: Vec<Activity>,
    pub insights: Insights,
    /// Search and page over points of interest
    pub query: QueryDescriptor,
    /// Highlighted activity
    pub selected_activity: usize,
    /// Details of the last opened activity
    pub activity_details: Option<Activity>,
    refreshing: Option<PendingOp<Insights>>,
    loading_details: Option<PendingOp<Activity>>,
}

impl ExploreScreen {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            points_of_interest: Vec::new(),
            activities: Vec::new(),
            insights: Insights::default(),
            query: QueryDescriptor::new(page_size),
            selected_activity: 0,
            activity_details: None,
            refreshing: None,
            loading_details: None,
        }
    }

    pub fn set_points_of_interest(&mut self, points: Vec<PointOfInterest>) {
        self.points_of_interest = points;
        let total = self.visible().total_pages;
        self.query.clamp_page(total);
    }

    pub fn set_activities(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
        self.selected_activity = self
            .selected_activity
            .min(self.activities.len().saturating_sub(1));
    }

    /// Current page of matching points of interest.
    pub fn visible(&self) -> QueryResult<'_, PointOfInterest> {
        query::query(&self.points_of_interest, &self.query)
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.query.push_search_char(ch);
    }

    pub fn pop_search_char(&mut self) {
        self.query.pop_search_char();
    }

    pub fn next_page(&mut self) {
        let total = self.visible().total_pages;
        self.query.next_page(total);
    }

    pub fn prev_page(&mut self) {
        self.query.prev_page();
    }

    pub fn move_up(&mut self) {
        self.selected_activity = wrap_prev(self.selected_activity, self.activities.len());
    }

    pub fn move_down(&mut self) {
        self.selected_activity = wrap_next(self.selected_activity, self.activities.len());
    }

    /// Whether the insights refresh control is disabled.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.is_some()
    }

    pub fn is_loading_details(&self) -> bool {
        self.loading_details.is_some()
    }

    /// Re-fetch travel insights.
    ///
    /// # Details
    /// Refused while a refresh is in flight.
    pub fn refresh_insights(&mut self, client: &TravelClient) -> Result<(), TravelError> {
        if let Some(op) = &self.refreshing {
            return Err(TravelError::Busy(op.label()));
        }
        let client = client.clone();
        self.refreshing = Some(PendingOp::spawn("Refreshing insights", async move {
            client.fetch_insights().await
        }));
        Ok(())
    }

    /// Fetch details for the highlighted activity.
    ///
    /// A newer request replaces one still in flight.
    pub fn open_selected_activity(&mut self, client: &TravelClient) {
        let Some(activity_id) = self
            .activities
            .get(self.selected_activity)
            .map(|activity| activity.id.clone())
        else {
            return;
        };
        if let Some(previous) = self.loading_details.take() {
            previous.cancel();
        }
        let client = client.clone();
        self.loading_details = Some(PendingOp::spawn("Loading activity", async move {
            client.fetch_activity_details(&activity_id).await
        }));
    }

    /// Apply results of finished refresh and detail requests.
    pub async fn poll(&mut self) -> Option<Notice> {
        let mut notice = None;
        match take_finished(&mut self.refreshing).await {
            Some(Outcome::Success(insights)) => {
                self.insights = insights;
                notice = Some(Notice::Status("Insights updated".to_string()));
            }
            Some(Outcome::Failure(e)) => {
                tracing::warn!(error = %e, "failed to refresh insights");
                notice = Some(Notice::Status(format!("Failed to refresh insights: {}", e)));
            }
            Some(Outcome::Cancelled) | None => {}
        }
        match take_finished(&mut self.loading_details).await {
            Some(Outcome::Success(activity)) => {
                self.activity_details = Some(activity);
            }
            Some(Outcome::Failure(e)) => {
                tracing::warn!(error = %e, "failed to load activity details");
                notice = Some(Notice::Status(format!("Failed to load activity: {}", e)));
            }
            Some(Outcome::Cancelled) | None => {}
        }
        notice
    }

    pub fn cancel_pending(&mut self) {
        if let Some(op) = self.refreshing.take() {
            op.cancel();
        }
        if let Some(op) = self.loading_details.take() {
            op.cancel();
        }
    }
}
