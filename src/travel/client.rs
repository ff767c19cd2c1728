//! Travel data provider client.
//!
//! Stands in for the remote travel-data API. Responses come from an optional
//! seed file and are delayed to mimic network latency.

use crate::config::Config;
use crate::travel::models::{Activity, Favorite, Insights, PointOfInterest, Trip};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Records served by the mock provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeedData {
    pub favorites: Vec<Favorite>,
    pub trips: Vec<Trip>,
    pub points_of_interest: Vec<PointOfInterest>,
    pub activities: Vec<Activity>,
    pub insights: Insights,
}

impl SeedData {
    /// Load seed data from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the seed JSON file
    ///
    /// # Returns
    /// * `Result<SeedData>` - Parsed records or error
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse seed file: {}", path.display()))
    }
}

/// Client for the travel-data provider.
///
/// Cheap to clone; clones share the same seed data.
#[derive(Debug, Clone)]
pub struct TravelClient {
    /// Records returned by fetch calls
    seed: Arc<SeedData>,
    /// Simulated round-trip latency
    delay: Duration,
    /// Fail every mutating request
    fail_mutations: bool,
    /// Base URL for airline check-in pages
    check_in_base_url: String,
}

impl TravelClient {
    /// Create a new client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<TravelClient>` - New client or error
    ///
    /// # Details
    /// Loads the seed file when `seed_path` is set; otherwise every fetch
    /// returns an empty collection.
    pub fn new(config: &Config) -> Result<Self> {
        let seed = match config.seed_file_path() {
            Some(path) => SeedData::load(&path)?,
            None => SeedData::default(),
        };
        tracing::info!(
            favorites = seed.favorites.len(),
            trips = seed.trips.len(),
            points_of_interest = seed.points_of_interest.len(),
            activities = seed.activities.len(),
            "travel client ready"
        );
        Ok(Self::with_seed(seed, Duration::from_millis(config.request_delay_ms))
            .failing_mutations(config.simulate_failures))
    }

    /// Create a client serving `seed` after `delay`.
    pub fn with_seed(seed: SeedData, delay: Duration) -> Self {
        Self {
            seed: Arc::new(seed),
            delay,
            fail_mutations: false,
            check_in_base_url: "https://checkin.example.com".to_string(),
        }
    }

    /// Make delete and check-in requests fail.
    pub fn failing_mutations(mut self, fail: bool) -> Self {
        self.fail_mutations = fail;
        self
    }

    async fn round_trip(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn check_failure(&self, what: &str) -> Result<()> {
        if self.fail_mutations {
            return Err(anyhow::anyhow!("Travel API error (503): {} unavailable", what));
        }
        Ok(())
    }

    /// Fetch the user's saved flights and hotels.
    pub async fn fetch_favorites(&self) -> Result<Vec<Favorite>> {
        self.round_trip().await;
        Ok(self.seed.favorites.clone())
    }

    /// Fetch the agent's client trips.
    pub async fn fetch_trips(&self) -> Result<Vec<Trip>> {
        self.round_trip().await;
        Ok(self.seed.trips.clone())
    }

    /// Fetch points of interest around the current destination.
    pub async fn fetch_points_of_interest(&self) -> Result<Vec<PointOfInterest>> {
        self.round_trip().await;
        Ok(self.seed.points_of_interest.clone())
    }

    /// Fetch popular tours and activities.
    pub async fn fetch_activities(&self) -> Result<Vec<Activity>> {
        self.round_trip().await;
        Ok(self.seed.activities.clone())
    }

    /// Fetch trip purpose prediction and air traffic analytics.
    pub async fn fetch_insights(&self) -> Result<Insights> {
        self.round_trip().await;
        Ok(self.seed.insights.clone())
    }

    /// Fetch full details for one activity.
    ///
    /// # Arguments
    /// * `activity_id` - Activity identifier
    ///
    /// # Details
    /// Falls back to a generic description when the activity has none.
    pub async fn fetch_activity_details(&self, activity_id: &str) -> Result<Activity> {
        self.round_trip().await;
        let known = self
            .seed
            .activities
            .iter()
            .find(|activity| activity.id == activity_id);
        Ok(Activity {
            id: activity_id.to_string(),
            name: known.map_or_else(|| "Activity Details".to_string(), |a| a.name.clone()),
            description: Some(
                known
                    .and_then(|a| a.description.clone())
                    .unwrap_or_else(|| format!("Details for activity {}", activity_id)),
            ),
        })
    }

    /// Delete a saved item.
    ///
    /// # Arguments
    /// * `favorite_id` - Identifier of the saved item
    pub async fn delete_favorite(&self, favorite_id: u64) -> Result<()> {
        self.round_trip().await;
        self.check_failure("favorites")?;
        tracing::info!(favorite_id, "favorite deleted");
        Ok(())
    }

    /// Fetch the online check-in page for an airline.
    ///
    /// # Arguments
    /// * `airline_code` - IATA airline code
    ///
    /// # Returns
    /// * `Result<String>` - Check-in URL or error
    pub async fn fetch_check_in_link(&self, airline_code: &str) -> Result<String> {
        self.round_trip().await;
        self.check_failure("check-in links")?;
        Ok(format!("{}/{}", self.check_in_base_url, airline_code))
    }
}
