//! Travel data models.
//!
//! Contains the records shown on the three screens: saved favorites,
//! client trips, points of interest, activities and travel insights.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of bookable product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Flight,
    Hotel,
}

impl Category {
    /// Human readable plural label used by filter controls.
    pub fn plural_label(self) -> &'static str {
        match self {
            Category::Flight => "Flights",
            Category::Hotel => "Hotels",
        }
    }
}

/// Lifecycle status of a client trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Upcoming,
    Process,
    Completed,
    Cancelled,
}

impl TripStatus {
    /// Statuses an operator may pick in the edit modal.
    pub const EDITABLE: [TripStatus; 3] =
        [TripStatus::Upcoming, TripStatus::Process, TripStatus::Completed];

    /// Lowercase label, as matched by free-text search.
    pub fn label(self) -> &'static str {
        match self {
            TripStatus::Upcoming => "upcoming",
            TripStatus::Process => "process",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Capitalized label for display.
    pub fn title(self) -> &'static str {
        match self {
            TripStatus::Upcoming => "Upcoming",
            TripStatus::Process => "Process",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_cancelled(self) -> bool {
        self == TripStatus::Cancelled
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a commission value is applied to the vendor amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionType {
    #[default]
    Percentage,
    Fixed,
}

impl CommissionType {
    pub fn toggled(self) -> Self {
        match self {
            CommissionType::Percentage => CommissionType::Fixed,
            CommissionType::Fixed => CommissionType::Percentage,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CommissionType::Percentage => "Percentage",
            CommissionType::Fixed => "Fixed",
        }
    }
}

/// Commission charged on top of a vendor amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Commission {
    #[serde(rename = "type")]
    pub kind: CommissionType,
    pub value: f64,
}

#[cfg(test)]
impl Commission {
    pub fn percentage(value: f64) -> Self {
        Self {
            kind: CommissionType::Percentage,
            value,
        }
    }

    pub fn fixed(value: f64) -> Self {
        Self {
            kind: CommissionType::Fixed,
            value,
        }
    }
}

impl fmt::Display for Commission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CommissionType::Percentage => write!(f, "{}%", self.value),
            CommissionType::Fixed => write!(f, "${}", self.value),
        }
    }
}

/// Category specific fields of a saved item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FavoriteDetails {
    Flight {
        airline: String,
        route: String,
        date: NaiveDate,
    },
    Hotel {
        name: String,
        location: String,
        #[serde(default)]
        rating: f32,
    },
}

/// A flight or hotel offer the user saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: u64,
    pub price: f64,
    #[serde(flatten)]
    pub details: FavoriteDetails,
}

#[cfg(test)]
impl Favorite {
    pub fn flight(id: u64, airline: &str, route: &str, date: NaiveDate, price: f64) -> Self {
        Self {
            id,
            price,
            details: FavoriteDetails::Flight {
                airline: airline.to_string(),
                route: route.to_string(),
                date,
            },
        }
    }

    pub fn hotel(id: u64, name: &str, location: &str, rating: f32, price: f64) -> Self {
        Self {
            id,
            price,
            details: FavoriteDetails::Hotel {
                name: name.to_string(),
                location: location.to_string(),
                rating,
            },
        }
    }
}

impl Favorite {
    pub fn category(&self) -> Category {
        match self.details {
            FavoriteDetails::Flight { .. } => Category::Flight,
            FavoriteDetails::Hotel { .. } => Category::Hotel,
        }
    }

    /// Primary display line (airline or hotel name).
    pub fn headline(&self) -> &str {
        match &self.details {
            FavoriteDetails::Flight { airline, .. } => airline,
            FavoriteDetails::Hotel { name, .. } => name,
        }
    }
}

/// A client trip managed by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: u64,
    pub client_name: String,
    pub route: String,
    pub date: NaiveDate,
    pub status: TripStatus,
    pub commission: Commission,
    pub vendor_amount: f64,
    pub total_amount: f64,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default)]
    pub airline_code: Option<String>,
}

impl Trip {
    /// Check-in is offered for upcoming flights with a known airline.
    pub fn check_in_available(&self) -> bool {
        self.category == Category::Flight
            && self.status == TripStatus::Upcoming
            && self.airline_code.is_some()
    }
}

/// A point of interest near a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Free-form kind (e.g. "sights", "restaurant")
    #[serde(default)]
    pub kind: String,
}

/// A bookable tour or activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Predicted purpose of travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPurpose {
    pub prediction: String,
    pub confidence: f32,
}

/// Booking or traveler count for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStat {
    pub route: String,
    pub count: u64,
}

/// Travel insights and analytics panel content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Insights {
    pub trip_purpose: Option<TripPurpose>,
    pub most_booked: Vec<RouteStat>,
    pub most_traveled: Vec<RouteStat>,
}

impl Insights {
    pub fn is_empty(&self) -> bool {
        self.trip_purpose.is_none() && self.most_booked.is_empty() && self.most_traveled.is_empty()
    }
}
