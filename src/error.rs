//! Domain errors for screen actions that are refused.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TravelError {
    #[error("Invalid commission value: {0:?}")]
    InvalidCommission(String),

    #[error("No trip is being edited")]
    NoTripBeingEdited,

    #[error("Trip {0} not found")]
    TripNotFound(u64),

    #[error("Trip {0} is cancelled")]
    TripCancelled(u64),

    #[error("Check-in is only available for flight trips.")]
    CheckInUnavailable,

    #[error("{0} already in progress")]
    Busy(&'static str),
}
