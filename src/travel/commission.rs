//! Commission arithmetic for client trips.

use crate::error::TravelError;
use crate::travel::models::{Commission, CommissionType};

/// Commission amount charged on `vendor_amount`.
pub fn commission_amount(vendor_amount: f64, commission: Commission) -> f64 {
    match commission.kind {
        CommissionType::Percentage => vendor_amount * (commission.value / 100.0),
        CommissionType::Fixed => commission.value,
    }
}

/// Total amount billed to the client: vendor amount plus commission.
pub fn recompute(vendor_amount: f64, commission: Commission) -> f64 {
    vendor_amount + commission_amount(vendor_amount, commission)
}

/// Strip everything but digits and dots from a commission display value.
///
/// Used to seed the edit field from strings such as `"10%"` or `"$75"`.
pub fn strip_to_number(display: &str) -> String {
    display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Parse the commission value typed into the edit modal.
///
/// # Returns
/// * `Result<f64, TravelError>` - Non-negative finite value, or the rejected input
pub fn parse_commission_input(input: &str) -> Result<f64, TravelError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(TravelError::InvalidCommission(input.to_string())),
    }
}
