//! Trip management screen state.
//!
//! Manages client trips: listing, commission edits, cancellation with a
//! typed confirmation, and airline check-in.

use crate::config::CommissionDefaults;
use crate::error::TravelError;
use crate::query::{self, Filter, QueryDescriptor, QueryResult};
use crate::screens::{Notice, wrap_next, wrap_prev};
use crate::task::{Outcome, PendingOp, take_finished};
use crate::travel::TravelClient;
use crate::travel::commission::{parse_commission_input, recompute, strip_to_number};
use crate::travel::models::{Category, Commission, CommissionType, Trip, TripStatus};
use std::num::NonZeroUsize;

const STATUS_OPTIONS: [TripStatus; 4] = [
    TripStatus::Upcoming,
    TripStatus::Process,
    TripStatus::Completed,
    TripStatus::Cancelled,
];
const TYPE_OPTIONS: [Category; 2] = [Category::Flight, Category::Hotel];

/// Word the operator must type to cancel a trip.
pub const CANCEL_WORD: &str = "cancel";

/// Draft of the edit-trip modal.
#[derive(Debug, Clone, PartialEq)]
pub struct TripEditor {
    pub trip_id: u64,
    /// Commission value as typed
    pub commission_input: String,
    pub commission_type: CommissionType,
    pub status: TripStatus,
}

impl TripEditor {
    fn for_trip(trip: &Trip) -> Self {
        Self {
            trip_id: trip.id,
            commission_input: strip_to_number(&trip.commission.to_string()),
            commission_type: trip.commission.kind,
            status: trip.status,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        self.commission_input.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.commission_input.pop();
    }

    pub fn toggle_commission_type(&mut self) {
        self.commission_type = self.commission_type.toggled();
    }

    /// Step through Upcoming, Process and Completed.
    pub fn cycle_status(&mut self, forward: bool) {
        let options = TripStatus::EDITABLE;
        let index = options
            .iter()
            .position(|status| *status == self.status)
            .unwrap_or(0);
        let next = if forward {
            wrap_next(index, options.len())
        } else {
            wrap_prev(index, options.len())
        };
        self.status = options[next];
    }
}

/// Typed-confirmation gate in front of trip cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CancelGate {
    #[default]
    Idle,
    PendingConfirmation {
        trip_id: u64,
        input: String,
    },
    Cancelled {
        trip_id: u64,
    },
}

impl CancelGate {
    /// Open the confirmation for `trip_id` with an empty input.
    pub fn request(&mut self, trip_id: u64) {
        *self = CancelGate::PendingConfirmation {
            trip_id,
            input: String::new(),
        };
    }

    /// Confirmation text typed so far.
    pub fn input(&self) -> Option<&str> {
        match self {
            CancelGate::PendingConfirmation { input, .. } => Some(input),
            _ => None,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        if let CancelGate::PendingConfirmation { input, .. } = self {
            input.push(ch);
        }
    }

    pub fn pop_char(&mut self) {
        if let CancelGate::PendingConfirmation { input, .. } = self {
            input.pop();
        }
    }

    /// Accept the confirmation if the input is the cancel word.
    ///
    /// # Returns
    /// * `Option<u64>` - Trip to cancel; `None` leaves the gate pending
    pub fn confirm(&mut self) -> Option<u64> {
        let CancelGate::PendingConfirmation { trip_id, input } = self else {
            return None;
        };
        if input.to_lowercase() != CANCEL_WORD {
            return None;
        }
        let trip_id = *trip_id;
        *self = CancelGate::Cancelled { trip_id };
        Some(trip_id)
    }

    /// Close the gate from any state.
    pub fn dismiss(&mut self) {
        *self = CancelGate::Idle;
    }
}

/// State of the Trips screen.
#[derive(Debug)]
pub struct TripsScreen {
    pub trips: Vec<Trip>,
    pub query: QueryDescriptor,
    /// Selected row on the current page
    pub selected_index: usize,
    /// Open edit modal
    pub editor: Option<TripEditor>,
    pub cancel_gate: CancelGate,
    /// Agency-wide commission settings
    pub defaults: CommissionDefaults,
    checking_in: Option<PendingOp<String>>,
}

impl TripsScreen {
    pub fn new(page_size: NonZeroUsize, defaults: CommissionDefaults) -> Self {
        Self {
            trips: Vec::new(),
            query: QueryDescriptor::new(page_size),
            selected_index: 0,
            editor: None,
            cancel_gate: CancelGate::Idle,
            defaults,
            checking_in: None,
        }
    }

    pub fn set_trips(&mut self, trips: Vec<Trip>) {
        self.trips = trips;
        self.after_change();
    }

    /// Keep page and selection valid after trips changed or left the filter.
    fn after_change(&mut self) {
        let total = self.visible().total_pages;
        self.query.clamp_page(total);
        let len = self.visible().items.len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// Current page of the filtered trip list.
    pub fn visible(&self) -> QueryResult<'_, Trip> {
        query::query(&self.trips, &self.query)
    }

    pub fn selected(&self) -> Option<&Trip> {
        self.visible().items.get(self.selected_index).copied()
    }

    pub fn trip(&self, trip_id: u64) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id == trip_id)
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

    /// Cycle All -> Upcoming -> Process -> Completed -> Cancelled.
    pub fn cycle_status_filter(&mut self) {
        self.query
            .set_status_filter(self.query.status_filter().cycle(&STATUS_OPTIONS));
        self.selected_index = 0;
    }

    /// Cycle All -> Flights -> Hotels.
    pub fn cycle_type_filter(&mut self) {
        self.query.set_type_filter(self.query.type_filter().cycle(&TYPE_OPTIONS));
        self.selected_index = 0;
    }

    pub fn status_filter_name(&self) -> &'static str {
        match self.query.status_filter() {
            Filter::All => "All Status",
            Filter::Only(status) => status.title(),
        }
    }

    pub fn type_filter_name(&self) -> &'static str {
        match self.query.type_filter() {
            Filter::All => "All Types",
            Filter::Only(category) => category.plural_label(),
        }
    }

    /// Open the edit modal for `trip_id`.
    ///
    /// # Details
    /// Cancelled trips cannot be edited.
    pub fn open_editor(&mut self, trip_id: u64) -> Result<(), TravelError> {
        let trip = self.trip(trip_id).ok_or(TravelError::TripNotFound(trip_id))?;
        if trip.status.is_cancelled() {
            return Err(TravelError::TripCancelled(trip_id));
        }
        self.editor = Some(TripEditor::for_trip(trip));
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Apply the edit modal to its trip.
    ///
    /// # Returns
    /// * `Result<f64, TravelError>` - New total amount
    ///
    /// # Details
    /// Replaces only the edited trip; on invalid input nothing changes and the
    /// modal stays open.
    pub fn save_edit(&mut self) -> Result<f64, TravelError> {
        let Some(editor) = self.editor.as_ref() else {
            return Err(TravelError::NoTripBeingEdited);
        };
        let value = parse_commission_input(&editor.commission_input)?;
        let commission = Commission {
            kind: editor.commission_type,
            value,
        };
        let (trip_id, status) = (editor.trip_id, editor.status);

        let trip = self
            .trips
            .iter_mut()
            .find(|trip| trip.id == trip_id)
            .ok_or(TravelError::TripNotFound(trip_id))?;
        trip.commission = commission;
        trip.total_amount = recompute(trip.vendor_amount, commission);
        trip.status = status;
        let total = trip.total_amount;

        tracing::info!(trip_id, %commission, total, status = %status, "trip updated");
        self.editor = None;
        self.after_change();
        Ok(total)
    }

    /// Open the cancellation modal for `trip_id`.
    pub fn request_cancel(&mut self, trip_id: u64) -> Result<(), TravelError> {
        let trip = self.trip(trip_id).ok_or(TravelError::TripNotFound(trip_id))?;
        if trip.status.is_cancelled() {
            return Err(TravelError::TripCancelled(trip_id));
        }
        self.cancel_gate.request(trip_id);
        Ok(())
    }

    /// Confirm the cancellation modal.
    ///
    /// # Returns
    /// * `Option<u64>` - Cancelled trip, or `None` when the typed word does not match
    pub fn confirm_cancel(&mut self) -> Option<u64> {
        let trip_id = self.cancel_gate.confirm()?;
        if let Some(trip) = self.trips.iter_mut().find(|trip| trip.id == trip_id) {
            trip.status = TripStatus::Cancelled;
            tracing::info!(trip_id, "trip cancelled");
        }
        self.after_change();
        Some(trip_id)
    }

    pub fn is_checking_in(&self) -> bool {
        self.checking_in.is_some()
    }

    /// Fetch the check-in link for the selected trip.
    ///
    /// # Details
    /// Only upcoming flight trips with an airline code can check in.
    pub fn start_check_in(&mut self, client: &TravelClient) -> Result<(), TravelError> {
        if let Some(op) = &self.checking_in {
            return Err(TravelError::Busy(op.label()));
        }
        let trip = self.selected().ok_or(TravelError::CheckInUnavailable)?;
        let airline_code = match (&trip.airline_code, trip.check_in_available()) {
            (Some(code), true) => code.clone(),
            _ => return Err(TravelError::CheckInUnavailable),
        };
        let client = client.clone();
        self.checking_in = Some(PendingOp::spawn("Check-in", async move {
            client.fetch_check_in_link(&airline_code).await
        }));
        Ok(())
    }

    /// Apply the result of a finished check-in request, if any.
    pub async fn poll(&mut self) -> Option<Notice> {
        match take_finished(&mut self.checking_in).await? {
            Outcome::Success(link) => Some(Notice::OpenUrl(link)),
            Outcome::Failure(e) => {
                tracing::warn!(error = %e, "failed to fetch check-in link");
                Some(Notice::Status("Could not retrieve check-in link.".to_string()))
            }
            Outcome::Cancelled => None,
        }
    }

    pub fn cancel_pending(&mut self) {
        if let Some(op) = self.checking_in.take() {
            op.cancel();
        }
    }
}
