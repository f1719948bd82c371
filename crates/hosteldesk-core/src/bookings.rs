// ── Booking board ──
//
// View model for the bookings table: status tabs, debounce-applied
// search query, per-row busy marks, and the approve/reject workflow.
// Busy marking is synchronous and happens before any simulated call is
// spawned; that ordering is the only double-submission guard.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{Booking, BookingId, BookingStatus, PaymentStatus};
use crate::search::row_matches;

/// Status tabs shown above the bookings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
    CheckedIn,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Pending,
        StatusFilter::Approved,
        StatusFilter::Rejected,
        StatusFilter::CheckedIn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::CheckedIn => "Checked In",
        }
    }

    pub fn matches(&self, status: BookingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == BookingStatus::Pending,
            Self::Approved => status == BookingStatus::Approved,
            Self::Rejected => status == BookingStatus::Rejected,
            Self::CheckedIn => status == BookingStatus::CheckedIn,
        }
    }
}

/// Per-status row tallies for the filter tabs. Counts scan every row
/// and ignore the search query, so the tab numbers stay stable while
/// searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub checked_in: usize,
}

impl StatusCounts {
    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Pending => self.pending,
            StatusFilter::Approved => self.approved,
            StatusFilter::Rejected => self.rejected,
            StatusFilter::CheckedIn => self.checked_in,
        }
    }
}

/// View model for the bookings table.
#[derive(Debug, Default)]
pub struct BookingBoard {
    bookings: Vec<Booking>,
    busy: HashSet<BookingId>,
    filter: StatusFilter,
    query: String,
}

impl BookingBoard {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            busy: HashSet::new(),
            filter: StatusFilter::All,
            query: String::new(),
        }
    }

    /// Marks a pending booking busy ahead of a simulated backend call.
    ///
    /// Fails for unknown rows, rows already resolved, and rows with a
    /// request in flight. A second `begin` on the same row must fail
    /// until the first finishes.
    pub fn begin(&mut self, id: BookingId) -> Result<(), CoreError> {
        let booking = self
            .bookings
            .iter()
            .find(|b| b.id == id)
            .ok_or(CoreError::UnknownBooking { id })?;
        if booking.status != BookingStatus::Pending {
            return Err(CoreError::AlreadyResolved {
                status: booking.status,
            });
        }
        if !self.busy.insert(id) {
            return Err(CoreError::RequestInFlight);
        }
        debug!(booking = %id, "Booking request in flight");
        Ok(())
    }

    /// Completes an approval: the row becomes `Approved` and its
    /// approve/reject affordances disappear with the pending status.
    pub fn finish_approve(&mut self, id: BookingId) -> Result<(), CoreError> {
        self.busy.remove(&id);
        let booking = self.booking_mut(id)?;
        booking.status = BookingStatus::Approved;
        info!(booking = %id, "Booking approved");
        Ok(())
    }

    /// Completes a rejection: the row becomes `Rejected` and payment is
    /// forced to `N/A` regardless of its prior state.
    pub fn finish_reject(&mut self, id: BookingId) -> Result<(), CoreError> {
        self.busy.remove(&id);
        let booking = self.booking_mut(id)?;
        booking.status = BookingStatus::Rejected;
        booking.payment = PaymentStatus::NotApplicable;
        info!(booking = %id, "Booking rejected");
        Ok(())
    }

    /// Clears the busy mark without changing the booking, for a request
    /// that failed instead of completing.
    pub fn release(&mut self, id: BookingId) {
        self.busy.remove(&id);
    }

    pub fn is_busy(&self, id: BookingId) -> bool {
        self.busy.contains(&id)
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Sets the applied search query (already debounced by the caller).
    pub fn apply_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows matching the active status tab and the applied query.
    pub fn visible(&self) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| self.filter.matches(b.status))
            .filter(|b| row_matches(&b.row_text(), &self.query))
            .collect()
    }

    /// Tallies every row by status. O(n) per call, recomputed on demand.
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for booking in &self.bookings {
            counts.all += 1;
            match booking.status {
                BookingStatus::Pending => counts.pending += 1,
                BookingStatus::Approved => counts.approved += 1,
                BookingStatus::Rejected => counts.rejected += 1,
                BookingStatus::CheckedIn => counts.checked_in += 1,
            }
        }
        counts
    }

    pub fn get(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    fn booking_mut(&mut self, id: BookingId) -> Result<&mut Booking, CoreError> {
        self.bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CoreError::UnknownBooking { id })
    }
}
