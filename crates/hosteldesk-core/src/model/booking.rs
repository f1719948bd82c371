// ── Booking domain types ──

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::text::{format_currency, format_date};

/// Identifier for a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingId(pub u32);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BK-{:04}", self.0)
    }
}

/// Lifecycle of a booking request.
///
/// `Pending` resolves to `Approved` or `Rejected` through the owner's
/// actions; both are terminal. `CheckedIn` only ever arrives with the
/// seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    CheckedIn,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::CheckedIn => "Checked In",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment state shown alongside a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A guest booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub guest: String,
    pub room_type: String,
    pub check_in: NaiveDate,
    pub monthly_rent: u64,
    pub status: BookingStatus,
    pub payment: PaymentStatus,
    pub requested_at: DateTime<Utc>,
}

impl Booking {
    /// Full text of the rendered table row, as scanned by the search filter.
    pub fn row_text(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.id,
            self.guest,
            self.room_type,
            format_date(self.check_in),
            format_currency(self.monthly_rent),
            self.status,
            self.payment,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn booking_id_renders_zero_padded() {
        assert_eq!(BookingId(7).to_string(), "BK-0007");
        assert_eq!(BookingId(1042).to_string(), "BK-1042");
    }

    #[test]
    fn row_text_contains_every_rendered_column() {
        let booking = Booking {
            id: BookingId(1),
            guest: "John Smith".to_string(),
            room_type: "Single Room".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            monthly_rent: 15_000,
            status: BookingStatus::Pending,
            payment: PaymentStatus::Paid,
            requested_at: Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).unwrap(),
        };
        let text = booking.row_text();
        assert_eq!(
            text,
            "BK-0001 John Smith Single Room Sep 1, 2026 Rs. 15,000 Pending Paid"
        );
    }
}
