//! Seed dataset: the bookings, reviews, and tenants the dashboard opens
//! with. A built-in sample set is used unless `--sample-data` points at
//! a JSON file.

use std::fs;
use std::path::Path;

use chrono::{Duration, Utc};
use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

use hosteldesk_core::{
    Booking, BookingId, BookingStatus, LeaseStatus, OwnerReply, PaymentStatus, Review, ReviewId,
    Tenant, TenantId,
};

/// Everything the screens are populated with at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
}

impl SeedData {
    /// Load a seed dataset from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading sample data from {}", path.display()))?;
        let seed: Self = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("parsing sample data from {}", path.display()))?;
        Ok(seed)
    }

    /// The built-in sample dataset. Dates are anchored to the current
    /// day so relative timestamps stay plausible.
    pub fn builtin() -> Self {
        let now = Utc::now();
        let today = now.date_naive();

        let bookings = vec![
            Booking {
                id: BookingId(1),
                guest: "John Smith".to_string(),
                room_type: "Single Room".to_string(),
                check_in: today + Duration::days(7),
                monthly_rent: 15_000,
                status: BookingStatus::Pending,
                payment: PaymentStatus::Paid,
                requested_at: now - Duration::hours(2),
            },
            Booking {
                id: BookingId(2),
                guest: "Anisha Gurung".to_string(),
                room_type: "Twin Sharing".to_string(),
                check_in: today + Duration::days(12),
                monthly_rent: 9_500,
                status: BookingStatus::Pending,
                payment: PaymentStatus::Pending,
                requested_at: now - Duration::hours(26),
            },
            Booking {
                id: BookingId(3),
                guest: "Maria Lopez".to_string(),
                room_type: "Deluxe Room".to_string(),
                check_in: today + Duration::days(3),
                monthly_rent: 22_000,
                status: BookingStatus::Approved,
                payment: PaymentStatus::Paid,
                requested_at: now - Duration::days(3),
            },
            Booking {
                id: BookingId(4),
                guest: "Bikash Shrestha".to_string(),
                room_type: "Single Room".to_string(),
                check_in: today + Duration::days(20),
                monthly_rent: 15_000,
                status: BookingStatus::Approved,
                payment: PaymentStatus::Pending,
                requested_at: now - Duration::days(4),
            },
            Booking {
                id: BookingId(5),
                guest: "Tom Becker".to_string(),
                room_type: "Dorm Bed".to_string(),
                check_in: today + Duration::days(1),
                monthly_rent: 6_000,
                status: BookingStatus::Rejected,
                payment: PaymentStatus::NotApplicable,
                requested_at: now - Duration::days(6),
            },
            Booking {
                id: BookingId(6),
                guest: "Priya Sharma".to_string(),
                room_type: "Twin Sharing".to_string(),
                check_in: today - Duration::days(10),
                monthly_rent: 9_500,
                status: BookingStatus::CheckedIn,
                payment: PaymentStatus::Paid,
                requested_at: now - Duration::days(14),
            },
        ];

        let reviews = vec![
            Review {
                id: ReviewId(1),
                guest: "Sarah Kim".to_string(),
                rating: 5,
                text: "Clean rooms, fast wifi, and the staff went out of their way \
                       to help me settle in. Best hostel I stayed at in Kathmandu."
                    .to_string(),
                posted_at: now - Duration::hours(5),
                reply: None,
                reported: false,
            },
            Review {
                id: ReviewId(2),
                guest: "David Chen".to_string(),
                rating: 4,
                text: "Great location and friendly people. The mess food gets a bit \
                       repetitive after a month, but that is my only complaint."
                    .to_string(),
                posted_at: now - Duration::days(2),
                reply: Some(OwnerReply {
                    text: "Thank you David! We rotate the mess menu every two weeks \
                           now, hope you notice the difference."
                        .to_string(),
                    posted_at: now - Duration::days(1),
                }),
                reported: false,
            },
            Review {
                id: ReviewId(3),
                guest: "Emma Wilson".to_string(),
                rating: 5,
                text: "Felt like home. Power backup meant no interrupted work calls, \
                       and the rooftop is a lovely place to unwind."
                    .to_string(),
                posted_at: now - Duration::days(5),
                reply: None,
                reported: false,
            },
            Review {
                id: ReviewId(4),
                guest: "Raj Patel".to_string(),
                rating: 2,
                text: "Hot water was out for three days during my stay and nobody \
                       told us when it would be back."
                    .to_string(),
                posted_at: now - Duration::days(9),
                reply: None,
                reported: false,
            },
        ];

        let tenants = vec![
            Tenant {
                id: TenantId(1),
                name: "Priya Sharma".to_string(),
                room: "Room 204".to_string(),
                monthly_rent: 9_500,
                lease_start: today - Duration::days(10),
                lease: LeaseStatus::Active,
                last_payment: Some(today - Duration::days(10)),
            },
            Tenant {
                id: TenantId(2),
                name: "Niraj Thapa".to_string(),
                room: "Room 108".to_string(),
                monthly_rent: 15_000,
                lease_start: today - Duration::days(190),
                lease: LeaseStatus::Active,
                last_payment: Some(today - Duration::days(4)),
            },
            Tenant {
                id: TenantId(3),
                name: "Alice Fontaine".to_string(),
                room: "Room 301".to_string(),
                monthly_rent: 22_000,
                lease_start: today - Duration::days(75),
                lease: LeaseStatus::Active,
                last_payment: None,
            },
        ];

        Self {
            bookings,
            reviews,
            tenants,
        }
    }
}
