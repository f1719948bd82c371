// ── Domain model ──
//
// Canonical in-memory representations of the entities the dashboard
// manages. Everything is transient session state seeded at startup;
// nothing here persists.

pub mod booking;
pub mod listing;
pub mod review;
pub mod tenant;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use hosteldesk_core::model::*` gives you everything.

// Bookings
pub use booking::{Booking, BookingId, BookingStatus, PaymentStatus};

// Listing form
pub use listing::{Facility, PhotoAttachment, RoomTypeEntry};

// Reviews
pub use review::{OwnerReply, Review, ReviewId};

// Tenants
pub use tenant::{LeaseStatus, Tenant, TenantId};
