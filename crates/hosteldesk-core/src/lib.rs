//! Domain logic and view models for the hosteldesk terminal dashboard.
//!
//! This crate owns everything the rendering layer observes but never
//! mutates directly:
//!
//! - **[`BookingBoard`]**: the bookings table, with status tabs, the
//!   applied search query, and the approve/reject workflow with its
//!   synchronous busy guard against double submission.
//!
//! - **[`ListingForm`]**: the "add hostel" form, with a bounded
//!   room-type list, facility toggles, photo attachments behind
//!   MIME/size checks, live progress, and first-violation validation.
//!
//! - **[`ReviewBoard`]**: guest reviews with a single reply composer,
//!   one permanent markup-escaped owner reply per review, and a one-way
//!   reported flag.
//!
//! - **[`TenantRoster`]**: current occupants and the lease-termination
//!   workflow.
//!
//! - **[`NoticeSlot`] / [`ConfirmSlot`]**: the one-slot replace-on-new
//!   queues behind the toast and the confirmation dialog.
//!
//! - **[`StubGateway`]**: the simulated backend seam; every mutating
//!   command resolves through a `Result` after a fixed latency.

pub mod bookings;
pub mod confirm;
pub mod error;
pub mod gateway;
pub mod listing;
pub mod model;
pub mod notice;
pub mod reviews;
pub mod search;
pub mod tenants;
pub mod text;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bookings::{BookingBoard, StatusCounts, StatusFilter};
pub use confirm::{ConfirmRequest, ConfirmSlot, ConfirmStyle};
pub use error::CoreError;
pub use gateway::{OwnerCommand, StubGateway};
pub use listing::{ListingField, ListingForm, ListingLimits, mime_for_extension};
pub use notice::{Notice, NoticeSlot, Severity};
pub use reviews::{RatingFilter, ReviewBoard};
pub use search::{DebouncedQuery, row_matches};
pub use tenants::TenantRoster;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Booking, BookingId, BookingStatus, Facility, LeaseStatus, OwnerReply, PaymentStatus,
    PhotoAttachment, Review, ReviewId, RoomTypeEntry, Tenant, TenantId,
};
