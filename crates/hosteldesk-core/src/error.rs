// ── Core error types ──
//
// User-facing errors from the view-model layer. Display strings double
// as notice text, so they are written the way the dashboard shows them.

use thiserror::Error;

use crate::model::{BookingId, BookingStatus, ReviewId, TenantId};
use crate::notice::Severity;

/// Error type shared across the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Entity lookup ──
    #[error("Unknown booking: {id}")]
    UnknownBooking { id: BookingId },

    #[error("Unknown review: {id}")]
    UnknownReview { id: ReviewId },

    #[error("Unknown tenant: {id}")]
    UnknownTenant { id: TenantId },

    #[error("No room type at position {index}")]
    UnknownRoomType { index: usize },

    // ── Workflow guards ──
    #[error("Request already in flight")]
    RequestInFlight,

    #[error("Booking is already {status}")]
    AlreadyResolved { status: BookingStatus },

    #[error("Review already has an owner reply")]
    AlreadyReplied,

    #[error("Review has already been reported")]
    AlreadyReported,

    #[error("Lease is already ending")]
    LeaseAlreadyEnding,

    // ── Listing form bounds ──
    #[error("Maximum {max} room types allowed.")]
    RoomTypeLimit { max: usize },

    #[error("You must have at least {min} room type.")]
    RoomTypeFloor { min: usize },

    #[error("Please upload only JPEG, PNG, or WebP images.")]
    UnsupportedImageType { mime: String },

    #[error("File size must be less than {}MB.", .max_bytes / (1024 * 1024))]
    ImageTooLarge { max_bytes: u64 },

    // ── Validation ──
    #[error("{label} is required")]
    RequiredField { label: String },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("Please enter a reply before submitting.")]
    EmptyReply,
}

impl CoreError {
    /// Severity of the toast shown when this error reaches the user.
    ///
    /// Guard failures and bound violations are warnings; validation and
    /// upload rejections, plus broken entity lookups, are errors.
    pub fn severity(&self) -> Severity {
        match self {
            Self::RequestInFlight
            | Self::AlreadyResolved { .. }
            | Self::AlreadyReplied
            | Self::AlreadyReported
            | Self::LeaseAlreadyEnding
            | Self::RoomTypeLimit { .. }
            | Self::RoomTypeFloor { .. }
            | Self::EmptyReply => Severity::Warning,
            Self::UnknownBooking { .. }
            | Self::UnknownReview { .. }
            | Self::UnknownTenant { .. }
            | Self::UnknownRoomType { .. }
            | Self::UnsupportedImageType { .. }
            | Self::ImageTooLarge { .. }
            | Self::RequiredField { .. }
            | Self::InvalidEmail
            | Self::InvalidPhone => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_violations_warn_while_validation_errors_error() {
        assert_eq!(CoreError::RoomTypeLimit { max: 10 }.severity(), Severity::Warning);
        assert_eq!(CoreError::EmptyReply.severity(), Severity::Warning);
        assert_eq!(CoreError::RequestInFlight.severity(), Severity::Warning);
        assert_eq!(CoreError::InvalidEmail.severity(), Severity::Error);
        assert_eq!(
            CoreError::ImageTooLarge { max_bytes: 5_242_880 }.severity(),
            Severity::Error
        );
    }
}
