//! Status badges: colored spans for booking, payment, and lease states,
//! plus the star strip for review ratings.

use ratatui::style::Style;
use ratatui::text::Span;

use hosteldesk_core::{BookingStatus, LeaseStatus, PaymentStatus};

use crate::theme;

/// Returns a styled `Span` for a booking status cell.
pub fn booking_status_span(status: BookingStatus) -> Span<'static> {
    let color = match status {
        BookingStatus::Pending => theme::WARNING_AMBER,
        BookingStatus::Approved => theme::SUCCESS_GREEN,
        BookingStatus::Rejected => theme::ERROR_RED,
        BookingStatus::CheckedIn => theme::INFO_BLUE,
    };
    Span::styled(status.label(), Style::default().fg(color))
}

/// Returns a styled `Span` for a payment status cell.
pub fn payment_span(payment: PaymentStatus) -> Span<'static> {
    let color = match payment {
        PaymentStatus::Paid => theme::SUCCESS_GREEN,
        PaymentStatus::Pending => theme::WARNING_AMBER,
        PaymentStatus::NotApplicable => theme::SLATE_MID,
    };
    Span::styled(payment.label(), Style::default().fg(color))
}

/// Returns a styled `Span` for a lease status cell.
pub fn lease_span(lease: LeaseStatus) -> Span<'static> {
    let color = match lease {
        LeaseStatus::Active => theme::SUCCESS_GREEN,
        LeaseStatus::Ending => theme::WARNING_AMBER,
    };
    Span::styled(lease.label(), Style::default().fg(color))
}

/// "★★★★☆" strip for a 1-5 rating. Out-of-range ratings clamp to 5.
pub fn rating_stars(rating: u8) -> Span<'static> {
    let filled = usize::from(rating.min(5));
    let mut stars = "★".repeat(filled);
    stars.push_str(&"☆".repeat(5 - filled));
    Span::styled(stars, Style::default().fg(theme::STAR_GOLD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rating_stars_clamp_and_pad() {
        assert_eq!(rating_stars(4).content, "★★★★☆");
        assert_eq!(rating_stars(0).content, "☆☆☆☆☆");
        assert_eq!(rating_stars(9).content, "★★★★★");
    }
}
