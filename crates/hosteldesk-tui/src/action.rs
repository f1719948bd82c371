//! All possible UI actions. Actions are the sole mechanism for state mutation.

use hosteldesk_core::confirm::ConfirmRequest;
use hosteldesk_core::gateway::OwnerCommand;
use hosteldesk_core::notice::Notice;
use hosteldesk_core::{BookingId, ReviewId, TenantId};

use crate::screen::ScreenId;

/// An operation that must be confirmed in the modal dialog before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ApproveBooking { id: BookingId },
    RejectBooking { id: BookingId },
    ReportReview { id: ReviewId },
    TerminateLease { id: TenantId },
}

impl ConfirmAction {
    /// Builds the dialog request for this action: title, body copy, and
    /// danger styling for the irreversible ones.
    pub fn request(self) -> ConfirmRequest<ConfirmAction> {
        match self {
            Self::ApproveBooking { .. } => ConfirmRequest::new(
                "Approve Booking",
                "Are you sure you want to approve this booking request?",
                self,
            ),
            Self::RejectBooking { .. } => ConfirmRequest::new(
                "Reject Booking",
                "Are you sure you want to reject this booking? This action cannot be undone.",
                self,
            )
            .danger(),
            Self::ReportReview { .. } => ConfirmRequest::new(
                "Report Review",
                "Are you sure you want to report this review as fake? Our team will investigate.",
                self,
            ),
            Self::TerminateLease { .. } => ConfirmRequest::new(
                "Terminate Lease",
                "Are you sure you want to terminate the lease for this tenant? This action cannot be undone.",
                self,
            )
            .danger(),
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ─────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleSidebar,

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmRequest<ConfirmAction>),
    ConfirmYes,
    ConfirmNo,
    /// Broadcast after the user accepts; the owning screen reacts.
    Confirmed(ConfirmAction),

    // ── Gateway Commands ──────────────────────────────────────────
    /// Run a simulated backend command on a spawned task. The matching
    /// `*Done` action is sent back once the command resolves.
    Dispatch(OwnerCommand),

    // ── Command Completions ───────────────────────────────────────
    ApproveDone {
        id: BookingId,
        result: Result<(), String>,
    },
    RejectDone {
        id: BookingId,
        result: Result<(), String>,
    },
    ReplyDone {
        id: ReviewId,
        text: String,
        result: Result<(), String>,
    },
    SubmitListingDone {
        result: Result<(), String>,
    },
    ReportDone {
        id: ReviewId,
        result: Result<(), String>,
    },
    TerminateDone {
        id: TenantId,
        result: Result<(), String>,
    },

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchSubmit,
    /// Debounce fired (or Enter forced it): the query is now applied.
    QueryApplied(String),

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notice),
    DismissNotice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_and_terminate_requests_are_danger_styled() {
        use hosteldesk_core::confirm::ConfirmStyle;

        let approve = ConfirmAction::ApproveBooking { id: BookingId(1) }.request();
        assert_eq!(approve.style, ConfirmStyle::Primary);
        assert_eq!(approve.title, "Approve Booking");

        let reject = ConfirmAction::RejectBooking { id: BookingId(1) }.request();
        assert_eq!(reject.style, ConfirmStyle::Danger);

        let terminate = ConfirmAction::TerminateLease { id: TenantId(1) }.request();
        assert_eq!(terminate.style, ConfirmStyle::Danger);

        let report = ConfirmAction::ReportReview { id: ReviewId(1) }.request();
        assert_eq!(report.style, ConfirmStyle::Primary);
    }

    #[test]
    fn request_carries_the_originating_action() {
        let id = BookingId(7);
        let request = ConfirmAction::ApproveBooking { id }.request();
        assert_eq!(request.on_confirm, ConfirmAction::ApproveBooking { id });
    }
}
