// ── Simulated backend gateway ──
//
// Stand-in for the hostel platform API. Commands resolve after a fixed
// per-command latency; the Result seam is where real transport errors
// would surface once an actual backend is attached.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{BookingId, ReviewId, TenantId};

/// A mutating command destined for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerCommand {
    ApproveBooking { id: BookingId },
    RejectBooking { id: BookingId },
    PostReply { id: ReviewId, body: String },
    SubmitListing,
    ReportReview { id: ReviewId },
    TerminateLease { id: TenantId },
}

impl OwnerCommand {
    /// Simulated round-trip latency for this command.
    pub fn latency(&self) -> Duration {
        match self {
            Self::ApproveBooking { .. } | Self::RejectBooking { .. } => Duration::from_millis(500),
            Self::PostReply { .. } => Duration::from_millis(800),
            Self::SubmitListing => Duration::from_millis(1500),
            Self::ReportReview { .. } => Duration::from_millis(400),
            Self::TerminateLease { .. } => Duration::from_millis(600),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ApproveBooking { .. } => "approve-booking",
            Self::RejectBooking { .. } => "reject-booking",
            Self::PostReply { .. } => "post-reply",
            Self::SubmitListing => "submit-listing",
            Self::ReportReview { .. } => "report-review",
            Self::TerminateLease { .. } => "terminate-lease",
        }
    }
}

/// Always-succeeding gateway used until a real backend exists. It still
/// validates its input, so callers must handle the failure branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubGateway;

impl StubGateway {
    pub fn new() -> Self {
        Self
    }

    /// Executes `command` against the simulated backend.
    pub async fn execute(&self, command: OwnerCommand) -> Result<(), CoreError> {
        if let OwnerCommand::PostReply { body, .. } = &command {
            if body.trim().is_empty() {
                return Err(CoreError::EmptyReply);
            }
        }

        let latency = command.latency();
        debug!(command = command.name(), ?latency, "Dispatching gateway command");
        sleep(latency).await;
        info!(command = command.name(), "Gateway command completed");
        Ok(())
    }
}
