// ── Review domain types ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a guest review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(pub u32);

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RV-{:04}", self.0)
    }
}

/// The owner's one allowed response to a review. The text is stored
/// already markup-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerReply {
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

/// A guest review of the hostel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub guest: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    pub text: String,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub reply: Option<OwnerReply>,
    #[serde(default)]
    pub reported: bool,
}

impl Review {
    pub fn has_reply(&self) -> bool {
        self.reply.is_some()
    }
}
