// ── Review board ──
//
// View model for the guest-review cards: one reply composer at a time,
// a single permanent owner reply per review, and a one-way reported
// flag. Reply text is markup-escaped at the moment it is stored.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{OwnerReply, Review, ReviewId};
use crate::text::escape_markup;

/// Rating filter pills above the review cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Five,
    Four,
    Three,
    Two,
    One,
}

impl RatingFilter {
    pub const ALL: [RatingFilter; 6] = [
        RatingFilter::All,
        RatingFilter::Five,
        RatingFilter::Four,
        RatingFilter::Three,
        RatingFilter::Two,
        RatingFilter::One,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Five => "5★",
            Self::Four => "4★",
            Self::Three => "3★",
            Self::Two => "2★",
            Self::One => "1★",
        }
    }

    pub fn matches(&self, rating: u8) -> bool {
        match self {
            Self::All => true,
            Self::Five => rating == 5,
            Self::Four => rating == 4,
            Self::Three => rating == 3,
            Self::Two => rating == 2,
            Self::One => rating == 1,
        }
    }
}

/// The open reply composer, bound to exactly one review.
#[derive(Debug)]
struct Composer {
    review: ReviewId,
    draft: String,
}

/// View model for the reviews screen.
#[derive(Debug, Default)]
pub struct ReviewBoard {
    reviews: Vec<Review>,
    busy: HashSet<ReviewId>,
    composer: Option<Composer>,
    filter: RatingFilter,
}

impl ReviewBoard {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            reviews,
            busy: HashSet::new(),
            composer: None,
            filter: RatingFilter::All,
        }
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn get(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    /// Cards matching the active rating pill.
    pub fn visible(&self) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| self.filter.matches(r.rating))
            .collect()
    }

    pub fn set_filter(&mut self, filter: RatingFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> RatingFilter {
        self.filter
    }

    /// Mean rating across all reviews, or zero when there are none.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        f64::from(sum) / self.reviews.len() as f64
    }

    // ── Reply composer ──

    /// Opens the composer for `id`, or closes it if it is already open
    /// there. Returns the new open state. Only reviews without a reply
    /// still have the affordance.
    pub fn toggle_reply(&mut self, id: ReviewId) -> Result<bool, CoreError> {
        let review = self.get(id).ok_or(CoreError::UnknownReview { id })?;
        if review.has_reply() {
            return Err(CoreError::AlreadyReplied);
        }
        match &self.composer {
            Some(composer) if composer.review == id => {
                self.composer = None;
                Ok(false)
            }
            _ => {
                self.composer = Some(Composer {
                    review: id,
                    draft: String::new(),
                });
                Ok(true)
            }
        }
    }

    /// The review the composer is open for, with the current draft.
    pub fn composer(&self) -> Option<(ReviewId, &str)> {
        self.composer
            .as_ref()
            .map(|c| (c.review, c.draft.as_str()))
    }

    pub fn draft_mut(&mut self) -> Option<&mut String> {
        self.composer.as_mut().map(|c| &mut c.draft)
    }

    /// Validates the draft and marks the review busy for the gateway
    /// call, yielding the trimmed reply text. A blank draft is refused
    /// with no state change; the composer stays open for another try.
    pub fn begin_reply(&mut self, id: ReviewId) -> Result<String, CoreError> {
        let review = self.get(id).ok_or(CoreError::UnknownReview { id })?;
        if review.has_reply() {
            return Err(CoreError::AlreadyReplied);
        }
        let trimmed = self
            .composer
            .as_ref()
            .filter(|c| c.review == id)
            .map(|c| c.draft.trim().to_string())
            .unwrap_or_default();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyReply);
        }
        if !self.busy.insert(id) {
            return Err(CoreError::RequestInFlight);
        }
        debug!(review = %id, "Reply in flight");
        Ok(trimmed)
    }

    /// Stores the owner reply: text is trimmed and markup-escaped, the
    /// reply affordance disappears for good, and the composer closes.
    pub fn finish_reply(
        &mut self,
        id: ReviewId,
        text: &str,
        posted_at: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        self.busy.remove(&id);
        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::UnknownReview { id })?;
        review.reply = Some(OwnerReply {
            text: escape_markup(text.trim()),
            posted_at,
        });
        if self
            .composer
            .as_ref()
            .is_some_and(|c| c.review == id)
        {
            self.composer = None;
        }
        info!(review = %id, "Owner reply posted");
        Ok(())
    }

    // ── Reporting ──

    /// Marks the review busy for the report call. Each review can be
    /// reported once.
    pub fn begin_report(&mut self, id: ReviewId) -> Result<(), CoreError> {
        let review = self.get(id).ok_or(CoreError::UnknownReview { id })?;
        if review.reported {
            return Err(CoreError::AlreadyReported);
        }
        if !self.busy.insert(id) {
            return Err(CoreError::RequestInFlight);
        }
        debug!(review = %id, "Report in flight");
        Ok(())
    }

    /// Sets the permanent reported flag and disables the affordance.
    pub fn finish_report(&mut self, id: ReviewId) -> Result<(), CoreError> {
        self.busy.remove(&id);
        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::UnknownReview { id })?;
        review.reported = true;
        info!(review = %id, "Review reported");
        Ok(())
    }

    /// Clears the busy mark without changing the review, for a request
    /// that failed instead of completing.
    pub fn release(&mut self, id: ReviewId) {
        self.busy.remove(&id);
    }

    pub fn is_busy(&self, id: ReviewId) -> bool {
        self.busy.contains(&id)
    }
}
