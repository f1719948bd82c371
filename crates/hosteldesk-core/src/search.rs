// ── Debounced search ──
//
// Explicit debounce state machine for the search prompt. Keystrokes
// update the draft; the draft becomes the applied query once the
// configured quiet period passes, or immediately on submit.

use std::time::{Duration, Instant};

/// Debounced query state. The table filters on `applied()`, never on
/// the draft, so typing does not re-filter until input pauses.
#[derive(Debug)]
pub struct DebouncedQuery {
    draft: String,
    applied: String,
    delay: Duration,
    dirty_since: Option<Instant>,
}

impl DebouncedQuery {
    pub fn new(delay: Duration) -> Self {
        Self {
            draft: String::new(),
            applied: String::new(),
            delay,
            dirty_since: None,
        }
    }

    /// Records a new draft and restarts the quiet-period clock.
    pub fn input(&mut self, draft: impl Into<String>, now: Instant) {
        self.draft = draft.into();
        self.dirty_since = Some(now);
    }

    /// Applies the draft if the quiet period has elapsed. Returns whether
    /// the applied query changed on this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.dirty_since {
            Some(since) if now.duration_since(since) >= self.delay => {
                self.dirty_since = None;
                self.applied.clone_from(&self.draft);
                true
            }
            _ => false,
        }
    }

    /// Applies the draft immediately, skipping the quiet period.
    pub fn submit(&mut self) {
        self.dirty_since = None;
        self.applied.clone_from(&self.draft);
    }

    /// Drops both draft and applied query.
    pub fn clear(&mut self) {
        self.draft.clear();
        self.applied.clear();
        self.dirty_since = None;
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn applied(&self) -> &str {
        &self.applied
    }
}

/// Case-insensitive substring match over a rendered row's full text.
/// An empty query matches everything.
pub fn row_matches(row_text: &str, query: &str) -> bool {
    query.is_empty() || row_text.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query() -> DebouncedQuery {
        DebouncedQuery::new(Duration::from_millis(300))
    }

    #[test]
    fn poll_applies_only_after_the_quiet_period() {
        let mut q = query();
        let now = Instant::now();
        q.input("smith", now);

        assert!(!q.poll(now + Duration::from_millis(299)));
        assert_eq!(q.applied(), "");
        assert!(q.poll(now + Duration::from_millis(300)));
        assert_eq!(q.applied(), "smith");
    }

    #[test]
    fn new_input_restarts_the_quiet_period() {
        let mut q = query();
        let now = Instant::now();
        q.input("sm", now);
        q.input("smi", now + Duration::from_millis(200));

        assert!(!q.poll(now + Duration::from_millis(300)));
        assert!(q.poll(now + Duration::from_millis(500)));
        assert_eq!(q.applied(), "smi");
    }

    #[test]
    fn poll_is_quiet_once_applied() {
        let mut q = query();
        let now = Instant::now();
        q.input("doe", now);
        assert!(q.poll(now + Duration::from_millis(300)));
        assert!(!q.poll(now + Duration::from_millis(900)));
    }

    #[test]
    fn submit_applies_immediately() {
        let mut q = query();
        q.input("jane", Instant::now());
        q.submit();
        assert_eq!(q.applied(), "jane");
    }

    #[test]
    fn clear_drops_draft_and_applied() {
        let mut q = query();
        q.input("smith", Instant::now());
        q.submit();
        q.clear();
        assert_eq!(q.draft(), "");
        assert_eq!(q.applied(), "");
        assert!(!q.poll(Instant::now() + Duration::from_millis(500)));
    }

    #[test]
    fn row_matching_is_case_insensitive_substring() {
        assert!(row_matches("BK-0001 John Smith Single Room", "smith"));
        assert!(row_matches("BK-0001 John Smith Single Room", "JOHN SM"));
        assert!(!row_matches("BK-0002 Jane Doe Double Room", "smith"));
        assert!(row_matches("anything at all", ""));
    }
}
