// ── Toast notices ──
//
// Single-slot notice queue: at most one toast is ever visible, a new
// post supersedes the current one, and the slot auto-expires after a
// fixed lifetime swept from the app tick.

use std::time::{Duration, Instant};

use tracing::debug;

/// Severity of a transient toast notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
    Info,
}

impl Severity {
    /// Parses a severity name; anything unrecognized falls back to `Info`.
    pub fn parse(name: &str) -> Self {
        match name {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A transient toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    /// Toast for a core error, using the error's own severity mapping.
    pub fn from_error(err: &crate::error::CoreError) -> Self {
        Self {
            message: err.to_string(),
            severity: err.severity(),
        }
    }
}

/// Holder for the single visible notice.
#[derive(Debug)]
pub struct NoticeSlot {
    active: Option<(Notice, Instant)>,
    lifetime: Duration,
}

impl NoticeSlot {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            active: None,
            lifetime,
        }
    }

    /// Shows `notice`, replacing whatever is currently visible.
    pub fn post(&mut self, notice: Notice, now: Instant) {
        debug!(severity = notice.severity.label(), message = %notice.message, "Posting notice");
        self.active = Some((notice, now));
    }

    /// Removes the visible notice, if any. Returns whether one was removed.
    pub fn dismiss(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Expires the notice once its lifetime has elapsed. Returns whether
    /// it expired on this call.
    pub fn sweep(&mut self, now: Instant) -> bool {
        match &self.active {
            Some((_, shown_at)) if now.duration_since(*shown_at) >= self.lifetime => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn active(&self) -> Option<&Notice> {
        self.active.as_ref().map(|(notice, _)| notice)
    }

    pub fn is_visible(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slot() -> NoticeSlot {
        NoticeSlot::new(Duration::from_millis(5000))
    }

    #[test]
    fn post_replaces_the_visible_notice() {
        let mut slot = slot();
        let now = Instant::now();
        slot.post(Notice::success("Booking approved successfully!"), now);
        slot.post(Notice::warning("Booking rejected."), now);

        let active = slot.active().unwrap();
        assert_eq!(active.message, "Booking rejected.");
        assert_eq!(active.severity, Severity::Warning);
    }

    #[test]
    fn sweep_expires_only_after_the_full_lifetime() {
        let mut slot = slot();
        let now = Instant::now();
        slot.post(Notice::info("Filter applied"), now);

        assert!(!slot.sweep(now + Duration::from_millis(4999)));
        assert!(slot.is_visible());
        assert!(slot.sweep(now + Duration::from_millis(5000)));
        assert!(!slot.is_visible());
    }

    #[test]
    fn sweep_on_an_empty_slot_is_a_no_op() {
        let mut slot = slot();
        assert!(!slot.sweep(Instant::now()));
    }

    #[test]
    fn posting_restarts_the_expiry_clock() {
        let mut slot = slot();
        let now = Instant::now();
        slot.post(Notice::info("first"), now);
        let later = now + Duration::from_millis(4000);
        slot.post(Notice::info("second"), later);

        assert!(!slot.sweep(now + Duration::from_millis(5000)));
        assert!(slot.sweep(later + Duration::from_millis(5000)));
    }

    #[test]
    fn dismiss_reports_whether_anything_was_visible() {
        let mut slot = slot();
        assert!(!slot.dismiss());
        slot.post(Notice::error("File size must be less than 5MB."), Instant::now());
        assert!(slot.dismiss());
        assert!(slot.active().is_none());
    }

    #[test]
    fn unknown_severity_names_fall_back_to_info() {
        assert_eq!(Severity::parse("success"), Severity::Success);
        assert_eq!(Severity::parse("warning"), Severity::Warning);
        assert_eq!(Severity::parse("error"), Severity::Error);
        assert_eq!(Severity::parse("info"), Severity::Info);
        assert_eq!(Severity::parse("fatal"), Severity::Info);
        assert_eq!(Severity::parse(""), Severity::Info);
    }
}
