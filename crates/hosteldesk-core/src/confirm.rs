// ── Confirmation slot ──
//
// Single-slot modal confirmation: opening a new request replaces any
// pending one, so exactly zero or one dialog exists at a time.

/// Visual emphasis of the confirm control. `Danger` changes the accent
/// color only; accept and cancel behave identically in both styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmStyle {
    #[default]
    Primary,
    Danger,
}

/// A pending confirmation, carrying the action to run once accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest<A> {
    pub title: String,
    pub message: String,
    pub style: ConfirmStyle,
    pub on_confirm: A,
}

impl<A> ConfirmRequest<A> {
    pub fn new(title: impl Into<String>, message: impl Into<String>, on_confirm: A) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            style: ConfirmStyle::Primary,
            on_confirm,
        }
    }

    /// Marks the request as irreversible, switching the confirm accent.
    pub fn danger(mut self) -> Self {
        self.style = ConfirmStyle::Danger;
        self
    }
}

/// Holder for the single pending confirmation request.
#[derive(Debug)]
pub struct ConfirmSlot<A> {
    pending: Option<ConfirmRequest<A>>,
}

impl<A> ConfirmSlot<A> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Opens `request`, replacing any pending confirmation.
    pub fn open(&mut self, request: ConfirmRequest<A>) {
        self.pending = Some(request);
    }

    /// Accepts the pending request, yielding its on-confirm action.
    pub fn confirm(&mut self) -> Option<A> {
        self.pending.take().map(|request| request.on_confirm)
    }

    /// Cancels the pending request without yielding its action. Returns
    /// whether a dialog was open.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn pending(&self) -> Option<&ConfirmRequest<A>> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

impl<A> Default for ConfirmSlot<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Cmd {
        Approve,
        Reject,
    }

    #[test]
    fn opening_a_second_request_replaces_the_first() {
        let mut slot = ConfirmSlot::new();
        slot.open(ConfirmRequest::new(
            "Approve Booking",
            "Are you sure you want to approve this booking request?",
            Cmd::Approve,
        ));
        slot.open(
            ConfirmRequest::new(
                "Reject Booking",
                "Are you sure you want to reject this booking? This action cannot be undone.",
                Cmd::Reject,
            )
            .danger(),
        );

        let pending = slot.pending().unwrap();
        assert_eq!(pending.title, "Reject Booking");
        assert_eq!(pending.style, ConfirmStyle::Danger);
        assert_eq!(slot.confirm(), Some(Cmd::Reject));
        assert!(!slot.is_open());
    }

    #[test]
    fn confirm_yields_the_stored_action_exactly_once() {
        let mut slot = ConfirmSlot::new();
        slot.open(ConfirmRequest::new("Approve Booking", "…", Cmd::Approve));
        assert_eq!(slot.confirm(), Some(Cmd::Approve));
        assert_eq!(slot.confirm(), None);
    }

    #[test]
    fn cancel_drops_the_action_without_yielding_it() {
        let mut slot = ConfirmSlot::new();
        assert!(!slot.cancel());
        slot.open(ConfirmRequest::new("Approve Booking", "…", Cmd::Approve));
        assert!(slot.cancel());
        assert_eq!(slot.confirm(), None);
    }

    #[test]
    fn default_style_is_primary() {
        let request = ConfirmRequest::new("Report Review", "…", Cmd::Approve);
        assert_eq!(request.style, ConfirmStyle::Primary);
    }
}
