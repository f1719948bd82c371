//! Screen identifier enum for the tab bar and number-key navigation.

use std::fmt;

/// Identifies each primary TUI screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Bookings, // 2
    Listing,  // 3
    Reviews,  // 4
    Tenants,  // 5
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 5] = [
        Self::Dashboard,
        Self::Bookings,
        Self::Listing,
        Self::Reviews,
        Self::Tenants,
    ];

    /// Numeric key (1-5) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Bookings => 2,
            Self::Listing => 3,
            Self::Reviews => 4,
            Self::Tenants => 5,
        }
    }

    /// Screen from a numeric key (1-5). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Dashboard),
            2 => Some(Self::Bookings),
            3 => Some(Self::Listing),
            4 => Some(Self::Reviews),
            5 => Some(Self::Tenants),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Bookings => "Bookings",
            Self::Listing => "My Hostel",
            Self::Reviews => "Reviews",
            Self::Tenants => "Tenants",
        }
    }

    /// Compact label for narrow terminals.
    pub fn label_short(self) -> &'static str {
        match self {
            Self::Dashboard => "Dash",
            Self::Bookings => "Book",
            Self::Listing => "Hostel",
            Self::Reviews => "Rev",
            Self::Tenants => "Ten",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn number_round_trips_for_all_screens() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(screen.number()), Some(screen));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(6), None);
    }

    #[test]
    fn next_and_prev_wrap_around() {
        assert_eq!(ScreenId::Tenants.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::Tenants);
        assert_eq!(ScreenId::Dashboard.next(), ScreenId::Bookings);
        assert_eq!(ScreenId::Bookings.prev(), ScreenId::Dashboard);
    }
}
