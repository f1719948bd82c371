//! Screen implementations. Each screen is a top-level Component.

pub mod bookings;
pub mod dashboard;
pub mod listing;
pub mod reviews;
pub mod tenants;

use hosteldesk_core::ListingLimits;

use crate::component::Component;
use crate::screen::ScreenId;
use crate::seed::SeedData;

/// Create screen components for the tab bar, populated from the seed
/// dataset. The dashboard reads the seed before the entity vectors move
/// into their owning screens.
pub fn create_screens(seed: SeedData, limits: ListingLimits) -> Vec<(ScreenId, Box<dyn Component>)> {
    let dashboard = dashboard::DashboardScreen::new(&seed);
    vec![
        (ScreenId::Dashboard, Box::new(dashboard)),
        (
            ScreenId::Bookings,
            Box::new(bookings::BookingsScreen::new(seed.bookings)),
        ),
        (
            ScreenId::Listing,
            Box::new(listing::ListingScreen::new(limits)),
        ),
        (
            ScreenId::Reviews,
            Box::new(reviews::ReviewsScreen::new(seed.reviews)),
        ),
        (
            ScreenId::Tenants,
            Box::new(tenants::TenantsScreen::new(seed.tenants)),
        ),
    ]
}
