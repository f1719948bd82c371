//! Reusable rendering helpers shared by the screens.

pub mod badges;
pub mod progress;
pub mod sub_tabs;
