//! Wishlist domain models: goals, priorities, external links and the state container.

pub mod goal;
pub mod link;
#[allow(clippy::module_inception)]
pub mod wishlist;

pub use goal::{Goal, GoalId, Priority};
pub use link::ExternalLink;
pub use wishlist::{
    default_categories, validate_goals, Wishlist, DEFAULT_CATEGORIES, FALLBACK_CATEGORY,
    OTHER_CATEGORY,
};
