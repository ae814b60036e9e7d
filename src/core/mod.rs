//! Wishlist services and shared filesystem helpers.

pub mod services;
pub mod utils;
