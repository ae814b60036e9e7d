#![doc(test(attr(deny(warnings))))]

//! DreamFund tracks wishlist goals funded from a virtual wallet, with a
//! distribution engine that spreads wallet funds across outstanding goals.

pub mod advice;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod distribution;
pub mod errors;
pub mod storage;
pub mod transfer;
pub mod utils;
pub mod wishlist;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("DreamFund tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
