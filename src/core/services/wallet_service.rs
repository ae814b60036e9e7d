use tracing::{debug, info};

use crate::{currency::parse_digits, wishlist::Wishlist};

/// Transient feedback for a successful top-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopUpReceipt {
    pub amount: u64,
    pub balance: u64,
}

pub struct WalletService;

impl WalletService {
    /// Extracts a positive whole amount from free-form input (`"12a3.000"` -> `123000`).
    pub fn parse_amount(raw: &str) -> Option<u64> {
        parse_digits(raw).filter(|amount| *amount > 0)
    }

    /// Adds a parsed amount to the wallet. Invalid input leaves the wallet untouched.
    pub fn top_up(wishlist: &mut Wishlist, raw: &str) -> Option<TopUpReceipt> {
        let Some(amount) = Self::parse_amount(raw) else {
            debug!(input = raw, "top-up ignored: no positive amount");
            return None;
        };
        let balance = wishlist.wallet_balance.checked_add(amount)?;
        wishlist.wallet_balance = balance;
        info!(amount, balance, "wallet topped up");
        Some(TopUpReceipt { amount, balance })
    }
}
