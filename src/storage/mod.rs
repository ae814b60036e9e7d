pub mod json_backend;

use crate::{
    errors::Result,
    wishlist::{ExternalLink, Goal, Wishlist},
};

/// Persistence for the four independent wishlist records.
///
/// Loads never fail on bad data: a missing or malformed record comes back as
/// its built-in default. Only write failures surface as errors.
pub trait StateStore {
    fn load_goals(&self) -> Vec<Goal>;
    fn load_wallet(&self) -> u64;
    fn load_categories(&self) -> Vec<String>;
    fn load_links(&self) -> Vec<ExternalLink>;

    fn save_goals(&self, goals: &[Goal]) -> Result<()>;
    fn save_wallet(&self, balance: u64) -> Result<()>;
    fn save_categories(&self, categories: &[String]) -> Result<()>;
    fn save_links(&self, links: &[ExternalLink]) -> Result<()>;

    fn load_wishlist(&self) -> Wishlist {
        Wishlist {
            goals: self.load_goals(),
            wallet_balance: self.load_wallet(),
            categories: self.load_categories(),
            external_links: self.load_links(),
        }
    }

    fn save_wishlist(&self, wishlist: &Wishlist) -> Result<()> {
        self.save_goals(&wishlist.goals)?;
        self.save_wallet(wishlist.wallet_balance)?;
        self.save_categories(&wishlist.categories)?;
        self.save_links(&wishlist.external_links)
    }
}

pub use json_backend::JsonStore;
