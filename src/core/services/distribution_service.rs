use tracing::info;

use crate::{
    distribution::{Distribution, DistributionEngine, DistributionPolicy},
    wishlist::Wishlist,
};

pub struct DistributionService;

impl DistributionService {
    /// Runs the engine over the wishlist and commits goals and residual together.
    pub fn run(wishlist: &mut Wishlist, policy: DistributionPolicy) -> Distribution {
        let distribution = DistributionEngine::run(&wishlist.goals, wishlist.wallet_balance, policy);
        if !distribution.is_noop() {
            info!(
                policy = %policy,
                allocated = distribution.allocated(),
                residual = distribution.residual,
                goals = distribution.allocations.len(),
                "wallet distributed"
            );
            wishlist.apply_distribution(distribution.clone());
        }
        distribution
    }

    /// Runs the engine without touching the wishlist.
    pub fn preview(wishlist: &Wishlist, policy: DistributionPolicy) -> Distribution {
        DistributionEngine::run(&wishlist.goals, wishlist.wallet_balance, policy)
    }
}
