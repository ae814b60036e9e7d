pub mod category_service;
pub mod distribution_service;
pub mod goal_service;
pub mod link_service;
pub mod summary_service;
pub mod wallet_service;

pub use category_service::CategoryService;
pub use distribution_service::DistributionService;
pub use goal_service::{GoalService, NewGoal};
pub use link_service::LinkService;
pub use summary_service::{CategoryGroup, SummaryService, WishlistTotals};
pub use wallet_service::{TopUpReceipt, WalletService};

use crate::{errors::WishlistError, wishlist::GoalId};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Wishlist(#[from] WishlistError),
    #[error("Goal not found: {0}")]
    GoalNotFound(GoalId),
    #[error("{0}")]
    Invalid(String),
}
