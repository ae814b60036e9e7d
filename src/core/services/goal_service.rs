use tracing::info;

use crate::wishlist::{Goal, GoalId, Priority, Wishlist};

use super::{ServiceError, ServiceResult};

/// User input for a new goal. An empty category picks the first one in the order.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target: u64,
    pub category: Option<String>,
    pub priority: Priority,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target: u64) -> Self {
        Self {
            name: name.into(),
            target,
            category: None,
            priority: Priority::default(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

pub struct GoalService;

impl GoalService {
    pub fn add(wishlist: &mut Wishlist, input: NewGoal) -> ServiceResult<GoalId> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("Goal name cannot be empty".into()));
        }
        if input.target == 0 {
            return Err(ServiceError::Invalid(
                "Goal target must be a positive amount".into(),
            ));
        }
        let category = input
            .category
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| wishlist.default_category());
        let goal = Goal::new(name, input.target, category, input.priority);
        let id = wishlist.insert_goal(goal);
        info!(goal = %id, target = input.target, "goal added");
        Ok(id)
    }

    /// Sets `saved` to an absolute amount. Not wallet-backed and not capped at the target.
    pub fn set_saved(wishlist: &mut Wishlist, id: &GoalId, amount: u64) -> ServiceResult<()> {
        let goal = Self::goal_mut(wishlist, id)?;
        goal.saved = amount;
        info!(goal = %id, saved = amount, "goal saved amount set");
        Ok(())
    }

    /// Adds money saved outside the wallet on top of the current amount.
    pub fn deposit(wishlist: &mut Wishlist, id: &GoalId, delta: u64) -> ServiceResult<u64> {
        let current = Self::goal_mut(wishlist, id)?.saved;
        let updated = current.saturating_add(delta);
        Self::set_saved(wishlist, id, updated)?;
        Ok(updated)
    }

    /// Moves exactly `amount` from the wallet into the goal.
    pub fn allocate_from_wallet(
        wishlist: &mut Wishlist,
        id: &GoalId,
        amount: u64,
    ) -> ServiceResult<()> {
        if amount > wishlist.wallet_balance {
            return Err(ServiceError::Invalid(format!(
                "Wallet holds {} but {} was requested",
                wishlist.wallet_balance, amount
            )));
        }
        let goal = Self::goal_mut(wishlist, id)?;
        goal.saved = goal.saved.saturating_add(amount);
        wishlist.wallet_balance -= amount;
        info!(goal = %id, amount, wallet = wishlist.wallet_balance, "wallet pull");
        Ok(())
    }

    /// Pulls `min(wallet, remaining need)` into the goal and returns the amount moved.
    pub fn quick_allocate(wishlist: &mut Wishlist, id: &GoalId) -> ServiceResult<u64> {
        let need = wishlist
            .goal(id)
            .map(Goal::remaining)
            .ok_or_else(|| ServiceError::GoalNotFound(id.clone()))?;
        let amount = need.min(wishlist.wallet_balance);
        if amount > 0 {
            Self::allocate_from_wallet(wishlist, id, amount)?;
        }
        Ok(amount)
    }

    /// Removes the goal. Funds already saved into it are not returned to the wallet.
    pub fn remove(wishlist: &mut Wishlist, id: &GoalId) -> ServiceResult<Goal> {
        let index = wishlist
            .goals
            .iter()
            .position(|goal| &goal.id == id)
            .ok_or_else(|| ServiceError::GoalNotFound(id.clone()))?;
        let removed = wishlist.goals.remove(index);
        info!(goal = %id, "goal deleted");
        Ok(removed)
    }

    /// Resolves a 1-based list position or an id prefix to a goal id.
    pub fn resolve(wishlist: &Wishlist, token: &str) -> ServiceResult<GoalId> {
        let token = token.trim();
        if let Ok(position) = token.parse::<usize>() {
            if let Some(goal) = position.checked_sub(1).and_then(|idx| wishlist.goals.get(idx)) {
                return Ok(goal.id.clone());
            }
        }
        if token.is_empty() {
            return Err(ServiceError::Invalid("Goal reference cannot be empty".into()));
        }
        let mut matches = wishlist
            .goals
            .iter()
            .filter(|goal| goal.id.as_str().starts_with(token));
        match (matches.next(), matches.next()) {
            (Some(goal), None) => Ok(goal.id.clone()),
            (Some(_), Some(_)) => Err(ServiceError::Invalid(format!(
                "Goal reference `{}` is ambiguous",
                token
            ))),
            (None, _) => Err(ServiceError::GoalNotFound(GoalId::from(token))),
        }
    }

    fn goal_mut<'a>(wishlist: &'a mut Wishlist, id: &GoalId) -> ServiceResult<&'a mut Goal> {
        wishlist
            .goal_mut(id)
            .ok_or_else(|| ServiceError::GoalNotFound(id.clone()))
    }
}
