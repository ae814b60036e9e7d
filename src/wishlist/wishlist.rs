use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;

use super::{goal::Goal, goal::GoalId, link::ExternalLink};

/// Categories offered to a fresh wishlist.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Shopping", "Electronics", "Savings"];
/// Category assigned when the category order is empty.
pub const FALLBACK_CATEGORY: &str = "General";
/// Display bucket for goals whose category is not in the category order.
pub const OTHER_CATEGORY: &str = "Other";

/// Explicit application state: the goal set, the wallet and the display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub wallet_balance: u64,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub external_links: Vec<ExternalLink>,
}

impl Default for Wishlist {
    fn default() -> Self {
        Self {
            goals: Vec::new(),
            wallet_balance: 0,
            categories: default_categories(),
            external_links: Vec::new(),
        }
    }
}

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect()
}

/// Checks a goal set loaded from outside: ids present and unique, names
/// non-empty, targets positive.
pub fn validate_goals(goals: &[Goal]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(goals.len());
    for goal in goals {
        if goal.id.as_str().trim().is_empty() {
            return Err(format!("goal `{}` has an empty id", goal.name));
        }
        if !seen.insert(goal.id.as_str()) {
            return Err(format!("duplicate goal id `{}`", goal.id));
        }
        if goal.name.trim().is_empty() {
            return Err(format!("goal `{}` has an empty name", goal.id));
        }
        if goal.target == 0 {
            return Err(format!("goal `{}` has a zero target", goal.name));
        }
    }
    Ok(())
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts at the front of the set; the newest goal is listed first.
    pub fn insert_goal(&mut self, goal: Goal) -> GoalId {
        let id = goal.id.clone();
        self.goals.insert(0, goal);
        id
    }

    pub fn goal(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|goal| &goal.id == id)
    }

    pub fn goal_mut(&mut self, id: &GoalId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| &goal.id == id)
    }

    pub fn active_goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(|goal| goal.is_active())
    }

    pub fn total_saved(&self) -> u64 {
        self.goals
            .iter()
            .fold(0u64, |sum, goal| sum.saturating_add(goal.saved))
    }

    pub fn default_category(&self) -> String {
        self.categories
            .first()
            .cloned()
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string())
    }

    /// Commits an engine result: goals and residual replace the current values together.
    pub fn apply_distribution(&mut self, distribution: Distribution) {
        self.goals = distribution.goals;
        self.wallet_balance = distribution.residual;
    }
}
