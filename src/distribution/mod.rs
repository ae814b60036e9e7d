//! Wallet distribution engine.
//!
//! The engine is a pure function of `(goals, balance, policy)`: it works on a
//! copy of the goal set and reports the new goals together with the residual
//! balance, leaving the caller to commit both at once. Every run conserves
//! money (`allocated == balance - residual`) and never pushes a goal past its
//! target.

mod even_split;
mod weighted;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::wishlist::{Goal, GoalId};

/// Strategy used to spread the wallet across active goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionPolicy {
    /// Legacy equal shares; leftover units below one share go to the first active goal.
    EvenSplit,
    /// Shares proportional to priority weight, cascading slack across passes.
    #[default]
    Weighted,
}

impl DistributionPolicy {
    pub fn label(self) -> &'static str {
        match self {
            DistributionPolicy::EvenSplit => "even-split",
            DistributionPolicy::Weighted => "weighted",
        }
    }
}

impl fmt::Display for DistributionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DistributionPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "even" | "even-split" | "even_split" | "evensplit" => Ok(DistributionPolicy::EvenSplit),
            "weighted" | "priority" => Ok(DistributionPolicy::Weighted),
            other => Err(format!(
                "unknown distribution policy `{}` (expected even or weighted)",
                other
            )),
        }
    }
}

/// Funds moved into one goal during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub goal_id: GoalId,
    pub amount: u64,
}

/// Result of a distribution run. Nothing is applied until the caller commits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub policy: DistributionPolicy,
    pub goals: Vec<Goal>,
    pub balance_before: u64,
    pub residual: u64,
    /// Passes that moved money.
    pub passes: usize,
    /// Per-goal totals in set order; goals that received nothing are omitted.
    pub allocations: Vec<Allocation>,
}

impl Distribution {
    pub fn allocated(&self) -> u64 {
        self.balance_before - self.residual
    }

    pub fn is_noop(&self) -> bool {
        self.allocations.is_empty()
    }
}

pub struct DistributionEngine;

impl DistributionEngine {
    pub fn run(goals: &[Goal], balance: u64, policy: DistributionPolicy) -> Distribution {
        let mut working = goals.to_vec();
        let mut pool = Pool::new(&mut working, balance);
        match policy {
            DistributionPolicy::EvenSplit => even_split::distribute(&mut pool),
            DistributionPolicy::Weighted => weighted::distribute(&mut pool),
        }
        let residual = pool.remaining;
        let passes = pool.passes;
        let moved = pool.moved;

        let allocations = working
            .iter()
            .zip(moved)
            .filter(|(_, amount)| *amount > 0)
            .map(|(goal, amount)| Allocation {
                goal_id: goal.id.clone(),
                amount,
            })
            .collect();

        debug!(
            policy = %policy,
            balance,
            residual,
            passes,
            "distribution finished"
        );

        Distribution {
            policy,
            goals: working,
            balance_before: balance,
            residual,
            passes,
            allocations,
        }
    }
}

/// Convenience wrapper over [`DistributionEngine::run`].
pub fn distribute(goals: &[Goal], balance: u64, policy: DistributionPolicy) -> Distribution {
    DistributionEngine::run(goals, balance, policy)
}

/// Working state shared by both policies.
struct Pool<'a> {
    goals: &'a mut [Goal],
    remaining: u64,
    moved: Vec<u64>,
    passes: usize,
}

impl<'a> Pool<'a> {
    fn new(goals: &'a mut [Goal], balance: u64) -> Self {
        let moved = vec![0; goals.len()];
        Self {
            goals,
            remaining: balance,
            moved,
            passes: 0,
        }
    }

    fn active_indices(&self) -> Vec<usize> {
        self.goals
            .iter()
            .enumerate()
            .filter(|(_, goal)| goal.is_active())
            .map(|(index, _)| index)
            .collect()
    }

    fn need(&self, index: usize) -> u64 {
        self.goals[index].remaining()
    }

    /// Moves up to `amount` from the pool into the goal, bounded by the pool and the goal's need.
    fn give(&mut self, index: usize, amount: u64) -> u64 {
        let amount = amount.min(self.remaining).min(self.need(index));
        if amount == 0 {
            return 0;
        }
        self.goals[index].saved += amount;
        self.moved[index] += amount;
        self.remaining -= amount;
        amount
    }
}
