use std::{fmt, str::FromStr};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque goal identifier. Generated ids are UUIDs, imported ids may be any string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub String);

impl GoalId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GoalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Priority tier used as the weighting key by the weighted distribution policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn weight(self) -> u64 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            other => Err(format!(
                "unknown priority `{}` (expected low, medium or high)",
                other
            )),
        }
    }
}

/// A single wishlist item with a funding target and the amount saved so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    #[serde(alias = "price")]
    pub target: u64,
    #[serde(default, alias = "savedAmount")]
    pub saved: u64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(with = "chrono::serde::ts_milliseconds", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(
        name: impl Into<String>,
        target: u64,
        category: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: GoalId::generate(),
            name: name.into(),
            target,
            saved: 0,
            category: category.into(),
            priority,
            // Millisecond precision, matching the serialized form.
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn is_active(&self) -> bool {
        self.saved < self.target
    }

    pub fn is_complete(&self) -> bool {
        !self.is_active()
    }

    /// Amount still needed to reach the target; zero once complete.
    pub fn remaining(&self) -> u64 {
        self.target.saturating_sub(self.saved)
    }

    /// Rounded progress in percent. Only a complete goal reports 100.
    pub fn progress_percent(&self) -> u8 {
        if self.target == 0 || self.saved >= self.target {
            return 100;
        }
        let ratio = self.saved as f64 / self.target as f64;
        (ratio * 100.0).round().min(99.0) as u8
    }
}
