use crate::wishlist::{Goal, Wishlist, OTHER_CATEGORY};

/// Headline numbers for the wishlist as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishlistTotals {
    pub total_target: u64,
    pub total_saved: u64,
    /// Sum of what active goals still need.
    pub remaining_needed: u64,
    pub percentage: u8,
    pub active_goals: usize,
    /// At least one goal exists and all of them are complete.
    pub all_done: bool,
}

/// Goals sharing one category, in category order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: String,
    pub goals: Vec<&'a Goal>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn totals(wishlist: &Wishlist) -> WishlistTotals {
        let active_goals = wishlist.active_goals().count();
        let remaining_needed = wishlist
            .active_goals()
            .fold(0u64, |sum, goal| sum.saturating_add(goal.remaining()));
        let total_target = wishlist
            .goals
            .iter()
            .fold(0u64, |sum, goal| sum.saturating_add(goal.target));
        let total_saved = wishlist.total_saved();
        let all_done = !wishlist.goals.is_empty() && active_goals == 0;

        let percentage = if all_done {
            100
        } else if total_target == 0 {
            0
        } else {
            let ratio = total_saved as f64 / total_target as f64;
            (ratio * 100.0).round().min(100.0) as u8
        };

        WishlistTotals {
            total_target,
            total_saved,
            remaining_needed,
            percentage,
            active_goals,
            all_done,
        }
    }

    /// Groups goals by the category order. Empty categories are skipped; goals
    /// with an unknown category end up in a trailing `Other` group.
    pub fn grouped(wishlist: &Wishlist) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = wishlist
            .categories
            .iter()
            .map(|category| CategoryGroup {
                category: category.clone(),
                goals: wishlist
                    .goals
                    .iter()
                    .filter(|goal| &goal.category == category)
                    .collect(),
            })
            .filter(|group| !group.goals.is_empty())
            .collect();

        let others: Vec<&Goal> = wishlist
            .goals
            .iter()
            .filter(|goal| !wishlist.categories.contains(&goal.category))
            .collect();
        if !others.is_empty() {
            groups.push(CategoryGroup {
                category: OTHER_CATEGORY.to_string(),
                goals: others,
            });
        }
        groups
    }
}
