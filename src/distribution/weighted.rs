use tracing::debug;

use super::Pool;

/// Priority-weighted passes.
///
/// Each pass computes every active goal's share from the pool as it stood at
/// the start of the pass (`pool * weight / total_weight`, at least one unit),
/// then applies the shares in set order, capped by the goal's need and by what
/// is actually left in the pool. Goals completed in a pass drop out, so slack
/// cascades to the remaining goals by their own weights on the next pass.
pub(super) fn distribute(pool: &mut Pool<'_>) {
    loop {
        let active = pool.active_indices();
        if active.is_empty() || pool.remaining == 0 {
            break;
        }

        let total_weight: u64 = active
            .iter()
            .map(|&index| pool.goals[index].priority.weight())
            .sum();
        let opening = pool.remaining;

        let shares: Vec<(usize, u64)> = active
            .iter()
            .map(|&index| {
                let weight = pool.goals[index].priority.weight();
                (index, tentative_share(opening, weight, total_weight))
            })
            .collect();

        let mut pass_total = 0u64;
        for (index, share) in shares {
            pass_total += pool.give(index, share);
        }
        debug!(
            opening,
            total_weight,
            pass_total,
            remaining = pool.remaining,
            "weighted pass"
        );

        if pass_total == 0 {
            break;
        }
        pool.passes += 1;
    }
}

fn tentative_share(pool: u64, weight: u64, total_weight: u64) -> u64 {
    if total_weight == 0 {
        return 0;
    }
    let share = (u128::from(pool) * u128::from(weight) / u128::from(total_weight)) as u64;
    if share == 0 && pool > 0 {
        1
    } else {
        share
    }
}
