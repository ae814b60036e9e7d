use tracing::debug;

use super::Pool;

/// Equal shares per round. Goals completed mid-round drop out and the leftover
/// is re-spread over the remainder in the next round. Once a share falls below
/// one unit, the first active goal in set order takes what is left.
pub(super) fn distribute(pool: &mut Pool<'_>) {
    let mut active = pool.active_indices();

    while pool.remaining > 0 && !active.is_empty() {
        let share = pool.remaining / active.len() as u64;

        if share < 1 {
            let first = active[0];
            let need = pool.need(first);
            let moved = pool.give(first, need);
            if moved > 0 {
                pool.passes += 1;
            }
            debug!(goal = first, moved, "even split: remainder to first active goal");
            break;
        }

        let mut round_total = 0u64;
        let mut still_active = Vec::with_capacity(active.len());
        for &index in &active {
            round_total += pool.give(index, share);
            if pool.goals[index].is_active() {
                still_active.push(index);
            }
        }
        debug!(
            share,
            round_total,
            remaining = pool.remaining,
            "even split round"
        );

        if round_total == 0 {
            break;
        }
        pool.passes += 1;
        active = still_active;
    }
}
