use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dreamfund::distribution::{distribute, DistributionPolicy};
use dreamfund::storage::{JsonStore, StateStore};
use dreamfund::wishlist::{Goal, Priority, Wishlist};
use tempfile::tempdir;

fn build_goals(count: usize) -> Vec<Goal> {
    (0..count)
        .map(|idx| {
            let priority = Priority::ALL[idx % Priority::ALL.len()];
            let target = 100_000 + (idx as u64 % 50) * 25_000;
            let mut goal = Goal::new(format!("Goal {idx}"), target, "Shopping", priority);
            if idx % 4 == 0 {
                goal.saved = target - 1_000;
            }
            goal
        })
        .collect()
}

fn bench_policies(c: &mut Criterion) {
    let goals = build_goals(black_box(1_000));
    let balance = goals.iter().map(Goal::remaining).sum::<u64>() / 2;

    c.bench_function("distribute_weighted_1k", |b| {
        b.iter(|| black_box(distribute(&goals, balance, DistributionPolicy::Weighted)))
    });

    c.bench_function("distribute_even_split_1k", |b| {
        b.iter(|| black_box(distribute(&goals, balance, DistributionPolicy::EvenSplit)))
    });

    // Enough money to finish every goal forces the longest cascade.
    let surplus = goals.iter().map(Goal::remaining).sum::<u64>() + 1;
    c.bench_function("distribute_weighted_fill_all_1k", |b| {
        b.iter(|| black_box(distribute(&goals, surplus, DistributionPolicy::Weighted)))
    });
}

fn bench_store_io(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(Some(dir.path().to_path_buf())).expect("json store");
    let wishlist = Wishlist {
        goals: build_goals(5_000),
        wallet_balance: 1_000_000,
        ..Wishlist::default()
    };

    c.bench_function("wishlist_save_5k", |b| {
        b.iter(|| store.save_wishlist(&wishlist).expect("save wishlist"))
    });

    store.save_wishlist(&wishlist).expect("seed");

    c.bench_function("wishlist_load_5k", |b| {
        b.iter_batched(
            || (),
            |_| black_box(store.load_wishlist()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_policies, bench_store_io);
criterion_main!(benches);
