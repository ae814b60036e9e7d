mod common;

use common::goal;
use dreamfund::{
    core::services::{
        CategoryService, DistributionService, GoalService, LinkService, NewGoal, ServiceError,
        SummaryService, WalletService,
    },
    distribution::DistributionPolicy,
    wishlist::{Priority, Wishlist, OTHER_CATEGORY},
};

fn wishlist_with(goals: Vec<dreamfund::wishlist::Goal>, wallet: u64) -> Wishlist {
    Wishlist {
        goals,
        wallet_balance: wallet,
        ..Wishlist::default()
    }
}

#[test]
fn single_goal_pull_fills_the_goal_and_keeps_the_rest() {
    let mut wishlist = wishlist_with(vec![goal("Bike", 500, 200, Priority::High)], 1_000);
    let id = wishlist.goals[0].id.clone();

    let moved = GoalService::quick_allocate(&mut wishlist, &id).unwrap();
    assert_eq!(moved, 300);
    assert_eq!(wishlist.goals[0].saved, 500);
    assert_eq!(wishlist.wallet_balance, 700);

    assert_eq!(GoalService::quick_allocate(&mut wishlist, &id).unwrap(), 0);
    assert_eq!(wishlist.wallet_balance, 700);
}

#[test]
fn explicit_pull_moves_exactly_the_amount_and_conserves_money() {
    let mut wishlist = wishlist_with(vec![goal("Bike", 500, 200, Priority::High)], 1_000);
    let id = wishlist.goals[0].id.clone();

    GoalService::allocate_from_wallet(&mut wishlist, &id, 250).unwrap();
    assert_eq!(wishlist.goals[0].saved + wishlist.wallet_balance, 1_200);

    let err = GoalService::allocate_from_wallet(&mut wishlist, &id, 5_000).unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(_)));
    assert_eq!(wishlist.wallet_balance, 750);
}

#[test]
fn direct_top_up_is_not_wallet_backed() {
    let mut wishlist = wishlist_with(vec![goal("Camera", 4_000, 0, Priority::Medium)], 50);
    let id = wishlist.goals[0].id.clone();

    GoalService::set_saved(&mut wishlist, &id, 4_500).unwrap();
    assert_eq!(wishlist.goals[0].saved, 4_500);
    assert_eq!(GoalService::deposit(&mut wishlist, &id, 500).unwrap(), 5_000);
    assert_eq!(wishlist.wallet_balance, 50);
}

#[test]
fn adding_validates_and_defaults_the_category() {
    let mut wishlist = Wishlist::new();
    let id = GoalService::add(&mut wishlist, NewGoal::new("  Desk  ", 1_200_000)).unwrap();
    let created = wishlist.goal(&id).unwrap();
    assert_eq!(created.name, "Desk");
    assert_eq!(created.category, "Shopping");
    assert_eq!(created.saved, 0);
    assert_eq!(created.priority, Priority::Medium);

    assert!(GoalService::add(&mut wishlist, NewGoal::new(" ", 10)).is_err());
    assert!(GoalService::add(&mut wishlist, NewGoal::new("Free", 0)).is_err());

    wishlist.categories.clear();
    let id = GoalService::add(&mut wishlist, NewGoal::new("Lamp", 90)).unwrap();
    assert_eq!(wishlist.goal(&id).unwrap().category, "General");
}

#[test]
fn delete_drops_saved_funds_and_leaves_the_wallet() {
    let mut wishlist = wishlist_with(vec![goal("Bike", 500, 300, Priority::High)], 40);
    let id = wishlist.goals[0].id.clone();
    let removed = GoalService::remove(&mut wishlist, &id).unwrap();
    assert_eq!(removed.saved, 300);
    assert!(wishlist.goals.is_empty());
    assert_eq!(wishlist.wallet_balance, 40);
    assert!(matches!(
        GoalService::remove(&mut wishlist, &id),
        Err(ServiceError::GoalNotFound(_))
    ));
}

#[test]
fn goals_resolve_by_position_or_id_prefix() {
    let wishlist = wishlist_with(
        vec![
            goal("First", 100, 0, Priority::Low),
            goal("Second", 100, 0, Priority::Low),
        ],
        0,
    );
    let second = wishlist.goals[1].id.clone();
    assert_eq!(GoalService::resolve(&wishlist, "2").unwrap(), second);
    let prefix = &second.as_str()[..12];
    assert_eq!(GoalService::resolve(&wishlist, prefix).unwrap(), second);
    assert!(GoalService::resolve(&wishlist, "zzz").is_err());
}

#[test]
fn top_up_parses_free_form_amounts() {
    let mut wishlist = Wishlist::new();
    let receipt = WalletService::top_up(&mut wishlist, "12a3.000").unwrap();
    assert_eq!(receipt.amount, 123_000);
    assert_eq!(receipt.balance, 123_000);

    assert!(WalletService::top_up(&mut wishlist, "").is_none());
    assert!(WalletService::top_up(&mut wishlist, "0").is_none());
    assert!(WalletService::top_up(&mut wishlist, "abc").is_none());
    assert_eq!(wishlist.wallet_balance, 123_000);

    wishlist.wallet_balance = u64::MAX;
    assert!(WalletService::top_up(&mut wishlist, "1").is_none());
    assert_eq!(wishlist.wallet_balance, u64::MAX);
}

#[test]
fn distribution_service_commits_goals_and_residual_together() {
    let mut wishlist = wishlist_with(
        vec![
            goal("A", 300, 0, Priority::High),
            goal("B", 300, 0, Priority::Medium),
            goal("C", 300, 0, Priority::Low),
        ],
        600,
    );

    let preview = DistributionService::preview(&wishlist, DistributionPolicy::Weighted);
    assert_eq!(preview.allocated(), 600);
    assert_eq!(wishlist.wallet_balance, 600);

    let result = DistributionService::run(&mut wishlist, DistributionPolicy::Weighted);
    assert_eq!(result, preview);
    assert_eq!(wishlist.wallet_balance, 0);
    assert_eq!(wishlist.total_saved(), 600);
}

#[test]
fn categories_keep_their_order_and_reject_duplicates() {
    let mut wishlist = Wishlist::new();
    CategoryService::add(&mut wishlist, " Travel ").unwrap();
    assert!(CategoryService::add(&mut wishlist, "Travel").is_err());
    assert!(CategoryService::add(&mut wishlist, "   ").is_err());

    CategoryService::move_to(&mut wishlist, 3, 0).unwrap();
    assert_eq!(
        CategoryService::list(&wishlist),
        ["Travel", "Shopping", "Electronics", "Savings"]
    );
    assert!(CategoryService::move_to(&mut wishlist, 0, 9).is_err());

    CategoryService::remove(&mut wishlist, "Shopping").unwrap();
    assert!(CategoryService::remove(&mut wishlist, "Shopping").is_err());
}

#[test]
fn links_require_a_label_and_web_url() {
    let mut wishlist = Wishlist::new();
    LinkService::add(&mut wishlist, "Shop", "https://shop.example").unwrap();
    LinkService::add(&mut wishlist, "Deals", "http://deals.example").unwrap();
    assert!(LinkService::add(&mut wishlist, "", "https://x.example").is_err());
    assert!(LinkService::add(&mut wishlist, "Ftp", "ftp://files.example").is_err());

    let removed = LinkService::remove(&mut wishlist, "1").unwrap();
    assert_eq!(removed.label, "Shop");
    assert_eq!(LinkService::list(&wishlist).len(), 1);
    assert!(LinkService::remove(&mut wishlist, "5").is_err());
}

#[test]
fn summary_totals_and_groups() {
    let mut stray = goal("Ticket", 200, 200, Priority::Low);
    stray.category = "Travel".into();
    let mut gadget = goal("Phone", 800, 200, Priority::High);
    gadget.category = "Electronics".into();
    let wishlist = wishlist_with(vec![goal("Shoes", 1_000, 100, Priority::Medium), gadget, stray], 0);

    let totals = SummaryService::totals(&wishlist);
    assert_eq!(totals.total_target, 2_000);
    assert_eq!(totals.total_saved, 500);
    assert_eq!(totals.remaining_needed, 1_500);
    assert_eq!(totals.percentage, 25);
    assert_eq!(totals.active_goals, 2);
    assert!(!totals.all_done);

    let groups = SummaryService::grouped(&wishlist);
    let names: Vec<&str> = groups.iter().map(|group| group.category.as_str()).collect();
    assert_eq!(names, vec!["Shopping", "Electronics", OTHER_CATEGORY]);
    assert_eq!(groups[2].goals[0].name, "Ticket");
}

#[test]
fn summary_reports_all_done_only_with_goals() {
    let empty = SummaryService::totals(&Wishlist::new());
    assert!(!empty.all_done);
    assert_eq!(empty.percentage, 0);

    let done = wishlist_with(vec![goal("Bike", 500, 700, Priority::Low)], 0);
    let totals = SummaryService::totals(&done);
    assert!(totals.all_done);
    assert_eq!(totals.percentage, 100);
    assert_eq!(totals.remaining_needed, 0);
}
