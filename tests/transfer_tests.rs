mod common;

use std::fs;

use common::{goal, temp_home};
use dreamfund::{
    errors::WishlistError,
    transfer::{export_json, import_json, read_import, write_export, EXPORT_VERSION},
    wishlist::{Priority, Wishlist},
};
use serde_json::Value;

fn sample() -> Wishlist {
    let mut wishlist = Wishlist::new();
    wishlist.insert_goal(goal("Console", 6_000_000, 1_000_000, Priority::High));
    wishlist.wallet_balance = 90_000;
    wishlist
}

#[test]
fn export_carries_version_and_all_fields() {
    let json = export_json(&sample()).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], EXPORT_VERSION);
    assert_eq!(value["walletBalance"], 90_000);
    assert_eq!(value["goals"][0]["name"], "Console");
    assert!(value["categories"].is_array());
    assert!(value["externalLinks"].is_array());
    assert!(value["exportedAt"].is_string());
}

#[test]
fn partial_import_only_touches_present_fields() {
    let mut wishlist = sample();
    let report = import_json(&mut wishlist, r#"{ "walletBalance": 5 }"#).unwrap();
    assert_eq!(report.applied, vec!["walletBalance"]);
    assert!(report.skipped.is_empty());
    assert_eq!(wishlist.wallet_balance, 5);
    assert_eq!(wishlist.goals.len(), 1);
    assert_eq!(wishlist.categories, sample().categories);
}

#[test]
fn ill_typed_fields_are_skipped_not_fatal() {
    let mut wishlist = sample();
    let report = import_json(
        &mut wishlist,
        r#"{ "goals": "oops", "walletBalance": -3, "categories": ["Home"] }"#,
    )
    .unwrap();
    assert_eq!(report.applied, vec!["categories"]);
    assert_eq!(report.skipped, vec!["goals", "walletBalance"]);
    assert_eq!(wishlist.goals.len(), 1);
    assert_eq!(wishlist.wallet_balance, 90_000);
    assert_eq!(wishlist.categories, vec!["Home".to_string()]);
}

#[test]
fn inconsistent_goal_lists_are_skipped() {
    let mut wishlist = sample();
    let duplicate = r#"{
        "goals": [
            {"id": "g1", "name": "Bike", "target": 500},
            {"id": "g1", "name": "Desk", "target": 900}
        ],
        "walletBalance": 12
    }"#;
    let report = import_json(&mut wishlist, duplicate).unwrap();
    assert_eq!(report.applied, vec!["walletBalance"]);
    assert_eq!(report.skipped, vec!["goals"]);
    assert_eq!(wishlist.goals[0].name, "Console");

    for goals in [
        r#"[{"id": "g1", "name": "Free", "target": 0}]"#,
        r#"[{"id": "g1", "name": "   ", "target": 10}]"#,
    ] {
        let report = import_json(&mut wishlist, &format!(r#"{{ "goals": {goals} }}"#)).unwrap();
        assert_eq!(report.skipped, vec!["goals"]);
    }
    assert_eq!(wishlist.goals.len(), 1);
    assert_eq!(wishlist.wallet_balance, 12);
}

#[test]
fn original_export_shape_is_accepted() {
    let mut wishlist = Wishlist::new();
    let document = r#"{
        "goals": [{
            "id": "1712345678901",
            "name": "Sepatu",
            "price": 750000,
            "savedAmount": 250000,
            "category": "Fashion",
            "createdAt": 1712345678901,
            "priority": "Low"
        }],
        "walletBalance": 10000,
        "exportDate": "2024-04-05T10:00:00.000Z"
    }"#;
    let report = import_json(&mut wishlist, document).unwrap();
    assert_eq!(report.applied, vec!["goals", "walletBalance"]);
    assert_eq!(wishlist.goals[0].saved, 250_000);
    assert_eq!(wishlist.goals[0].priority, Priority::Low);
}

#[test]
fn non_objects_are_rejected() {
    let mut wishlist = sample();
    let before = wishlist.clone();
    assert!(matches!(
        import_json(&mut wishlist, "42"),
        Err(WishlistError::Import(_))
    ));
    assert!(matches!(
        import_json(&mut wishlist, "{ broken"),
        Err(WishlistError::Serde(_))
    ));
    assert_eq!(wishlist, before);
}

#[test]
fn file_round_trip_restores_the_wishlist() {
    let home = temp_home();
    let path = home.path().join("backup.json");
    let source = sample();
    write_export(&source, &path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("\"walletBalance\""));

    let mut target = Wishlist::new();
    let report = read_import(&mut target, &path).unwrap();
    assert_eq!(report.applied.len(), 4);
    assert_eq!(target, source);
}
