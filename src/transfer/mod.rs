//! Portable export/import of the whole wishlist as one JSON document.
//!
//! Import is field-by-field: each of `goals`, `walletBalance`, `categories`
//! and `externalLinks` is applied only when present and well-typed, so a
//! partial or hand-edited document never clobbers the fields it lacks. A goal
//! list with duplicate ids, blank names or zero targets counts as ill-typed.

use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::{
    core::utils::write_atomic,
    errors::{Result, WishlistError},
    wishlist::{validate_goals, ExternalLink, Goal, Wishlist},
};

pub const EXPORT_VERSION: u32 = 1;

const FIELD_GOALS: &str = "goals";
const FIELD_WALLET: &str = "walletBalance";
const FIELD_CATEGORIES: &str = "categories";
const FIELD_LINKS: &str = "externalLinks";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub goals: Vec<Goal>,
    pub wallet_balance: u64,
    pub categories: Vec<String>,
    pub external_links: Vec<ExternalLink>,
}

impl ExportDocument {
    pub fn from_wishlist(wishlist: &Wishlist) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            goals: wishlist.goals.clone(),
            wallet_balance: wishlist.wallet_balance,
            categories: wishlist.categories.clone(),
            external_links: wishlist.external_links.clone(),
        }
    }
}

/// Which fields an import applied and which it left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub applied: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

impl ImportReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

pub fn export_json(wishlist: &Wishlist) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportDocument::from_wishlist(
        wishlist,
    ))?)
}

pub fn write_export(wishlist: &Wishlist, path: &Path) -> Result<()> {
    write_atomic(path, &export_json(wishlist)?)?;
    info!(path = %path.display(), goals = wishlist.goals.len(), "wishlist exported");
    Ok(())
}

/// Applies every present, well-typed field of `json` to the wishlist.
pub fn import_json(wishlist: &mut Wishlist, json: &str) -> Result<ImportReport> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(document) = value else {
        return Err(WishlistError::Import(
            "expected a JSON object at the top level".into(),
        ));
    };

    let mut report = ImportReport::default();
    let goals = take_checked(&document, FIELD_GOALS, &mut report, |goals: &Vec<Goal>| {
        validate_goals(goals)
    });
    if let Some(goals) = goals {
        wishlist.goals = goals;
    }
    if let Some(balance) = take_field::<u64>(&document, FIELD_WALLET, &mut report) {
        wishlist.wallet_balance = balance;
    }
    if let Some(categories) = take_field::<Vec<String>>(&document, FIELD_CATEGORIES, &mut report)
    {
        wishlist.categories = categories;
    }
    if let Some(links) = take_field::<Vec<ExternalLink>>(&document, FIELD_LINKS, &mut report) {
        wishlist.external_links = links;
    }

    info!(
        applied = ?report.applied,
        skipped = ?report.skipped,
        "wishlist imported"
    );
    Ok(report)
}

pub fn read_import(wishlist: &mut Wishlist, path: &Path) -> Result<ImportReport> {
    let data = fs::read_to_string(path)?;
    import_json(wishlist, &data)
}

fn take_field<T: DeserializeOwned>(
    document: &Map<String, Value>,
    field: &'static str,
    report: &mut ImportReport,
) -> Option<T> {
    take_checked(document, field, report, |_: &T| Ok(()))
}

/// Like [`take_field`], but a value that parses and fails `check` is skipped too.
fn take_checked<T, F>(
    document: &Map<String, Value>,
    field: &'static str,
    report: &mut ImportReport,
    check: F,
) -> Option<T>
where
    T: DeserializeOwned,
    F: Fn(&T) -> std::result::Result<(), String>,
{
    let value = document.get(field)?;
    let parsed = match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(field, "ignoring ill-typed import field: {err}");
            report.skipped.push(field);
            return None;
        }
    };
    if let Err(reason) = check(&parsed) {
        warn!(field, "ignoring invalid import field: {reason}");
        report.skipped.push(field);
        return None;
    }
    report.applied.push(field);
    Some(parsed)
}
