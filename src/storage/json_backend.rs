use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::Result,
    wishlist::{default_categories, validate_goals, ExternalLink, Goal},
};

use super::StateStore;

const GOALS_FILE: &str = "goals.json";
const WALLET_FILE: &str = "wallet.txt";
const CATEGORIES_FILE: &str = "categories.json";
const LINKS_FILE: &str = "links.json";

/// File-per-record store: JSON documents plus the wallet as a decimal string.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Opens the store in `<base>/data`, where `base` defaults to the application home.
    pub fn new(base: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(base);
        Self::at(PathResolver::data_dir_in(&base))
    }

    /// Opens the store directly in `root`.
    pub fn at(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn record_path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.record_path(file);
        let data = read_record(&path)?;
        match serde_json::from_str(&data) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(path = %path.display(), "discarding malformed record: {err}");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        write_atomic(&self.record_path(file), &json)?;
        Ok(())
    }
}

impl StateStore for JsonStore {
    fn load_goals(&self) -> Vec<Goal> {
        let goals: Vec<Goal> = self.read_json(GOALS_FILE).unwrap_or_default();
        match validate_goals(&goals) {
            Ok(()) => goals,
            Err(reason) => {
                let path = self.record_path(GOALS_FILE);
                warn!(path = %path.display(), "discarding goal record: {reason}");
                Vec::new()
            }
        }
    }

    fn load_wallet(&self) -> u64 {
        let path = self.record_path(WALLET_FILE);
        let Some(data) = read_record(&path) else {
            return 0;
        };
        match data.trim().parse::<u64>() {
            Ok(balance) => balance,
            Err(err) => {
                warn!(path = %path.display(), "discarding malformed wallet balance: {err}");
                0
            }
        }
    }

    fn load_categories(&self) -> Vec<String> {
        self.read_json(CATEGORIES_FILE)
            .unwrap_or_else(default_categories)
    }

    fn load_links(&self) -> Vec<ExternalLink> {
        self.read_json(LINKS_FILE).unwrap_or_default()
    }

    fn save_goals(&self, goals: &[Goal]) -> Result<()> {
        self.write_json(GOALS_FILE, goals)
    }

    fn save_wallet(&self, balance: u64) -> Result<()> {
        write_atomic(&self.record_path(WALLET_FILE), &balance.to_string())?;
        Ok(())
    }

    fn save_categories(&self, categories: &[String]) -> Result<()> {
        self.write_json(CATEGORIES_FILE, categories)
    }

    fn save_links(&self, links: &[ExternalLink]) -> Result<()> {
        self.write_json(LINKS_FILE, links)
    }
}

/// Missing files are expected on first start; other read failures are logged.
fn read_record(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(data) => Some(data),
        Err(err) => {
            warn!(path = %path.display(), "unreadable record: {err}");
            None
        }
    }
}
