use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    distribution::DistributionPolicy,
    errors::{Result, WishlistError},
};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const BACKUP_PREFIX: &str = "config_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub grouping_separator: char,
    /// Language the advice collaborator is asked to answer in.
    pub language: String,
    pub distribution_policy: DistributionPolicy,
    pub monthly_contribution: u64,
    pub advice_model: String,
    pub advice_endpoint: String,
    /// Name of the environment variable holding the advice API key.
    pub advice_api_key_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "Rp".into(),
            grouping_separator: '.',
            language: "Indonesian".into(),
            distribution_policy: DistributionPolicy::Weighted,
            monthly_contribution: 0,
            advice_model: "gemini-2.0-flash".into(),
            advice_endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            advice_api_key_env: "GEMINI_API_KEY".into(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 8] = [
        "currency_symbol",
        "grouping_separator",
        "language",
        "distribution_policy",
        "monthly_contribution",
        "advice_model",
        "advice_endpoint",
        "advice_api_key_env",
    ];

    /// Textual form of a field, as accepted by [`Config::set`].
    pub fn value(&self, key: &str) -> Option<String> {
        let value = match key.to_ascii_lowercase().as_str() {
            "currency_symbol" => self.currency_symbol.clone(),
            "grouping_separator" => self.grouping_separator.to_string(),
            "language" => self.language.clone(),
            "distribution_policy" => self.distribution_policy.to_string(),
            "monthly_contribution" => self.monthly_contribution.to_string(),
            "advice_model" => self.advice_model.clone(),
            "advice_endpoint" => self.advice_endpoint.clone(),
            "advice_api_key_env" => self.advice_api_key_env.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Updates a single field from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key.to_ascii_lowercase().as_str() {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "grouping_separator" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if !ch.is_ascii_digit() => self.grouping_separator = ch,
                    _ => {
                        return Err(WishlistError::Config(
                            "grouping_separator must be a single non-digit character".into(),
                        ))
                    }
                }
            }
            "language" => {
                if value.is_empty() {
                    return Err(WishlistError::Config("language cannot be empty".into()));
                }
                self.language = value.to_string();
            }
            "distribution_policy" => {
                self.distribution_policy = value.parse().map_err(WishlistError::Config)?;
            }
            "monthly_contribution" => {
                self.monthly_contribution = value.parse().map_err(|_| {
                    WishlistError::Config("monthly_contribution must be a whole number".into())
                })?;
            }
            "advice_model" => self.advice_model = value.to_string(),
            "advice_endpoint" => self.advice_endpoint = value.trim_end_matches('/').to_string(),
            "advice_api_key_env" => self.advice_api_key_env = value.to_string(),
            other => {
                return Err(WishlistError::Config(format!(
                    "unknown config key `{}`",
                    other
                )))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        let backups_dir = PathResolver::config_backup_dir_in(&base);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            backups_dir,
        })
    }

    /// Loads the active configuration. A missing or unreadable file yields the defaults.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&data) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!(path = %self.path.display(), "malformed config, using defaults: {err}");
                Ok(Config::default())
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String> {
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut name = format!("{BACKUP_PREFIX}{timestamp}");
        if let Some(label) = sanitize_note(note) {
            name.push('_');
            name.push_str(&label);
        }
        name.push_str(&format!(".{}", BACKUP_EXTENSION));
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.backups_dir.join(&name), &json)?;
        Ok(name)
    }

    pub fn restore(&self, backup_name: &str) -> Result<Config> {
        let path = self.backups_dir.join(backup_name);
        if !path.exists() {
            return Err(WishlistError::Config(format!(
                "configuration backup `{}` not found",
                backup_name
            )));
        }
        let data = fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&data)?;
        self.save(&config)?;
        Ok(config)
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| parse_timestamp(b).cmp(&parse_timestamp(a)).then(b.cmp(a)));
        Ok(entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extracts the timestamp from `config_<date>_<time>[_note].json`.
fn parse_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let mut segments = stem.split('_');
    let date = segments.next()?;
    let time = segments.next()?;
    let raw = format!("{date}{time}");
    chrono::NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (ConfigManager, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        (manager, temp)
    }

    #[test]
    fn missing_file_loads_defaults() {
        let (manager, _guard) = manager();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (manager, _guard) = manager();
        let mut config = Config::default();
        config.set("monthly_contribution", "1500000").unwrap();
        config.set("distribution_policy", "even").unwrap();
        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.monthly_contribution, 1_500_000);
        assert_eq!(loaded.distribution_policy, DistributionPolicy::EvenSplit);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let (manager, _guard) = manager();
        fs::write(manager.path(), "{ not json").unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let (manager, _guard) = manager();
        fs::write(manager.path(), r#"{ "language": "English" }"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.language, "English");
        assert_eq!(loaded.currency_symbol, "Rp");
    }

    #[test]
    fn retired_locale_field_is_ignored() {
        let (manager, _guard) = manager();
        fs::write(manager.path(), r#"{ "locale": "id-ID", "currency_symbol": "IDR" }"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency_symbol, "IDR");
        assert!(!Config::KEYS.contains(&"locale"));
        let mut config = Config::default();
        assert!(config.set("locale", "en-US").is_err());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(config.set("theme", "dark").is_err());
        assert!(config.set("monthly_contribution", "lots").is_err());
        assert!(config.set("grouping_separator", "ab").is_err());
        assert!(config.set("grouping_separator", "5").is_err());
        config.set("grouping_separator", ",").unwrap();
        assert_eq!(config.grouping_separator, ',');
    }

    #[test]
    fn every_key_reads_back_what_was_set() {
        let mut config = Config::default();
        for key in Config::KEYS {
            let current = config.value(key).expect("known key");
            config.set(key, &current).unwrap();
        }
        assert_eq!(config, Config::default());
        assert_eq!(config.value("distribution_policy").as_deref(), Some("weighted"));
        assert!(config.value("theme").is_none());
    }

    #[test]
    fn backup_and_restore() {
        let (manager, _guard) = manager();
        let mut config = Config::default();
        config.language = "English".into();
        let name = manager.backup(&config, Some("Before trip")).unwrap();
        assert!(name.ends_with("_before-trip.json"));
        assert_eq!(manager.list_backups().unwrap(), vec![name.clone()]);

        manager.save(&Config::default()).unwrap();
        let restored = manager.restore(&name).unwrap();
        assert_eq!(restored.language, "English");
        assert_eq!(manager.load().unwrap().language, "English");
        assert!(manager.restore("config_missing.json").is_err());
    }

    #[test]
    fn parses_backup_timestamps() {
        let parsed = parse_timestamp("config_20260101_120000_note.json").expect("timestamp");
        assert_eq!(parsed.to_rfc3339(), "2026-01-01T12:00:00+00:00");
        assert!(parse_timestamp("other.json").is_none());
    }
}
