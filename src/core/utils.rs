use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".dreamfund";
const HOME_ENV: &str = "DREAMFUND_HOME";
const DATA_DIR: &str = "data";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const CONFIG_BACKUP_DIR: &str = "config_backups";

/// Resolves the on-disk layout below the application home directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns `$DREAMFUND_HOME`, defaulting to `~/.dreamfund`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    /// Directory holding the persisted wishlist records.
    pub fn data_dir_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }

    pub fn config_backup_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_BACKUP_DIR)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes through a sibling temp file and renames it over the target.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}

pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
