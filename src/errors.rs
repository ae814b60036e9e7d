use thiserror::Error;

/// Error type that captures common wishlist failures.
#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Import failed: {0}")]
    Import(String),
}

pub type Result<T> = std::result::Result<T, WishlistError>;
