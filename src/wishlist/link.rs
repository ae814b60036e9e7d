use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shortcut to an external page (a shop listing, a price tracker, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub id: String,
    pub label: String,
    pub url: String,
}

impl ExternalLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            url: url.into(),
        }
    }
}
