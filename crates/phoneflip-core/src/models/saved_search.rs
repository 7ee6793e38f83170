//! Saved search models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filters::FilterSnapshot;

/// A named, persisted snapshot of the listing filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub search_query: FilterSnapshot,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, with = "crate::models::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /saved-searches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSavedSearch {
    pub name: String,
    pub search_query: FilterSnapshot,
}

const fn default_active() -> bool {
    true
}
