//! Search suggestions and history.
//!
//! Suggestions are a case-insensitive substring match over a fixed catalog
//! of phone model names. History keeps the most recent distinct queries,
//! newest first.

use crate::config::{DEFAULT_HISTORY_LIMIT, DEFAULT_SUGGESTION_LIMIT};

/// Built-in model catalog used until reference data is loaded.
pub const DEFAULT_MODEL_CATALOG: &[&str] = &[
    "iPhone 15 Pro Max",
    "iPhone 15 Pro",
    "iPhone 15 Plus",
    "iPhone 15",
    "iPhone 14 Pro Max",
    "iPhone 14 Pro",
    "iPhone 14",
    "iPhone 13 Pro Max",
    "iPhone 13",
    "iPhone 12",
    "iPhone 11",
    "iPhone SE",
    "Galaxy S24 Ultra",
    "Galaxy S24+",
    "Galaxy S24",
    "Galaxy S23 Ultra",
    "Galaxy S23",
    "Galaxy A54 5G",
    "Galaxy Z Fold 5",
    "Galaxy Z Flip 5",
    "Xiaomi 14 Ultra",
    "Xiaomi 13T Pro",
    "Redmi Note 13 Pro",
    "POCO X6 Pro",
    "OnePlus 12",
    "OnePlus Nord CE 3",
    "Oppo Reno 11 Pro",
    "Vivo V30 Pro",
    "Realme GT 5 Pro",
    "Infinix Note 40 Pro",
    "Tecno Camon 30 Pro",
];

/// Typeahead state for the search box.
#[derive(Debug, Clone)]
pub struct SearchSuggestions {
    catalog: Vec<String>,
    limit: usize,
    input: String,
    visible: Vec<String>,
    open: bool,
}

impl Default for SearchSuggestions {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_LIMIT)
    }
}

impl SearchSuggestions {
    pub fn new(limit: usize) -> Self {
        Self::with_catalog(
            DEFAULT_MODEL_CATALOG.iter().map(ToString::to_string).collect(),
            limit,
        )
    }

    pub fn with_catalog(catalog: Vec<String>, limit: usize) -> Self {
        Self {
            catalog,
            limit,
            input: String::new(),
            visible: Vec::new(),
            open: false,
        }
    }

    /// Swap the catalog, keeping the current input and recomputing matches.
    pub fn replace_catalog(&mut self, catalog: Vec<String>) {
        if catalog.is_empty() {
            return;
        }
        self.catalog = catalog;
        let input = std::mem::take(&mut self.input);
        self.on_input(&input);
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current matches; empty while the list is closed.
    pub fn visible(&self) -> &[String] {
        if self.open {
            self.visible.as_slice()
        } else {
            &[]
        }
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Handle a keystroke and return the matches to display.
    pub fn on_input(&mut self, input: &str) -> &[String] {
        self.input = input.to_string();
        self.visible = matching(&self.catalog, input, self.limit);
        self.open = !self.visible.is_empty();
        self.visible()
    }

    /// Pick a suggestion; the list closes and the picked text becomes the input.
    pub fn select(&mut self, suggestion: &str) -> String {
        self.input = suggestion.to_string();
        self.close();
        self.input.clone()
    }

    pub fn close(&mut self) {
        self.open = false;
        self.visible.clear();
    }
}

/// Catalog entries containing `input`, case-insensitively, in catalog order.
pub fn matching(catalog: &[String], input: &str, limit: usize) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

/// Recent searches, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
    capacity: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl SearchHistory {
    pub const fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Record a submitted query.
    ///
    /// Blank queries and queries already present are ignored. Returns
    /// whether the history changed.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.capacity == 0 {
            return false;
        }
        if self.entries.iter().any(|entry| entry == query) {
            return false;
        }
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.capacity);
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
