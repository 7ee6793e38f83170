//! Client configuration.
//!
//! Provides `ClientConfig`, the single set of knobs shared by every
//! PhoneFlip client: where the backend lives and how lists are sized.

use serde::{Deserialize, Serialize};

use crate::util::{is_http_url, normalize_text_option};

/// Page size the backend uses when `limit` is omitted.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Maximum remembered searches.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
/// Maximum suggestions shown while typing.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";
const API_BASE_URL_ENV: &str = "PHONEFLIP_API_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Backend origin, with or without the `/api` prefix.
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Default config with the base URL taken from `PHONEFLIP_API_BASE_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = normalize_text_option(std::env::var(API_BASE_URL_ENV).ok()) {
            config.api_base_url = url;
        }
        config
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Fully qualified API root (always ends in `/api`, no trailing slash).
    pub fn api_root(&self) -> Result<String, String> {
        normalize_api_root(&self.api_base_url)
    }
}

/// Normalize a backend URL into the `/api` root every route hangs off.
pub fn normalize_api_root(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("API base URL must not be empty".to_string());
    }
    if !is_http_url(trimmed) {
        return Err("API base URL must include http:// or https://".to_string());
    }
    if trimmed.ends_with("/api") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/api"))
    }
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

const fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
