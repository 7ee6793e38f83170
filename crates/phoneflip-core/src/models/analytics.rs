//! Seller analytics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_listings: u64,
    pub active_listings: u64,
    pub total_views: u64,
    pub total_inquiries: u64,
    /// Inquiries per hundred views.
    pub conversion_rate: f64,
    #[serde(default)]
    pub top_performing_listings: Vec<TopListing>,
    #[serde(default)]
    pub monthly_stats: BTreeMap<String, MonthlyStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopListing {
    pub id: String,
    pub title: String,
    pub views: u64,
    pub inquiries: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub listings: u64,
    pub views: u64,
    pub inquiries: u64,
}
