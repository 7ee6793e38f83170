//! Listing filter state.
//!
//! `Filters` is the active query criteria. It is only changed through
//! [`FilterUpdate`] so every change can be observed by the listing feed,
//! which must restart pagination whenever the criteria move.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Condition;
use crate::util::normalize_text_option;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Recent,
    PriceLow,
    PriceHigh,
    Popular,
}

impl SortBy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
            Self::Popular => "popular",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "recent" => Ok(Self::Recent),
            "price_low" => Ok(Self::PriceLow),
            "price_high" => Ok(Self::PriceHigh),
            "popular" => Ok(Self::Popular),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Active listing criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub brand: Option<String>,
    pub city: Option<String>,
    pub condition: Option<Condition>,
    pub search: String,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort_by: SortBy,
}

/// A single user-driven change to [`Filters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Brand(Option<String>),
    City(Option<String>),
    Condition(Option<Condition>),
    Search(String),
    MinPrice(Option<i64>),
    MaxPrice(Option<i64>),
    SortBy(SortBy),
    /// Merge a saved snapshot over the current criteria.
    Merge(FilterSnapshot),
    Clear,
}

impl Filters {
    /// Apply `update`, returning whether anything changed.
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        let before = self.clone();
        match update {
            FilterUpdate::Brand(brand) => self.brand = normalize_text_option(brand),
            FilterUpdate::City(city) => self.city = normalize_text_option(city),
            FilterUpdate::Condition(condition) => self.condition = condition,
            FilterUpdate::Search(search) => self.search = search.trim().to_string(),
            FilterUpdate::MinPrice(price) => self.min_price = price,
            FilterUpdate::MaxPrice(price) => self.max_price = price,
            FilterUpdate::SortBy(sort_by) => self.sort_by = sort_by,
            FilterUpdate::Merge(snapshot) => self.merge(snapshot),
            FilterUpdate::Clear => *self = Self::default(),
        }
        *self != before
    }

    /// Overwrite every field the snapshot carries; absent fields are kept.
    pub fn merge(&mut self, snapshot: FilterSnapshot) {
        if let Some(brand) = snapshot.brand {
            self.brand = normalize_text_option(Some(brand));
        }
        if let Some(city) = snapshot.city {
            self.city = normalize_text_option(Some(city));
        }
        if let Some(condition) = snapshot.condition {
            self.condition = condition.parse().ok();
        }
        if let Some(search) = snapshot.search {
            self.search = search.trim().to_string();
        }
        if snapshot.min_price.is_some() {
            self.min_price = snapshot.min_price;
        }
        if snapshot.max_price.is_some() {
            self.max_price = snapshot.max_price;
        }
        if let Some(sort_by) = snapshot.sort_by {
            self.sort_by = sort_by;
        }
    }

    /// Serializable copy of the non-empty criteria.
    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            brand: self.brand.clone(),
            city: self.city.clone(),
            condition: self.condition.map(|condition| condition.as_str().to_string()),
            search: normalize_text_option(Some(self.search.clone())),
            min_price: self.min_price,
            max_price: self.max_price,
            sort_by: Some(self.sort_by),
        }
    }
}

/// Wire form of [`Filters`] stored inside a saved search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
}
