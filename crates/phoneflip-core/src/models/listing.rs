//! Listing model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserType;
use crate::util::format_time_ago;

/// Physical condition of a phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub const ALL: [Self; 6] = [
        Self::New,
        Self::LikeNew,
        Self::Excellent,
        Self::Good,
        Self::Fair,
        Self::Poor,
    ];

    /// Label as the backend stores it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::LikeNew => "Like New",
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|condition| condition.as_str().to_lowercase() == normalized)
            .ok_or_else(|| format!("unknown condition: {s}"))
    }
}

/// Whether the seller accepts offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingType {
    #[default]
    Fixed,
    Negotiable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Sold,
    Expired,
    Draft,
    Suspended,
}

/// A single phone-for-sale record as returned by `GET /listings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub storage: String,
    /// Raw condition label; see [`Listing::condition_kind`].
    pub condition: String,
    /// Price in minor currency units.
    pub price: i64,
    #[serde(default)]
    pub pricing_type: PricingType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specifications: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub warranty_info: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub inquiries_count: u64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub seller_id: String,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_phone: String,
    #[serde(default)]
    pub seller_city: String,
    #[serde(default)]
    pub seller_type: UserType,
    #[serde(default)]
    pub seller_rating: f64,
    #[serde(default)]
    pub seller_profile_picture: Option<String>,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub is_favorited: bool,
    #[serde(default, with = "crate::models::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Display title, e.g. `Apple iPhone 15 Pro`.
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }

    pub fn negotiable(&self) -> bool {
        self.pricing_type == PricingType::Negotiable
    }

    /// City the listing is offered in (the seller's city).
    pub fn city(&self) -> &str {
        &self.seller_city
    }

    pub fn condition_kind(&self) -> Option<Condition> {
        self.condition.parse().ok()
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Relative posting time, e.g. `3d ago`.
    pub fn time_ago(&self, now: DateTime<Utc>) -> Option<String> {
        self.created_at.map(|created_at| format_time_ago(created_at, now))
    }
}
