//! Seller review models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_profile_picture: Option<String>,
    pub rating: u8,
    pub comment: String,
    #[serde(with = "crate::models::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub reviewed_user_id: String,
    pub listing_id: String,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<()> {
        if self.reviewed_user_id.trim().is_empty() || self.listing_id.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Review needs a seller and a listing".to_string(),
            ));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(Error::InvalidInput(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }
}

/// Mean rating, or `None` for an empty list.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    Some(f64::from(total) / f64::from(u32::try_from(reviews.len()).unwrap_or(u32::MAX)))
}
