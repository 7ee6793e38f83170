//! User model

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::normalize_text_option;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Individual,
    Shop,
    Admin,
}

/// The signed-in account, as returned by `/auth/me` and the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub total_sales: u32,
    #[serde(default)]
    pub is_verified: bool,
}

impl User {
    /// Shop name for shop accounts, personal name otherwise.
    pub fn display_name(&self) -> &str {
        match (self.user_type, self.shop_name.as_deref()) {
            (UserType::Shop, Some(shop)) if !shop.trim().is_empty() => shop,
            _ => &self.name,
        }
    }
}

/// Public seller profile from `GET /users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub total_sales: u32,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub verification_badges: Vec<String>,
    #[serde(default)]
    pub shop_name: Option<String>,
}

/// Body of `PUT /users/profile`. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
}

impl ProfileUpdate {
    /// Trim every field and drop the blank ones.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: normalize_text_option(self.name),
            phone: normalize_text_option(self.phone),
            city: normalize_text_option(self.city),
            address: normalize_text_option(self.address),
            shop_name: normalize_text_option(self.shop_name),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.city.is_none()
            && self.address.is_none()
            && self.shop_name.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidInput(
                "Nothing to update; change at least one field".to_string(),
            ));
        }
        Ok(())
    }
}
