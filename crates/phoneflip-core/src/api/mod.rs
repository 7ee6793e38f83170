//! Backend API surface.
//!
//! [`MarketplaceApi`] is the seam between client state and the REST
//! backend. [`HttpMarketplaceApi`] is the reqwest implementation; tests
//! substitute a recording fake.

mod http;
mod types;

use thiserror::Error;

use crate::listings::ListingQuery;
use crate::models::{
    Analytics, BrandCatalog, Conversation, Listing, Message, NewMessage, NewReview,
    NewSavedSearch, ProfileUpdate, Review, SavedSearch, User, UserProfile,
};

pub use http::HttpMarketplaceApi;
pub use types::{
    LoginMethod, LoginRequest, RegisterForm, RegisterRequest, SocialLoginRequest,
    SocialUserInfo, TokenResponse,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },
}

impl ApiError {
    /// Human-readable `detail` the server attached to an error response.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Every backend route the client consumes.
///
/// Calls that need a signed-in user take the bearer token explicitly; the
/// implementation never caches it.
#[allow(async_fn_in_trait)]
pub trait MarketplaceApi {
    async fn cities(&self) -> ApiResult<Vec<String>>;
    async fn phone_brands(&self) -> ApiResult<BrandCatalog>;
    async fn storage_options(&self) -> ApiResult<Vec<String>>;
    async fn condition_options(&self) -> ApiResult<Vec<String>>;

    async fn login(&self, request: &LoginRequest) -> ApiResult<TokenResponse>;
    async fn register(&self, request: &RegisterRequest) -> ApiResult<TokenResponse>;
    async fn social_login(&self, request: &SocialLoginRequest) -> ApiResult<TokenResponse>;
    async fn current_user(&self, token: &str) -> ApiResult<User>;
    async fn user_profile(&self, user_id: &str) -> ApiResult<UserProfile>;
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<()>;

    /// `token` is optional; when present the backend marks favorited rows.
    async fn listings(&self, token: Option<&str>, query: &ListingQuery)
        -> ApiResult<Vec<Listing>>;

    async fn favorites(&self, token: &str) -> ApiResult<Vec<Listing>>;
    async fn add_favorite(&self, token: &str, listing_id: &str) -> ApiResult<()>;
    async fn remove_favorite(&self, token: &str, listing_id: &str) -> ApiResult<()>;

    async fn conversations(&self, token: &str) -> ApiResult<Vec<Conversation>>;
    async fn conversation_messages(
        &self,
        token: &str,
        conversation_id: &str,
    ) -> ApiResult<Vec<Message>>;
    async fn send_message(&self, token: &str, message: &NewMessage) -> ApiResult<()>;

    async fn saved_searches(&self, token: &str) -> ApiResult<Vec<SavedSearch>>;
    async fn create_saved_search(&self, token: &str, search: &NewSavedSearch) -> ApiResult<()>;

    async fn user_reviews(&self, user_id: &str) -> ApiResult<Vec<Review>>;
    async fn create_review(&self, token: &str, review: &NewReview) -> ApiResult<()>;

    async fn analytics(&self, token: &str) -> ApiResult<Analytics>;
}
