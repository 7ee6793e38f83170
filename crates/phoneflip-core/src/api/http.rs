//! reqwest implementation of [`MarketplaceApi`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{
    ApiError, ApiResult, LoginRequest, MarketplaceApi, RegisterRequest, SocialLoginRequest,
    TokenResponse,
};
use crate::config::ClientConfig;
use crate::listings::ListingQuery;
use crate::models::{
    Analytics, BrandCatalog, Conversation, Listing, Message, NewMessage, NewReview,
    NewSavedSearch, ProfileUpdate, Review, SavedSearch, User, UserProfile,
};
use crate::util::compact_text;

/// HTTP client for the PhoneFlip REST backend.
#[derive(Debug, Clone)]
pub struct HttpMarketplaceApi {
    api_root: String,
    client: Client,
}

impl HttpMarketplaceApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let api_root = config.api_root().map_err(ApiError::InvalidConfiguration)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { api_root, client })
    }

    /// Root every route is resolved against, e.g. `https://host/api`.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.api_root, route)
    }

    fn get(&self, route: &str, token: Option<&str>) -> RequestBuilder {
        let request = self
            .client
            .get(self.url(route))
            .header(reqwest::header::ACCEPT, "application/json");
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("API request failed with HTTP {}", status.as_u16());
            return Err(parse_api_error(status, &body));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn execute(request: RequestBuilder) -> ApiResult<()> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("API request failed with HTTP {}", status.as_u16());
            return Err(parse_api_error(status, &body));
        }
        Ok(())
    }
}

impl MarketplaceApi for HttpMarketplaceApi {
    async fn cities(&self) -> ApiResult<Vec<String>> {
        let payload: CitiesResponse = Self::fetch(self.get("/cities", None)).await?;
        Ok(payload.cities)
    }

    async fn phone_brands(&self) -> ApiResult<BrandCatalog> {
        let payload: BrandsResponse = Self::fetch(self.get("/phone-brands", None)).await?;
        Ok(payload.brands)
    }

    async fn storage_options(&self) -> ApiResult<Vec<String>> {
        let payload: StorageOptionsResponse =
            Self::fetch(self.get("/storage-options", None)).await?;
        Ok(payload.storage_options)
    }

    async fn condition_options(&self) -> ApiResult<Vec<String>> {
        let payload: ConditionOptionsResponse =
            Self::fetch(self.get("/condition-options", None)).await?;
        Ok(payload.condition_options)
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<TokenResponse> {
        Self::fetch(self.client.post(self.url("/auth/login")).json(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<TokenResponse> {
        Self::fetch(self.client.post(self.url("/auth/register")).json(request)).await
    }

    async fn social_login(&self, request: &SocialLoginRequest) -> ApiResult<TokenResponse> {
        Self::fetch(self.client.post(self.url("/auth/social-login")).json(request)).await
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        Self::fetch(self.get("/auth/me", Some(token))).await
    }

    async fn user_profile(&self, user_id: &str) -> ApiResult<UserProfile> {
        let route = format!("/users/{}", urlencoding::encode(user_id));
        Self::fetch(self.get(&route, None)).await
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<()> {
        Self::execute(
            self.client
                .put(self.url("/users/profile"))
                .bearer_auth(token)
                .json(update),
        )
        .await
    }

    async fn listings(
        &self,
        token: Option<&str>,
        query: &ListingQuery,
    ) -> ApiResult<Vec<Listing>> {
        let pairs = query.to_pairs();
        tracing::debug!(page = query.page, "Fetching listings");
        Self::fetch(self.get("/listings", token).query(&pairs)).await
    }

    async fn favorites(&self, token: &str) -> ApiResult<Vec<Listing>> {
        Self::fetch(self.get("/favorites", Some(token))).await
    }

    async fn add_favorite(&self, token: &str, listing_id: &str) -> ApiResult<()> {
        let route = format!("/favorites/{}", urlencoding::encode(listing_id));
        Self::execute(self.client.post(self.url(&route)).bearer_auth(token)).await
    }

    async fn remove_favorite(&self, token: &str, listing_id: &str) -> ApiResult<()> {
        let route = format!("/favorites/{}", urlencoding::encode(listing_id));
        Self::execute(self.client.delete(self.url(&route)).bearer_auth(token)).await
    }

    async fn conversations(&self, token: &str) -> ApiResult<Vec<Conversation>> {
        Self::fetch(self.get("/conversations", Some(token))).await
    }

    async fn conversation_messages(
        &self,
        token: &str,
        conversation_id: &str,
    ) -> ApiResult<Vec<Message>> {
        let route = format!(
            "/conversations/{}/messages",
            urlencoding::encode(conversation_id)
        );
        Self::fetch(self.get(&route, Some(token))).await
    }

    async fn send_message(&self, token: &str, message: &NewMessage) -> ApiResult<()> {
        Self::execute(
            self.client
                .post(self.url("/messages"))
                .bearer_auth(token)
                .json(message),
        )
        .await
    }

    async fn saved_searches(&self, token: &str) -> ApiResult<Vec<SavedSearch>> {
        Self::fetch(self.get("/saved-searches", Some(token))).await
    }

    async fn create_saved_search(&self, token: &str, search: &NewSavedSearch) -> ApiResult<()> {
        Self::execute(
            self.client
                .post(self.url("/saved-searches"))
                .bearer_auth(token)
                .json(search),
        )
        .await
    }

    async fn user_reviews(&self, user_id: &str) -> ApiResult<Vec<Review>> {
        let route = format!("/users/{}/reviews", urlencoding::encode(user_id));
        Self::fetch(self.get(&route, None)).await
    }

    async fn create_review(&self, token: &str, review: &NewReview) -> ApiResult<()> {
        Self::execute(
            self.client
                .post(self.url("/reviews"))
                .bearer_auth(token)
                .json(review),
        )
        .await
    }

    async fn analytics(&self, token: &str) -> ApiResult<Analytics> {
        Self::fetch(self.get("/analytics", Some(token))).await
    }
}

#[derive(Debug, Deserialize)]
struct CitiesResponse {
    cities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BrandsResponse {
    brands: BrandCatalog,
}

#[derive(Debug, Deserialize)]
struct StorageOptionsResponse {
    storage_options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ConditionOptionsResponse {
    condition_options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
}

#[derive(Debug, Deserialize)]
struct ValidationIssue {
    msg: String,
}

fn parse_api_error(status: StatusCode, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|payload| payload.detail)
        .map(|detail| match detail {
            ErrorDetail::Message(message) => message.trim().to_string(),
            ErrorDetail::Validation(issues) => issues
                .into_iter()
                .map(|issue| issue.msg)
                .collect::<Vec<_>>()
                .join("; "),
        })
        .filter(|message| !message.is_empty())
        .or_else(|| {
            let trimmed = compact_text(body);
            (!trimmed.is_empty() && !trimmed.starts_with('{')).then_some(trimmed)
        });

    ApiError::Status {
        status: status.as_u16(),
        detail,
    }
}
