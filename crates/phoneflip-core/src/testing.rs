//! Recording fake of the backend for facade tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use crate::api::{
    ApiError, ApiResult, LoginRequest, MarketplaceApi, RegisterRequest, SocialLoginRequest,
    TokenResponse,
};
use crate::listings::ListingQuery;
use crate::models::{
    Analytics, BrandCatalog, Conversation, Listing, Message, NewMessage, NewReview,
    NewSavedSearch, ProfileUpdate, Review, SavedSearch, User, UserProfile,
};

pub const VALID_TOKEN: &str = "valid-token";
pub const VALID_PASSWORD: &str = "correct-horse";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Cities,
    PhoneBrands,
    StorageOptions,
    ConditionOptions,
    Login,
    Register,
    SocialLogin,
    CurrentUser,
    UserProfile(String),
    UpdateProfile(ProfileUpdate),
    Listings(ListingQuery),
    Favorites,
    AddFavorite(String),
    RemoveFavorite(String),
    Conversations,
    ConversationMessages(String),
    SendMessage(NewMessage),
    SavedSearches,
    CreateSavedSearch(NewSavedSearch),
    UserReviews(String),
    CreateReview(NewReview),
    Analytics,
}

impl Call {
    pub const fn is_listings(&self) -> bool {
        matches!(self, Self::Listings(_))
    }
}

#[derive(Default)]
pub struct MockApi {
    calls: RefCell<Vec<Call>>,
    listing_pages: RefCell<VecDeque<ApiResult<Vec<Listing>>>>,
    favorites: RefCell<Vec<Listing>>,
    saved_searches: RefCell<Vec<SavedSearch>>,
    reviews: RefCell<HashMap<String, Vec<Review>>>,
    account: RefCell<Option<User>>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    pub fail_reference: Cell<bool>,
    pub fail_send: Cell<bool>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            conversations: vec![conversation("c1")],
            messages: vec![
                message("m2", "2024-05-01T10:05:00"),
                message("m1", "2024-05-01T10:00:00"),
            ],
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn reset_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn listing_queries(&self) -> Vec<ListingQuery> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Listings(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    /// Queue the response of the next `GET /listings`.
    pub fn push_listings(&self, page: Vec<Listing>) {
        self.listing_pages.borrow_mut().push_back(Ok(page));
    }

    pub fn push_listings_error(&self, status: u16, detail: &str) {
        self.listing_pages
            .borrow_mut()
            .push_back(Err(status_error(status, detail)));
    }

    pub fn server_favorite_ids(&self) -> Vec<String> {
        self.favorites
            .borrow()
            .iter()
            .map(|listing| listing.id.clone())
            .collect()
    }

    pub fn seed_saved_search(&self, search: SavedSearch) {
        self.saved_searches.borrow_mut().push(search);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check_token(token: &str) -> ApiResult<()> {
        if token == VALID_TOKEN {
            Ok(())
        } else {
            Err(status_error(401, "Invalid authentication credentials"))
        }
    }

    fn reference<T>(&self, value: T) -> ApiResult<T> {
        if self.fail_reference.get() {
            Err(status_error(503, "Service unavailable"))
        } else {
            Ok(value)
        }
    }
}

impl MarketplaceApi for MockApi {
    async fn cities(&self) -> ApiResult<Vec<String>> {
        self.record(Call::Cities);
        self.reference(vec!["Karachi".to_string(), "Lahore".to_string()])
    }

    async fn phone_brands(&self) -> ApiResult<BrandCatalog> {
        self.record(Call::PhoneBrands);
        let mut brands = BrandCatalog::new();
        brands.insert("Samsung", vec!["Galaxy S24".to_string()]);
        brands.insert(
            "Apple",
            vec!["iPhone 15 Pro".to_string(), "iPhone 15".to_string()],
        );
        self.reference(brands)
    }

    async fn storage_options(&self) -> ApiResult<Vec<String>> {
        self.record(Call::StorageOptions);
        self.reference(vec!["128GB".to_string(), "256GB".to_string()])
    }

    async fn condition_options(&self) -> ApiResult<Vec<String>> {
        self.record(Call::ConditionOptions);
        self.reference(vec!["New".to_string(), "Good".to_string()])
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<TokenResponse> {
        self.record(Call::Login);
        if request.password != VALID_PASSWORD {
            return Err(status_error(401, "Incorrect email or password"));
        }
        Ok(token_response())
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<TokenResponse> {
        self.record(Call::Register);
        if request.email == "taken@example.com" {
            return Err(status_error(400, "Email already registered"));
        }
        Ok(token_response())
    }

    async fn social_login(&self, _request: &SocialLoginRequest) -> ApiResult<TokenResponse> {
        self.record(Call::SocialLogin);
        Ok(token_response())
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        self.record(Call::CurrentUser);
        Self::check_token(token)?;
        Ok(self.account.borrow().clone().unwrap_or_else(user))
    }

    async fn user_profile(&self, user_id: &str) -> ApiResult<UserProfile> {
        self.record(Call::UserProfile(user_id.to_string()));
        if user_id != "seller-1" {
            return Err(status_error(404, "User not found"));
        }
        Ok(serde_json::from_value(serde_json::json!({
            "id": "seller-1",
            "name": "Mobile Hub",
            "user_type": "shop",
            "city": "Karachi",
            "rating": 4.5,
        }))?)
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<()> {
        self.record(Call::UpdateProfile(update.clone()));
        Self::check_token(token)?;
        let mut account = self.account.borrow_mut();
        let account = account.get_or_insert_with(user);
        if let Some(name) = &update.name {
            account.name.clone_from(name);
        }
        if update.phone.is_some() {
            account.phone.clone_from(&update.phone);
        }
        if update.city.is_some() {
            account.city.clone_from(&update.city);
        }
        if update.shop_name.is_some() {
            account.shop_name.clone_from(&update.shop_name);
        }
        Ok(())
    }

    async fn listings(
        &self,
        _token: Option<&str>,
        query: &ListingQuery,
    ) -> ApiResult<Vec<Listing>> {
        self.record(Call::Listings(query.clone()));
        self.listing_pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn favorites(&self, token: &str) -> ApiResult<Vec<Listing>> {
        self.record(Call::Favorites);
        Self::check_token(token)?;
        Ok(self.favorites.borrow().clone())
    }

    async fn add_favorite(&self, token: &str, listing_id: &str) -> ApiResult<()> {
        self.record(Call::AddFavorite(listing_id.to_string()));
        Self::check_token(token)?;
        let mut favorites = self.favorites.borrow_mut();
        if favorites.iter().any(|listing| listing.id == listing_id) {
            return Err(status_error(400, "Already in favorites"));
        }
        favorites.push(listing(listing_id));
        Ok(())
    }

    async fn remove_favorite(&self, token: &str, listing_id: &str) -> ApiResult<()> {
        self.record(Call::RemoveFavorite(listing_id.to_string()));
        Self::check_token(token)?;
        self.favorites
            .borrow_mut()
            .retain(|listing| listing.id != listing_id);
        Ok(())
    }

    async fn conversations(&self, token: &str) -> ApiResult<Vec<Conversation>> {
        self.record(Call::Conversations);
        Self::check_token(token)?;
        Ok(self.conversations.clone())
    }

    async fn conversation_messages(
        &self,
        token: &str,
        conversation_id: &str,
    ) -> ApiResult<Vec<Message>> {
        self.record(Call::ConversationMessages(conversation_id.to_string()));
        Self::check_token(token)?;
        Ok(self.messages.clone())
    }

    async fn send_message(&self, token: &str, message: &NewMessage) -> ApiResult<()> {
        self.record(Call::SendMessage(message.clone()));
        Self::check_token(token)?;
        if self.fail_send.get() {
            return Err(status_error(404, "Receiver not found"));
        }
        Ok(())
    }

    async fn saved_searches(&self, token: &str) -> ApiResult<Vec<SavedSearch>> {
        self.record(Call::SavedSearches);
        Self::check_token(token)?;
        Ok(self.saved_searches.borrow().clone())
    }

    async fn create_saved_search(&self, token: &str, search: &NewSavedSearch) -> ApiResult<()> {
        self.record(Call::CreateSavedSearch(search.clone()));
        Self::check_token(token)?;
        let mut saved = self.saved_searches.borrow_mut();
        let id = format!("s{}", saved.len() + 1);
        saved.push(SavedSearch {
            id,
            user_id: "u1".to_string(),
            name: search.name.clone(),
            search_query: search.search_query.clone(),
            is_active: true,
            created_at: None,
        });
        Ok(())
    }

    async fn user_reviews(&self, user_id: &str) -> ApiResult<Vec<Review>> {
        self.record(Call::UserReviews(user_id.to_string()));
        Ok(self
            .reviews
            .borrow()
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_review(&self, token: &str, review: &NewReview) -> ApiResult<()> {
        self.record(Call::CreateReview(review.clone()));
        Self::check_token(token)?;
        let stored: Review = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "reviewer_name": "Ayesha",
            "rating": review.rating,
            "comment": review.comment,
            "created_at": "2024-05-01T10:00:00",
        }))?;
        self.reviews
            .borrow_mut()
            .entry(review.reviewed_user_id.clone())
            .or_default()
            .push(stored);
        Ok(())
    }

    async fn analytics(&self, token: &str) -> ApiResult<Analytics> {
        self.record(Call::Analytics);
        Self::check_token(token)?;
        Ok(Analytics {
            total_listings: 3,
            active_listings: 2,
            total_views: 120,
            total_inquiries: 6,
            conversion_rate: 5.0,
            ..Analytics::default()
        })
    }
}

pub fn status_error(status: u16, detail: &str) -> ApiError {
    ApiError::Status {
        status,
        detail: Some(detail.to_string()),
    }
}

pub fn user() -> User {
    serde_json::from_value(serde_json::json!({
        "id": "u1",
        "name": "Ayesha",
        "email": "ayesha@example.com",
        "city": "Karachi",
        "user_type": "individual",
    }))
    .unwrap()
}

fn token_response() -> TokenResponse {
    TokenResponse {
        access_token: VALID_TOKEN.to_string(),
        token_type: "bearer".to_string(),
        user: user(),
    }
}

pub fn listing(id: &str) -> Listing {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "brand": "Samsung",
        "model": "Galaxy S24",
        "storage": "256GB",
        "condition": "Like New",
        "price": 185_000,
        "pricing_type": "negotiable",
        "seller_id": "seller-1",
        "seller_city": "Karachi",
    }))
    .unwrap()
}

pub fn listings(count: usize, prefix: &str) -> Vec<Listing> {
    (0..count)
        .map(|index| listing(&format!("{prefix}-{index}")))
        .collect()
}

fn conversation(id: &str) -> Conversation {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "other_user_id": "seller-1",
        "other_user_name": "Mobile Hub",
        "listing_id": "l1",
        "listing_title": "Samsung Galaxy S24",
        "last_message": "Is it available?",
        "unread_count": 1,
    }))
    .unwrap()
}

fn message(id: &str, created_at: &str) -> Message {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "sender_id": "seller-1",
        "receiver_id": "u1",
        "listing_id": "l1",
        "content": format!("message {id}"),
        "created_at": created_at,
    }))
    .unwrap()
}
