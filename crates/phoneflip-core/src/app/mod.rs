//! Application facade.
//!
//! [`Marketplace`] owns the [`AppState`], the API client and the token
//! store. Every user interaction is a method here: update local state,
//! optionally call the backend, merge the answer. Failures never escape as
//! panics or errors; they become toasts and the method reports `false` or
//! `None`.

use crate::api::{LoginRequest, MarketplaceApi, RegisterForm, SocialLoginRequest, TokenResponse};
use crate::auth::{AccessToken, TokenPersistence};
use crate::config::ClientConfig;
use crate::filters::{FilterUpdate, Filters};
use crate::listings::{FeedOutcome, PendingPage};
use crate::models::{
    NewMessage, NewReview, NewSavedSearch, ProfileUpdate, ReferenceData, UserProfile,
};
use crate::state::AppState;
use crate::toast::Toast;
use crate::view::View;
use crate::Error;

#[cfg(test)]
mod tests;

pub struct Marketplace<A: MarketplaceApi, S: TokenPersistence> {
    api: A,
    tokens: S,
    state: AppState,
}

impl<A: MarketplaceApi, S: TokenPersistence> Marketplace<A, S> {
    pub fn new(api: A, tokens: S, config: &ClientConfig) -> Self {
        Self {
            api,
            tokens,
            state: AppState::new(config),
        }
    }

    pub const fn state(&self) -> &AppState {
        &self.state
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn token_store(&self) -> &S {
        &self.tokens
    }

    /// Take every pending toast, oldest first.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.state.toasts.drain()
    }

    // Startup

    /// Load reference data, seed the suggestion catalog, then restore a
    /// persisted session.
    pub async fn bootstrap(&mut self) -> bool {
        self.load_reference_data().await;
        self.restore_session().await
    }

    /// Fetch cities, brands, storage and condition options.
    ///
    /// Each table that fails to load stays empty; one toast covers all
    /// failures.
    pub async fn load_reference_data(&mut self) -> bool {
        self.state.loading = true;
        let cities = self.api.cities().await;
        let brands = self.api.phone_brands().await;
        let storage_options = self.api.storage_options().await;
        let condition_options = self.api.condition_options().await;
        self.state.loading = false;

        let mut failures = 0_usize;
        let mut reference = ReferenceData::default();
        match cities {
            Ok(cities) => reference.cities = cities,
            Err(error) => {
                tracing::warn!("Failed to load cities: {error}");
                failures += 1;
            }
        }
        match brands {
            Ok(brands) => reference.brands = brands,
            Err(error) => {
                tracing::warn!("Failed to load phone brands: {error}");
                failures += 1;
            }
        }
        match storage_options {
            Ok(options) => reference.storage_options = options,
            Err(error) => {
                tracing::warn!("Failed to load storage options: {error}");
                failures += 1;
            }
        }
        match condition_options {
            Ok(options) => reference.condition_options = options,
            Err(error) => {
                tracing::warn!("Failed to load condition options: {error}");
                failures += 1;
            }
        }

        self.state
            .suggestions
            .replace_catalog(reference.brands.model_names());
        self.state.reference = reference;

        if failures > 0 {
            self.state.toasts.error("Failed to load reference data");
            return false;
        }
        tracing::debug!(
            cities = self.state.reference.cities.len(),
            brands = self.state.reference.brands.len(),
            "Reference data loaded"
        );
        true
    }

    // Session

    /// Validate a persisted token with `GET /auth/me`.
    ///
    /// A rejected token is removed from the store and the session stays
    /// anonymous.
    pub async fn restore_session(&mut self) -> bool {
        let token = match self.tokens.load_token() {
            Ok(Some(token)) => token,
            Ok(None) => return false,
            Err(error) => {
                tracing::warn!("Failed to read persisted token: {error}");
                return false;
            }
        };

        self.state.session.begin_authenticating();
        self.state.loading = true;
        let result = self.api.current_user(token.as_str()).await;
        self.state.loading = false;

        match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Restored session");
                self.state.session.establish(token, user);
                self.refresh_favorites().await;
                true
            }
            Err(error) => {
                tracing::info!("Persisted token rejected: {error}");
                if let Err(error) = self.tokens.clear_token() {
                    tracing::warn!("Failed to clear persisted token: {error}");
                }
                self.state.session.clear();
                false
            }
        }
    }

    pub async fn login(&mut self, request: LoginRequest) -> bool {
        if let Err(error) = request.validate() {
            self.report(&error, "Login failed");
            return false;
        }

        self.state.session.begin_authenticating();
        self.state.loading = true;
        let result = self.api.login(&request).await;
        self.state.loading = false;

        match result {
            Ok(response) => {
                self.accept_auth(response, View::Home, "Login successful!")
                    .await
            }
            Err(error) => {
                self.state.session.fail_authenticating();
                self.report(&error.into(), "Login failed");
                false
            }
        }
    }

    /// Register a new account. The form is checked locally first; nothing
    /// is sent when it is incomplete or the passwords differ.
    pub async fn register(&mut self, form: RegisterForm) -> bool {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(error) => {
                self.report(&error, "Registration failed");
                return false;
            }
        };

        self.state.session.begin_authenticating();
        self.state.loading = true;
        let result = self.api.register(&request).await;
        self.state.loading = false;

        match result {
            Ok(response) => {
                self.accept_auth(response, View::Profile, "Registration successful!")
                    .await
            }
            Err(error) => {
                self.state.session.fail_authenticating();
                self.report(&error.into(), "Registration failed");
                false
            }
        }
    }

    pub async fn social_login(&mut self, request: SocialLoginRequest) -> bool {
        if let Err(error) = request.validate() {
            self.report(&error, "Social login failed");
            return false;
        }

        self.state.session.begin_authenticating();
        self.state.loading = true;
        let result = self.api.social_login(&request).await;
        self.state.loading = false;

        match result {
            Ok(response) => {
                self.accept_auth(response, View::Home, "Login successful!")
                    .await
            }
            Err(error) => {
                self.state.session.fail_authenticating();
                self.report(&error.into(), "Social login failed");
                false
            }
        }
    }

    async fn accept_auth(&mut self, response: TokenResponse, view: View, message: &str) -> bool {
        let Some(token) = AccessToken::new(response.access_token) else {
            self.state.session.fail_authenticating();
            self.state.toasts.error("Server returned an empty token");
            return false;
        };

        if let Err(error) = self.tokens.save_token(&token) {
            tracing::warn!("Failed to persist token: {error}");
        }
        tracing::info!(user_id = %response.user.id, "Signed in");
        self.state.session.establish(token, response.user);
        self.state.view = view;
        self.state.toasts.success(message);
        self.refresh_favorites().await;
        true
    }

    pub fn logout(&mut self) {
        if let Err(error) = self.tokens.clear_token() {
            tracing::warn!("Failed to clear persisted token: {error}");
        }
        self.state.sign_out();
        self.state.view = View::Home;
        self.state.toasts.info("Logged out successfully");
    }

    // Navigation

    /// Switch views. Views that need a user redirect anonymous callers to
    /// `Login`; returns whether the requested view was shown.
    pub fn navigate(&mut self, view: View) -> bool {
        if view.requires_auth() && !self.state.session.is_authenticated() {
            self.report(&Error::AuthRequired(view.auth_action()), "");
            self.state.view = View::Login;
            return false;
        }
        self.state.view = view;
        true
    }

    // Listings

    /// Apply one filter change. Any actual change reloads page 1.
    pub async fn update_filter(&mut self, update: FilterUpdate) -> bool {
        if !self.state.filters.apply(update) {
            return false;
        }
        self.apply_filters().await
    }

    /// Replace every criterion at once without fetching. Returns whether
    /// anything changed.
    ///
    /// A change drops the loaded pages and any request in flight, so
    /// `load_more` stays disabled until [`Self::apply_filters`] runs.
    pub fn set_filters(&mut self, filters: Filters) -> bool {
        if self.state.filters == filters {
            return false;
        }
        self.state.filters = filters;
        self.state.listings.reset();
        true
    }

    /// Reload the first page for the current filters, replacing results.
    pub async fn apply_filters(&mut self) -> bool {
        let pending = self
            .state
            .listings
            .begin(&self.state.filters, None, None, false);
        self.fetch_listings(pending).await
    }

    /// Request the next page and append it. Does nothing while a page is in
    /// flight or after a short page.
    pub async fn load_more(&mut self) -> bool {
        let Some(pending) = self.state.listings.begin_load_more(&self.state.filters) else {
            return false;
        };
        self.fetch_listings(pending).await
    }

    async fn fetch_listings(&mut self, pending: PendingPage) -> bool {
        let token = self.state.session.bearer().map(str::to_owned);
        self.state.loading = true;
        let result = self.api.listings(token.as_deref(), &pending.query).await;
        self.state.loading = false;

        let detail = result
            .as_ref()
            .err()
            .and_then(|error| error.detail().map(str::to_owned));
        match self.state.listings.complete(&pending, result) {
            FeedOutcome::Applied { received } => {
                tracing::debug!(page = pending.query.page, received, "Listings loaded");
                true
            }
            FeedOutcome::Failed => {
                self.state
                    .toasts
                    .error(detail.unwrap_or_else(|| "Failed to load listings".to_string()));
                false
            }
            FeedOutcome::Stale => false,
        }
    }

    // Search

    /// Keystroke in the search box; returns the suggestions to show.
    pub fn on_search_input(&mut self, input: &str) -> Vec<String> {
        self.state.suggestions.on_input(input).to_vec()
    }

    pub async fn select_suggestion(&mut self, suggestion: &str) -> bool {
        let query = self.state.suggestions.select(suggestion);
        self.search(&query).await
    }

    /// Run a free-text search and show its first page.
    pub async fn search(&mut self, query: &str) -> bool {
        let query = query.trim().to_string();
        self.state.history.record(&query);
        self.state.suggestions.close();
        self.state.filters.apply(FilterUpdate::Search(query.clone()));
        self.state.view = View::SearchResults;

        let override_text = (!query.is_empty()).then_some(query.as_str());
        let pending = self
            .state
            .listings
            .begin(&self.state.filters, override_text, None, false);
        self.fetch_listings(pending).await
    }

    // Favorites

    /// Add or remove `listing_id` from favorites, then reload the list.
    ///
    /// Returns the new membership, or `None` when nothing was changed.
    pub async fn toggle_favorite(&mut self, listing_id: &str) -> Option<bool> {
        let token = self.require_token("add favorites")?;
        let was_favorite = self.state.stores.favorites.contains(listing_id);

        self.state.loading = true;
        let result = if was_favorite {
            self.api.remove_favorite(&token, listing_id).await
        } else {
            self.api.add_favorite(&token, listing_id).await
        };
        self.state.loading = false;

        if let Err(error) = result {
            self.report(&error.into(), "Failed to update favorites");
            return None;
        }
        if was_favorite {
            self.state.toasts.info("Removed from favorites");
        } else {
            self.state.toasts.success("Added to favorites");
        }
        self.refresh_favorites().await;
        Some(!was_favorite)
    }

    pub async fn load_favorites(&mut self) -> bool {
        if self.require_token("view favorites").is_none() {
            return false;
        }
        self.refresh_favorites().await
    }

    async fn refresh_favorites(&mut self) -> bool {
        let Some(token) = self.state.session.bearer().map(str::to_owned) else {
            return false;
        };
        self.state.loading = true;
        let result = self.api.favorites(&token).await;
        self.state.loading = false;

        match result {
            Ok(favorites) => {
                self.state.stores.favorites.replace(favorites);
                true
            }
            Err(error) => {
                self.state.stores.favorites.clear();
                self.report(&error.into(), "Failed to load favorites");
                false
            }
        }
    }

    // Messaging

    pub async fn load_conversations(&mut self) -> bool {
        let Some(token) = self.require_token("view messages") else {
            return false;
        };
        self.state.loading = true;
        let result = self.api.conversations(&token).await;
        self.state.loading = false;

        match result {
            Ok(conversations) => {
                self.state.stores.conversations.replace_conversations(conversations);
                true
            }
            Err(error) => {
                self.state
                    .stores
                    .conversations
                    .replace_conversations(Vec::new());
                self.report(&error.into(), "Failed to load conversations");
                false
            }
        }
    }

    /// Show a conversation and fetch its messages; the server marks them read.
    pub async fn open_conversation(&mut self, conversation_id: &str) -> bool {
        let Some(token) = self.require_token("view messages") else {
            return false;
        };
        self.state.stores.conversations.open(conversation_id);
        self.state.view = View::Conversation(conversation_id.to_string());
        self.fetch_messages(&token, conversation_id).await
    }

    async fn fetch_messages(&mut self, token: &str, conversation_id: &str) -> bool {
        self.state.loading = true;
        let result = self.api.conversation_messages(token, conversation_id).await;
        self.state.loading = false;

        match result {
            Ok(messages) => {
                self.state.stores.conversations.replace_messages(messages);
                true
            }
            Err(error) => {
                self.state.stores.conversations.replace_messages(Vec::new());
                self.report(&error.into(), "Failed to load messages");
                false
            }
        }
    }

    /// Send a message, then reload the open conversation and the
    /// conversation list.
    pub async fn send_message(&mut self, message: NewMessage) -> bool {
        let Some(token) = self.require_token("send messages") else {
            return false;
        };
        if let Err(error) = message.validate() {
            self.report(&error, "Failed to send message");
            return false;
        }

        self.state.loading = true;
        let result = self.api.send_message(&token, &message).await;
        self.state.loading = false;

        if let Err(error) = result {
            self.report(&error.into(), "Failed to send message");
            return false;
        }
        self.state.toasts.success("Message sent!");

        if let Some(active) = self.state.stores.conversations.active_id().map(str::to_owned) {
            self.fetch_messages(&token, &active).await;
        }
        self.load_conversations().await;
        true
    }

    // Saved searches

    pub async fn load_saved_searches(&mut self) -> bool {
        let Some(token) = self.require_token("view saved searches") else {
            return false;
        };
        self.state.loading = true;
        let result = self.api.saved_searches(&token).await;
        self.state.loading = false;

        match result {
            Ok(searches) => {
                self.state.stores.saved_searches.replace(searches);
                true
            }
            Err(error) => {
                self.state.stores.saved_searches.clear();
                self.report(&error.into(), "Failed to load saved searches");
                false
            }
        }
    }

    /// Save the current filters under `name`.
    pub async fn save_search(&mut self, name: &str) -> bool {
        let Some(token) = self.require_token("save searches") else {
            return false;
        };
        let name = name.trim();
        if name.is_empty() {
            self.report(
                &Error::InvalidInput("Search name is required".to_string()),
                "",
            );
            return false;
        }

        let search = NewSavedSearch {
            name: name.to_string(),
            search_query: self.state.filters.snapshot(),
        };
        self.state.loading = true;
        let result = self.api.create_saved_search(&token, &search).await;
        self.state.loading = false;

        if let Err(error) = result {
            self.report(&error.into(), "Failed to save search");
            return false;
        }
        self.state.toasts.success("Search saved successfully!");
        self.load_saved_searches().await;
        true
    }

    /// Merge a saved snapshot into the filters and show its first page.
    pub async fn apply_saved_search(&mut self, saved_search_id: &str) -> bool {
        let Some(snapshot) = self
            .state
            .stores
            .saved_searches
            .find(saved_search_id)
            .map(|search| search.search_query.clone())
        else {
            self.report(
                &Error::NotFound(format!("saved search {saved_search_id}")),
                "",
            );
            return false;
        };

        self.state.filters.apply(FilterUpdate::Merge(snapshot));
        self.state.view = View::SearchResults;
        self.apply_filters().await
    }

    // Reviews and profiles

    pub async fn load_reviews(&mut self, user_id: &str) -> bool {
        self.state.loading = true;
        let result = self.api.user_reviews(user_id).await;
        self.state.loading = false;

        match result {
            Ok(reviews) => {
                self.state.stores.reviews.replace(user_id, reviews);
                true
            }
            Err(error) => {
                self.state.stores.reviews.replace(user_id, Vec::new());
                self.report(&error.into(), "Failed to load reviews");
                false
            }
        }
    }

    pub async fn submit_review(&mut self, review: NewReview) -> bool {
        let Some(token) = self.require_token("leave a review") else {
            return false;
        };
        if let Err(error) = review.validate() {
            self.report(&error, "Failed to submit review");
            return false;
        }

        self.state.loading = true;
        let result = self.api.create_review(&token, &review).await;
        self.state.loading = false;

        if let Err(error) = result {
            self.report(&error.into(), "Failed to submit review");
            return false;
        }
        self.state.toasts.success("Review submitted successfully!");
        self.load_reviews(&review.reviewed_user_id).await;
        true
    }

    pub async fn user_profile(&mut self, user_id: &str) -> Option<UserProfile> {
        self.state.loading = true;
        let result = self.api.user_profile(user_id).await;
        self.state.loading = false;

        match result {
            Ok(profile) => Some(profile),
            Err(error) => {
                self.report(&error.into(), "Failed to load profile");
                None
            }
        }
    }

    /// Edit the signed-in user's own profile, then reload it from
    /// `/auth/me`.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> bool {
        let Some(token) = self.require_token("update your profile") else {
            return false;
        };
        let update = update.normalized();
        if let Err(error) = update.validate() {
            self.report(&error, "Failed to update profile");
            return false;
        }

        self.state.loading = true;
        let result = self.api.update_profile(&token, &update).await;
        if let Err(error) = result {
            self.state.loading = false;
            self.report(&error.into(), "Failed to update profile");
            return false;
        }

        let refreshed = self.api.current_user(&token).await;
        self.state.loading = false;
        match refreshed {
            Ok(user) => self.state.session.refresh_user(user),
            Err(error) => tracing::warn!("Failed to reload profile after update: {error}"),
        }
        self.state.toasts.success("Profile updated successfully!");
        true
    }

    // Analytics

    pub async fn load_analytics(&mut self) -> bool {
        let Some(token) = self.require_token("view analytics") else {
            return false;
        };
        self.state.loading = true;
        let result = self.api.analytics(&token).await;
        self.state.loading = false;

        match result {
            Ok(analytics) => {
                self.state.stores.analytics = Some(analytics);
                true
            }
            Err(error) => {
                self.state.stores.analytics = None;
                self.report(&error.into(), "Failed to load analytics");
                false
            }
        }
    }

    // Helpers

    /// Bearer token of the signed-in user, or an error toast naming `action`.
    fn require_token(&mut self, action: &'static str) -> Option<String> {
        if let Some(token) = self.state.session.bearer() {
            return Some(token.to_string());
        }
        self.report(&Error::AuthRequired(action), "");
        None
    }

    fn report(&mut self, error: &Error, fallback: &str) {
        tracing::debug!("{error}");
        self.state.toasts.error(error.user_message(fallback));
    }
}
