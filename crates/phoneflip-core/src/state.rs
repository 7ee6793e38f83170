//! Application state shared by every PhoneFlip front end.

use crate::auth::Session;
use crate::config::ClientConfig;
use crate::filters::Filters;
use crate::listings::ListingFeed;
use crate::models::ReferenceData;
use crate::search::{SearchHistory, SearchSuggestions};
use crate::stores::UserStores;
use crate::toast::ToastQueue;
use crate::view::View;

/// Everything a screen can read.
///
/// Each slice has one owner; the facade is the only writer.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub view: View,
    pub filters: Filters,
    pub listings: ListingFeed,
    pub suggestions: SearchSuggestions,
    pub history: SearchHistory,
    pub stores: UserStores,
    pub reference: ReferenceData,
    pub toasts: ToastQueue,
    /// Set while any facade operation is in flight.
    pub loading: bool,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            listings: ListingFeed::new(config.page_size),
            suggestions: SearchSuggestions::new(config.suggestion_limit),
            history: SearchHistory::new(config.history_limit),
            ..Self::default()
        }
    }

    /// Drop the session and every user-scoped cache.
    pub fn sign_out(&mut self) {
        self.session.clear();
        self.stores.clear();
    }
}
