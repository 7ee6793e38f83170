//! Fetch-on-demand caches tied to the signed-in user.
//!
//! Nothing here talks to the network. The facade fetches and hands the
//! server's answer to the matching store, replacing what was there.

use std::collections::HashMap;

use crate::models::{Analytics, Conversation, Listing, Message, Review, SavedSearch};

#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    items: Vec<Listing>,
}

impl FavoritesStore {
    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    /// Membership by listing id.
    pub fn contains(&self, listing_id: &str) -> bool {
        self.items.iter().any(|listing| listing.id == listing_id)
    }

    pub fn replace(&mut self, items: Vec<Listing>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Conversation list plus the messages of the open conversation.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active: Option<String>,
    messages: Vec<Message>,
}

impl ConversationStore {
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Conversation> {
        let id = self.active.as_deref()?;
        self.conversations
            .iter()
            .find(|conversation| conversation.id == id)
    }

    /// Messages of the open conversation, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn total_unread(&self) -> u32 {
        self.conversations
            .iter()
            .map(|conversation| conversation.unread_count)
            .sum()
    }

    pub fn replace_conversations(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
    }

    /// Switch the open conversation; messages of the previous one are dropped.
    pub fn open(&mut self, conversation_id: &str) {
        if self.active.as_deref() != Some(conversation_id) {
            self.messages.clear();
        }
        self.active = Some(conversation_id.to_string());
    }

    pub fn replace_messages(&mut self, mut messages: Vec<Message>) {
        messages.sort_by_key(|message| message.created_at);
        self.messages = messages;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct SavedSearchStore {
    items: Vec<SavedSearch>,
}

impl SavedSearchStore {
    pub fn items(&self) -> &[SavedSearch] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&SavedSearch> {
        self.items.iter().find(|search| search.id == id)
    }

    pub fn replace(&mut self, items: Vec<SavedSearch>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Reviews keyed by the reviewed user's id.
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    by_user: HashMap<String, Vec<Review>>,
}

impl ReviewStore {
    pub fn for_user(&self, user_id: &str) -> &[Review] {
        self.by_user.get(user_id).map_or(&[][..], Vec::as_slice)
    }

    pub fn replace(&mut self, user_id: &str, reviews: Vec<Review>) {
        self.by_user.insert(user_id.to_string(), reviews);
    }

    pub fn clear(&mut self) {
        self.by_user.clear();
    }
}

/// Every cache that must be dropped on logout.
#[derive(Debug, Clone, Default)]
pub struct UserStores {
    pub favorites: FavoritesStore,
    pub conversations: ConversationStore,
    pub saved_searches: SavedSearchStore,
    pub reviews: ReviewStore,
    pub analytics: Option<Analytics>,
}

impl UserStores {
    pub fn clear(&mut self) {
        self.favorites.clear();
        self.conversations.clear();
        self.saved_searches.clear();
        self.reviews.clear();
        self.analytics = None;
    }
}
