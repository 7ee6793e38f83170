//! Conversation and message models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::normalize_text_option;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    Offer,
}

/// One row of the conversation overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub other_user_id: String,
    pub other_user_name: String,
    #[serde(default)]
    pub other_user_profile_picture: Option<String>,
    pub listing_id: String,
    #[serde(default)]
    pub listing_title: String,
    #[serde(default)]
    pub listing_image: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default, with = "crate::models::timestamp::option")]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: String,
    pub receiver_id: String,
    #[serde(default)]
    pub receiver_name: String,
    pub listing_id: String,
    #[serde(default)]
    pub listing_title: String,
    #[serde(default)]
    pub message_type: MessageType,
    pub content: String,
    #[serde(default)]
    pub offer_amount: Option<i64>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(with = "crate::models::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub receiver_id: String,
    pub listing_id: String,
    pub message_type: MessageType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_amount: Option<i64>,
}

impl NewMessage {
    pub fn text(
        receiver_id: impl Into<String>,
        listing_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            receiver_id: receiver_id.into(),
            listing_id: listing_id.into(),
            message_type: MessageType::Text,
            content: content.into(),
            offer_amount: None,
        }
    }

    pub fn offer(
        receiver_id: impl Into<String>,
        listing_id: impl Into<String>,
        content: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            message_type: MessageType::Offer,
            offer_amount: Some(amount),
            ..Self::text(receiver_id, listing_id, content)
        }
    }

    /// Reject messages the backend would refuse or that make no sense to send.
    pub fn validate(&self) -> Result<()> {
        if normalize_text_option(Some(self.receiver_id.clone())).is_none() {
            return Err(Error::InvalidInput("Receiver is required".to_string()));
        }
        if normalize_text_option(Some(self.listing_id.clone())).is_none() {
            return Err(Error::InvalidInput("Listing is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(Error::InvalidInput("Message cannot be empty".to_string()));
        }
        match (self.message_type, self.offer_amount) {
            (MessageType::Offer, Some(amount)) if amount > 0 => Ok(()),
            (MessageType::Offer, _) => Err(Error::InvalidInput(
                "Offer amount must be greater than zero".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
