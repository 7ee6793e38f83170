//! Error types for phoneflip-core

use thiserror::Error;

use crate::api::ApiError;

/// Result type alias using phoneflip-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in phoneflip-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Operation needs a signed-in user
    #[error("Please login to {0}")]
    AuthRequired(&'static str),

    /// Input rejected before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested item is not loaded
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token storage error
    #[error("Token storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Text suitable for a toast.
    ///
    /// API failures surface the server's `detail` when one was returned,
    /// otherwise `fallback`. Rejected input shows the bare reason.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(error) => error.detail().unwrap_or(fallback).to_string(),
            Self::InvalidInput(message) => message.clone(),
            Self::AuthRequired(_) | Self::NotFound(_) => self.to_string(),
            Self::Storage(_) => fallback.to_string(),
        }
    }
}
