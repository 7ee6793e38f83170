//! phoneflip-core - Core library for PhoneFlip
//!
//! This crate contains the models, the REST client, and the client-side
//! state machines (listing pagination, search suggestions, session,
//! user caches, views and toasts) shared by every PhoneFlip front end.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod filters;
pub mod listings;
pub mod models;
pub mod search;
pub mod state;
pub mod stores;
pub mod toast;
pub mod util;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::{ApiError, HttpMarketplaceApi, MarketplaceApi};
pub use app::Marketplace;
pub use auth::{AccessToken, AuthPhase, MemoryTokenStore, TokenPersistence};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use filters::{FilterUpdate, Filters, SortBy};
pub use state::AppState;
pub use toast::{Toast, ToastKind};
pub use view::View;
