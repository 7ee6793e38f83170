pub mod analytics;
pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod favorites;
pub mod listings;
pub mod messages;
pub mod profile;
pub mod reference;
pub mod reviews;
pub mod saved_searches;
pub mod search;
pub mod suggest;
