//! Data models for PhoneFlip

mod analytics;
mod listing;
mod messaging;
mod reference;
mod review;
mod saved_search;
pub(crate) mod timestamp;
mod user;

pub use analytics::{Analytics, MonthlyStats, TopListing};
pub use listing::{Condition, Listing, ListingStatus, PricingType};
pub use messaging::{Conversation, Message, MessageType, NewMessage};
pub use reference::{BrandCatalog, ReferenceData};
pub use review::{average_rating, NewReview, Review};
pub use saved_search::{NewSavedSearch, SavedSearch};
pub use user::{ProfileUpdate, User, UserProfile, UserType};
