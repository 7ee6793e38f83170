use chrono::{DateTime, Utc};
use phoneflip_core::config::normalize_api_root;
use phoneflip_core::filters::FilterSnapshot;
use phoneflip_core::models::{
    Analytics, Conversation, Listing, Message, Review, SavedSearch, User, UserType,
};
use phoneflip_core::{ClientConfig, HttpMarketplaceApi, Marketplace, Toast, ToastKind};
use serde::Serialize;

use crate::auth::KeyringTokenStore;
use crate::config_profiles::{normalize_text_option, CliProfile, CliProfilesConfig};
use crate::error::CliError;

const API_BASE_URL_ENV: &str = "PHONEFLIP_API_BASE_URL";

pub type CliMarketplace = Marketplace<HttpMarketplaceApi, KeyringTokenStore>;

/// Profile and client settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliContext {
    pub profile_name: String,
    pub config: ClientConfig,
}

impl CliContext {
    pub fn resolve(
        explicit_profile: Option<&str>,
        api_base_url: Option<String>,
    ) -> Result<Self, CliError> {
        let profiles = CliProfilesConfig::load().map_err(CliError::Config)?;
        let profile_name = profiles.resolve_profile_name(explicit_profile);
        let profile = profiles.profile(&profile_name).cloned().unwrap_or_default();
        Self::from_parts(
            profile_name,
            &profile,
            api_base_url,
            std::env::var(API_BASE_URL_ENV).ok(),
        )
    }

    /// URL precedence: flag, then environment, then profile, then the
    /// built-in default.
    pub fn from_parts(
        profile_name: String,
        profile: &CliProfile,
        flag_url: Option<String>,
        env_url: Option<String>,
    ) -> Result<Self, CliError> {
        let mut config = ClientConfig::default();
        if let Some(url) = normalize_text_option(flag_url)
            .or_else(|| normalize_text_option(env_url))
            .or_else(|| profile.api_base_url())
        {
            config.api_base_url = url;
        }
        normalize_api_root(&config.api_base_url).map_err(CliError::Config)?;

        Ok(Self {
            profile_name,
            config,
        })
    }

    pub fn token_store(&self) -> KeyringTokenStore {
        KeyringTokenStore::new(&self.profile_name)
    }

    pub fn build(&self) -> Result<CliMarketplace, CliError> {
        let api = HttpMarketplaceApi::new(&self.config)?;
        Ok(Marketplace::new(api, self.token_store(), &self.config))
    }

    /// Build the facade and restore any stored session.
    pub async fn open(&self) -> Result<CliMarketplace, CliError> {
        let mut app = self.build()?;
        if app.restore_session().await {
            tracing::debug!(profile = %self.profile_name, "Session restored");
        }
        Ok(app)
    }
}

/// Toasts split into lines to print and the failure to return.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ToastSummary {
    pub notices: Vec<String>,
    pub failure: Option<String>,
}

/// On failure the newest error toast becomes the command error; every other
/// toast is still shown.
pub fn summarize_toasts(toasts: &[Toast], succeeded: bool) -> ToastSummary {
    let failure = if succeeded {
        None
    } else {
        Some(
            toasts
                .iter()
                .rev()
                .find(|toast| toast.kind == ToastKind::Error)
                .map_or_else(|| "Request failed".to_string(), |toast| toast.message.clone()),
        )
    };
    let notices = toasts
        .iter()
        .filter(|toast| succeeded || toast.kind != ToastKind::Error)
        .map(format_toast)
        .collect();
    ToastSummary { notices, failure }
}

pub fn format_toast(toast: &Toast) -> String {
    match toast.kind {
        ToastKind::Error => format!("warning: {}", toast.message),
        ToastKind::Success | ToastKind::Info => toast.message.clone(),
    }
}

/// Print pending toasts to stderr and turn a failed operation into an error.
pub fn finish(app: &mut CliMarketplace, succeeded: bool) -> Result<(), CliError> {
    let summary = summarize_toasts(&app.take_toasts(), succeeded);
    for notice in &summary.notices {
        eprintln!("{notice}");
    }
    summary.failure.map_or(Ok(()), |message| Err(CliError::Request(message)))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_lines(lines: &[String], empty_message: &str) {
    if lines.is_empty() {
        println!("{empty_message}");
    } else {
        for line in lines {
            println!("{line}");
        }
    }
}

/// `185000` renders as `Rs 185,000`.
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if amount < 0 {
        format!("Rs -{grouped}")
    } else {
        format!("Rs {grouped}")
    }
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let mut truncated = collapsed
            .chars()
            .take(max_chars.saturating_sub(3))
            .collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(10).collect()
}

pub fn format_listing_lines(listings: &[Listing], now: DateTime<Utc>) -> Vec<String> {
    listings
        .iter()
        .map(|listing| {
            let marker = if listing.is_favorited { '*' } else { ' ' };
            let title = truncate_chars(&listing.title(), 30);
            let price = format_price(listing.price);
            let negotiable = if listing.negotiable() { " neg" } else { "" };
            let posted = listing.time_ago(now).unwrap_or_default();
            format!(
                "{marker}{:<10}  {title:<30}  {price:>12}{negotiable:<4}  {:<9}  {:<12}  {posted}",
                short_id(&listing.id),
                listing.condition,
                listing.city(),
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

pub fn format_conversation_lines(conversations: &[Conversation]) -> Vec<String> {
    conversations
        .iter()
        .map(|conversation| {
            let unread = if conversation.unread_count > 0 {
                format!("  ({} unread)", conversation.unread_count)
            } else {
                String::new()
            };
            let last = conversation
                .last_message
                .as_deref()
                .map(|text| format!("  {}", truncate_chars(text, 40)))
                .unwrap_or_default();
            format!(
                "{}  {}  re: {}{unread}{last}",
                conversation.id, conversation.other_user_name, conversation.listing_title
            )
        })
        .collect()
}

pub fn format_message_lines(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .map(|message| {
            let sender = if message.sender_name.is_empty() {
                message.sender_id.as_str()
            } else {
                message.sender_name.as_str()
            };
            let offer = message
                .offer_amount
                .map(|amount| format!(" [offer {}]", format_price(amount)))
                .unwrap_or_default();
            format!(
                "{}  {sender}: {}{offer}",
                message.created_at.format("%Y-%m-%d %H:%M"),
                message.content
            )
        })
        .collect()
}

pub fn format_review_lines(reviews: &[Review]) -> Vec<String> {
    reviews
        .iter()
        .map(|review| {
            let comment = if review.comment.trim().is_empty() {
                String::new()
            } else {
                format!(": {}", truncate_chars(&review.comment, 60))
            };
            format!(
                "{}/5  {}  {}{comment}",
                review.rating,
                review.created_at.format("%Y-%m-%d"),
                review.reviewer_name
            )
        })
        .collect()
}

/// `brand=Apple city=Karachi sort_by=recent`
pub fn describe_snapshot(snapshot: &FilterSnapshot) -> String {
    let mut parts = Vec::new();
    if let Some(brand) = &snapshot.brand {
        parts.push(format!("brand={brand}"));
    }
    if let Some(city) = &snapshot.city {
        parts.push(format!("city={city}"));
    }
    if let Some(condition) = &snapshot.condition {
        parts.push(format!("condition={condition}"));
    }
    if let Some(search) = &snapshot.search {
        parts.push(format!("search={search:?}"));
    }
    if let Some(min_price) = snapshot.min_price {
        parts.push(format!("min_price={min_price}"));
    }
    if let Some(max_price) = snapshot.max_price {
        parts.push(format!("max_price={max_price}"));
    }
    if let Some(sort_by) = snapshot.sort_by {
        parts.push(format!("sort_by={sort_by}"));
    }
    parts.join(" ")
}

pub fn format_saved_search_lines(searches: &[SavedSearch]) -> Vec<String> {
    searches
        .iter()
        .map(|search| {
            format!(
                "{:<10}  {:<24}  {}",
                short_id(&search.id),
                truncate_chars(&search.name, 24),
                describe_snapshot(&search.search_query)
            )
        })
        .collect()
}

pub fn format_user_lines(user: &User) -> Vec<String> {
    let verified = if user.is_verified { " (verified)" } else { "" };
    let account = match user.user_type {
        UserType::Individual => "individual",
        UserType::Shop => "shop",
        UserType::Admin => "admin",
    };
    let mut lines = vec![
        format!("{}{verified}", user.display_name()),
        format!("Account: {account}"),
    ];
    for (label, value) in [
        ("Email", &user.email),
        ("Phone", &user.phone),
        ("City", &user.city),
    ] {
        if let Some(value) = value.as_deref().filter(|value| !value.trim().is_empty()) {
            lines.push(format!("{label}: {value}"));
        }
    }
    lines.push(format!(
        "Rating: {:.1} ({} reviews), {} sales",
        user.rating, user.total_reviews, user.total_sales
    ));
    lines
}

pub fn format_analytics_lines(analytics: &Analytics) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Listings: {} total, {} active",
            analytics.total_listings, analytics.active_listings
        ),
        format!(
            "Views: {}  Inquiries: {}  Conversion: {:.1}%",
            analytics.total_views, analytics.total_inquiries, analytics.conversion_rate
        ),
    ];
    if !analytics.top_performing_listings.is_empty() {
        lines.push("Top listings:".to_string());
        lines.extend(analytics.top_performing_listings.iter().map(|listing| {
            format!(
                "  {}  {} views, {} inquiries",
                listing.title, listing.views, listing.inquiries
            )
        }));
    }
    if !analytics.monthly_stats.is_empty() {
        lines.push("Monthly:".to_string());
        lines.extend(analytics.monthly_stats.iter().map(|(month, stats)| {
            format!(
                "  {month}  {} listings, {} views, {} inquiries",
                stats.listings, stats.views, stats.inquiries
            )
        }));
    }
    lines
}
