use chrono::Utc;
use serde::Serialize;

use phoneflip_core::models::Listing;

use crate::cli::FilterArgs;
use crate::commands::common::{
    finish, format_listing_lines, print_json, print_lines, CliContext, CliMarketplace,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ListingPage<'a> {
    pub page: u32,
    pub has_more: bool,
    pub listings: &'a [Listing],
}

pub async fn run_listings(
    context: &CliContext,
    filters: &FilterArgs,
    pages: u32,
    json: bool,
) -> Result<(), CliError> {
    validate_pages(pages)?;
    let mut app = context.open().await?;
    app.set_filters(filters.to_filters());
    let succeeded = app.apply_filters().await && load_extra_pages(&mut app, pages).await;
    finish(&mut app, succeeded)?;
    print_listing_results(&app, json)
}

pub fn validate_pages(pages: u32) -> Result<(), CliError> {
    if pages == 0 {
        return Err(CliError::InvalidArgument(
            "--pages must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Keep appending pages until `pages` are loaded or the feed runs out.
pub async fn load_extra_pages(app: &mut CliMarketplace, pages: u32) -> bool {
    for _ in 1..pages {
        if !app.state().listings.can_load_more() {
            break;
        }
        if !app.load_more().await {
            return false;
        }
    }
    true
}

pub fn print_listing_results(app: &CliMarketplace, json: bool) -> Result<(), CliError> {
    let feed = &app.state().listings;
    if json {
        return print_json(&ListingPage {
            page: feed.page(),
            has_more: feed.has_more(),
            listings: feed.items(),
        });
    }

    print_lines(
        &format_listing_lines(feed.items(), Utc::now()),
        "No listings found.",
    );
    if feed.has_more() {
        println!(
            "More results available (use --pages {}).",
            feed.page().saturating_add(1)
        );
    }
    Ok(())
}
