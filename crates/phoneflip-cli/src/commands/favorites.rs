use chrono::Utc;

use crate::cli::FavoritesCommands;
use crate::commands::common::{finish, format_listing_lines, print_json, print_lines, CliContext};
use crate::error::CliError;

pub async fn run_favorites(command: FavoritesCommands, context: &CliContext) -> Result<(), CliError> {
    let mut app = context.open().await?;
    match command {
        FavoritesCommands::List { json } => {
            let succeeded = app.load_favorites().await;
            finish(&mut app, succeeded)?;
            let favorites = app.state().stores.favorites.items();
            if json {
                return print_json(favorites);
            }
            print_lines(
                &format_listing_lines(favorites, Utc::now()),
                "No favorites yet.",
            );
            Ok(())
        }
        FavoritesCommands::Toggle { listing_id } => {
            let membership = app.toggle_favorite(listing_id.trim()).await;
            finish(&mut app, membership.is_some())?;
            println!("{} favorites", app.state().stores.favorites.items().len());
            Ok(())
        }
    }
}
