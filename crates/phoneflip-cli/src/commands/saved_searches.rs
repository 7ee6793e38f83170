use crate::cli::SavedSearchCommands;
use crate::commands::common::{
    finish, format_saved_search_lines, print_json, print_lines, CliContext,
};
use crate::commands::listings::print_listing_results;
use crate::error::CliError;

pub async fn run_saved_searches(
    command: SavedSearchCommands,
    context: &CliContext,
) -> Result<(), CliError> {
    let mut app = context.open().await?;
    match command {
        SavedSearchCommands::List { json } => {
            let succeeded = app.load_saved_searches().await;
            finish(&mut app, succeeded)?;
            let searches = app.state().stores.saved_searches.items();
            if json {
                return print_json(searches);
            }
            print_lines(
                &format_saved_search_lines(searches),
                "No saved searches yet.",
            );
            Ok(())
        }
        SavedSearchCommands::Save { name, filters } => {
            app.set_filters(filters.to_filters());
            let succeeded = app.save_search(&name).await;
            finish(&mut app, succeeded)
        }
        SavedSearchCommands::Apply { id, json } => {
            let succeeded =
                app.load_saved_searches().await && app.apply_saved_search(id.trim()).await;
            finish(&mut app, succeeded)?;
            print_listing_results(&app, json)
        }
    }
}
