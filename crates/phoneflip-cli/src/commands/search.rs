use crate::commands::common::{finish, CliContext};
use crate::commands::listings::{load_extra_pages, print_listing_results, validate_pages};
use crate::error::CliError;

pub async fn run_search(
    context: &CliContext,
    query: &str,
    pages: u32,
    json: bool,
) -> Result<(), CliError> {
    validate_pages(pages)?;
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::InvalidArgument(
            "Search query cannot be empty".to_string(),
        ));
    }

    let mut app = context.open().await?;
    let succeeded = app.search(query).await && load_extra_pages(&mut app, pages).await;
    finish(&mut app, succeeded)?;
    print_listing_results(&app, json)
}
