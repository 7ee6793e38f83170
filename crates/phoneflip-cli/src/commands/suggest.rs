use crate::commands::common::{finish, print_lines, CliContext};
use crate::error::CliError;

pub async fn run_suggest(context: &CliContext, input: &str, live: bool) -> Result<(), CliError> {
    let mut app = context.build()?;
    if live {
        let succeeded = app.load_reference_data().await;
        finish(&mut app, succeeded)?;
    }

    let suggestions = app.on_search_input(input);
    print_lines(&suggestions, "No suggestions.");
    Ok(())
}
