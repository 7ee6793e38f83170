use crate::commands::common::{finish, format_analytics_lines, print_json, print_lines, CliContext};
use crate::error::CliError;

pub async fn run_analytics(context: &CliContext, json: bool) -> Result<(), CliError> {
    let mut app = context.open().await?;
    let succeeded = app.load_analytics().await;
    finish(&mut app, succeeded)?;

    let Some(analytics) = app.state().stores.analytics.as_ref() else {
        return Ok(());
    };
    if json {
        return print_json(analytics);
    }
    print_lines(&format_analytics_lines(analytics), "");
    Ok(())
}
