use phoneflip_core::models::ProfileUpdate;
use phoneflip_core::View;

use crate::cli::ProfileCommands;
use crate::commands::common::{finish, format_user_lines, print_json, print_lines, CliContext};
use crate::error::CliError;

pub async fn run_profile(command: ProfileCommands, context: &CliContext) -> Result<(), CliError> {
    let mut app = context.open().await?;
    let json = match command {
        ProfileCommands::Show { json } => {
            let succeeded = app.navigate(View::Profile);
            finish(&mut app, succeeded)?;
            json
        }
        ProfileCommands::Update {
            name,
            phone,
            city,
            address,
            shop_name,
        } => {
            let update = ProfileUpdate {
                name,
                phone,
                city,
                address,
                shop_name,
            };
            let succeeded = app.update_profile(update).await;
            finish(&mut app, succeeded)?;
            false
        }
    };

    let Some(user) = app.state().session.user() else {
        return Ok(());
    };
    if json {
        return print_json(user);
    }
    print_lines(&format_user_lines(user), "");
    Ok(())
}
