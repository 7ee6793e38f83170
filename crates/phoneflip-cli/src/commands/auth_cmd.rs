use phoneflip_core::api::{LoginRequest, RegisterForm, SocialLoginRequest, SocialUserInfo};

use crate::auth::load_stored_token;
use crate::cli::AuthCommands;
use crate::commands::common::{finish, CliContext, CliMarketplace};
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, context: &CliContext) -> Result<(), CliError> {
    match command {
        AuthCommands::Login {
            email,
            phone,
            password,
        } => {
            let request = login_request(email, phone, password)?;
            let mut app = context.build()?;
            let succeeded = app.login(request).await;
            finish(&mut app, succeeded)?;
            print_signed_in(context, &app);
            Ok(())
        }
        AuthCommands::Register {
            name,
            email,
            phone,
            city,
            account_type,
            shop_name,
            address,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                name,
                email,
                phone,
                user_type: account_type.into(),
                city,
                address,
                shop_name,
                password,
                confirm_password,
            };
            let mut app = context.build()?;
            let succeeded = app.register(form).await;
            finish(&mut app, succeeded)?;
            print_signed_in(context, &app);
            Ok(())
        }
        AuthCommands::SocialLogin {
            provider,
            token,
            email,
            name,
        } => {
            let request = SocialLoginRequest {
                provider: provider.into(),
                token,
                user_info: SocialUserInfo { email, name },
            };
            let mut app = context.build()?;
            let succeeded = app.social_login(request).await;
            finish(&mut app, succeeded)?;
            print_signed_in(context, &app);
            Ok(())
        }
        AuthCommands::Status => {
            let had_token = load_stored_token(&context.profile_name)?.is_some();
            let mut app = context.open().await?;
            finish(&mut app, true)?;

            if let Some(user) = app.state().session.user() {
                let contact = user
                    .email
                    .as_deref()
                    .or(user.phone.as_deref())
                    .unwrap_or("(no contact)");
                println!(
                    "Profile '{}' is signed in as {} <{}>",
                    context.profile_name,
                    user.display_name(),
                    contact
                );
            } else if had_token {
                println!(
                    "Profile '{}' had an expired session; the stored token was removed.",
                    context.profile_name
                );
            } else {
                println!("Profile '{}' is not signed in.", context.profile_name);
            }
            Ok(())
        }
        AuthCommands::Logout => {
            let mut app = context.build()?;
            app.logout();
            finish(&mut app, true)?;
            println!("Signed out profile '{}'", context.profile_name);
            Ok(())
        }
    }
}

/// Email wins when both identifiers are given.
pub fn login_request(
    email: Option<String>,
    phone: Option<String>,
    password: String,
) -> Result<LoginRequest, CliError> {
    match (email, phone) {
        (Some(email), _) => Ok(LoginRequest::email(email, password)),
        (None, Some(phone)) => Ok(LoginRequest::phone(phone, password)),
        (None, None) => Err(CliError::InvalidArgument(
            "pass --email or --phone".to_string(),
        )),
    }
}

fn print_signed_in(context: &CliContext, app: &CliMarketplace) {
    if let Some(user) = app.state().session.user() {
        println!(
            "Signed in profile '{}' as {}",
            context.profile_name,
            user.display_name()
        );
    }
}
