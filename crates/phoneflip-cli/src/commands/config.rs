use crate::cli::ConfigCommands;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_base_url,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            api_base_url,
            no_activate,
        ),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    api_base_url: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let profile = config
        .init_profile(&profile_name, api_base_url, !no_activate)
        .map_err(CliError::Config)?
        .clone();

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    match profile.api_base_url() {
        Some(url) => println!("Backend: {url}"),
        None => println!(
            "Profile '{profile_name}' has no api_base_url; PHONEFLIP_API_BASE_URL or the built-in default will be used."
        ),
    }
    println!(
        "Run `phoneflip auth login --email <email> --password <password>` to sign in."
    );
    Ok(())
}
