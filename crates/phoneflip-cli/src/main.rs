//! PhoneFlip CLI - browse, search and trade phones from the terminal

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::CliContext;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("phoneflip=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();
    let api_base_url = cli.api_base_url.clone();

    let Some(command) = cli.command else {
        Cli::command().print_help().map_err(CliError::Io)?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Config { command } => commands::config::run_config(command, profile),
        Commands::Completions { shell, output } => {
            commands::completions::run_completions(shell, output.as_deref())
        }
        command => {
            let context = CliContext::resolve(profile, api_base_url)?;
            run_remote(command, &context).await
        }
    }
}

async fn run_remote(command: Commands, context: &CliContext) -> Result<(), CliError> {
    match command {
        Commands::Auth { command } => commands::auth_cmd::run_auth(command, context).await,
        Commands::Reference { json } => commands::reference::run_reference(context, json).await,
        Commands::Listings {
            filters,
            pages,
            json,
        } => commands::listings::run_listings(context, &filters, pages, json).await,
        Commands::Search { query, pages, json } => {
            commands::search::run_search(context, &query.join(" "), pages, json).await
        }
        Commands::Suggest { input, live } => {
            commands::suggest::run_suggest(context, &input.join(" "), live).await
        }
        Commands::Favorites { command } => {
            commands::favorites::run_favorites(command, context).await
        }
        Commands::Messages { command } => commands::messages::run_messages(command, context).await,
        Commands::SavedSearches { command } => {
            commands::saved_searches::run_saved_searches(command, context).await
        }
        Commands::Reviews { command } => commands::reviews::run_reviews(command, context).await,
        Commands::Profile { command } => commands::profile::run_profile(command, context).await,
        Commands::Analytics { json } => commands::analytics::run_analytics(context, json).await,
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}
