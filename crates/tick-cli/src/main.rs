//! Tick CLI - Supabase-backed todos from the command line
//!
//! Capture and manage todos against a hosted backend with minimal friction.

mod auth;
mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
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
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tick=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Add {
            title,
            description,
            due,
        }) => {
            commands::add::run_add(&title, description, due.as_deref()).await?;
        }
        Some(Commands::List {
            filter,
            search,
            json,
        }) => {
            commands::list::run_list(filter, search.as_deref(), json).await?;
        }
        Some(Commands::Edit {
            id,
            title,
            description,
            due,
        }) => {
            commands::edit::run_edit(id, title, description, due.as_deref()).await?;
        }
        Some(Commands::Toggle { id }) => commands::toggle::run_toggle(id).await?,
        Some(Commands::Delete { id }) => commands::delete::run_delete(id).await?,
        Some(Commands::Auth { command }) => commands::auth_cmd::run_auth(command).await?,
        Some(Commands::Completions { shell, output }) => {
            commands::completions::run_completions(shell, output.as_deref())?;
        }
        None => {
            // Quick capture mode: tick "pay rent"
            if cli.title.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                commands::add::run_add(&cli.title, None, None).await?;
            }
        }
    }

    Ok(())
}
