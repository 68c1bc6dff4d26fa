//! Fieldcase CLI - offline case management from the terminal
//!
//! Captures and edits field records while disconnected, then reconciles
//! them with the central collection in one sync pass.

mod cli;
mod commands;
mod error;
mod policy;

use clap::Parser;
use tracing_subscriber::filter::Directive;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::sync::run_sync;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

const DEFAULT_LOG_DIRECTIVE: &str = "fieldcase=info";

fn default_log_directive() -> Result<Directive, CliError> {
    DEFAULT_LOG_DIRECTIVE
        .parse()
        .map_err(|error| CliError::InvalidLogDirective(format!("{error}")))
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_log_directive()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Add { name, set } => run_add(&name, &set, &cli.field_db).await?,
        Commands::Edit { id, set } => run_edit(&id, &set, &cli.field_db).await?,
        Commands::List { json } => run_list(json, &cli.field_db).await?,
        Commands::Sync {
            prefer,
            interactive,
            json,
        } => run_sync(prefer, interactive, json, &cli.field_db, &cli.central_db).await?,
    }

    Ok(())
}
