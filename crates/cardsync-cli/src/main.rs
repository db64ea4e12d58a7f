//! cardsync - ShareMyCard offline cache from the command line
//!
//! Usage: cardsync sync, cardsync list contacts --limit 20

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::common::resolve_db_path;
use crate::commands::config::run_config_show;
use crate::commands::list::run_list;
use crate::commands::reset::run_reset;
use crate::commands::sync::run_sync;
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

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "cardsync=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path)?;

    match cli.command {
        Commands::Sync { json } => run_sync(json, &db_path).await?,
        Commands::List { kind, limit, json } => run_list(kind, limit, json, &db_path).await?,
        Commands::Reset => run_reset(&db_path).await?,
        Commands::Config {
            command: ConfigCommands::Show,
        } => run_config_show(&db_path)?,
    }

    Ok(())
}
