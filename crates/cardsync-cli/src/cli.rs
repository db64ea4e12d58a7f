use std::path::PathBuf;

use cardsync_core::EntityKind;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cardsync")]
#[command(about = "Keep an offline copy of your ShareMyCard cards, contacts, and leads")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pull cards, contacts, and leads from the server
    Sync {
        /// Output the sync result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List cached records
    List {
        /// Which kind of record to show
        #[arg(value_enum)]
        kind: ListKind,
        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete every cached record
    Reset,
    /// Inspect client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Cards,
    Contacts,
    Leads,
}

impl From<ListKind> for EntityKind {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Cards => Self::Card,
            ListKind::Contacts => Self::Contact,
            ListKind::Leads => Self::Lead,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,
}
