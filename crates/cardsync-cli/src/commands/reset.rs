use std::path::Path;

use cardsync_core::db::{
    Database, EntityRepository, LibSqlCardRepository, LibSqlContactRepository,
    LibSqlLeadRepository,
};

use crate::commands::common::open_database;
use crate::error::CliError;

pub async fn run_reset(db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let removed = clear_cache(&db).await?;
    println!("Removed {removed} cached record(s)");
    Ok(())
}

/// Delete every cached card, contact, and lead. Returns the number of rows removed.
pub async fn clear_cache(db: &Database) -> Result<usize, CliError> {
    let conn = db.connection();
    let cards = LibSqlCardRepository::new(conn).clear().await?;
    let contacts = LibSqlContactRepository::new(conn).clear().await?;
    let leads = LibSqlLeadRepository::new(conn).clear().await?;
    tracing::info!(cards, contacts, leads, "cleared local cache");
    Ok(cards + contacts + leads)
}
