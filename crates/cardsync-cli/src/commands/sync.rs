use std::path::Path;

use cardsync_core::config::ClientConfig;
use cardsync_core::remote::{EnvCredential, HttpEntityClient};
use cardsync_core::sync::SyncOptions;
use cardsync_core::SyncCoordinator;

use crate::commands::common::{format_summary_line, open_database};
use crate::error::CliError;

pub async fn run_sync(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let config = ClientConfig::load()?;
    let client = HttpEntityClient::new(&config, EnvCredential::default())?;
    let db = open_database(db_path).await?;

    let coordinator =
        SyncCoordinator::new(client, db).with_options(SyncOptions::from(&config));
    let result = coordinator.run_full_sync().await;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for summary in &result.summaries {
            println!("{}", format_summary_line(summary));
        }
        if result.succeeded {
            println!("{}", result.message);
        }
    }

    if result.succeeded {
        Ok(())
    } else {
        Err(CliError::SyncFailed(result.message))
    }
}
