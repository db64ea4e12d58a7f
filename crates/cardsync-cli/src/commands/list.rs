use std::path::Path;

use cardsync_core::db::{
    EntityRepository, LibSqlCardRepository, LibSqlContactRepository, LibSqlLeadRepository,
};
use cardsync_core::EntityKind;

use crate::cli::ListKind;
use crate::commands::common::{
    card_to_list_item, contact_to_list_item, format_card_lines, format_contact_lines,
    format_lead_lines, lead_to_list_item, open_database,
};
use crate::error::CliError;

pub async fn run_list(
    kind: ListKind,
    limit: usize,
    as_json: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let conn = db.connection();

    let (lines, json) = match kind {
        ListKind::Cards => {
            let mut cards = LibSqlCardRepository::new(conn).list().await?;
            cards.truncate(limit);
            let items = cards.iter().map(card_to_list_item).collect::<Vec<_>>();
            (format_card_lines(&cards), serde_json::to_string_pretty(&items)?)
        }
        ListKind::Contacts => {
            let mut contacts = LibSqlContactRepository::new(conn).list().await?;
            contacts.truncate(limit);
            let items = contacts.iter().map(contact_to_list_item).collect::<Vec<_>>();
            (format_contact_lines(&contacts), serde_json::to_string_pretty(&items)?)
        }
        ListKind::Leads => {
            let mut leads = LibSqlLeadRepository::new(conn).list().await?;
            leads.truncate(limit);
            let items = leads.iter().map(lead_to_list_item).collect::<Vec<_>>();
            (format_lead_lines(&leads), serde_json::to_string_pretty(&items)?)
        }
    };

    if as_json {
        println!("{json}");
    } else if lines.is_empty() {
        println!("No cached {}. Run `cardsync sync` first.", EntityKind::from(kind).plural());
    } else {
        for line in lines {
            println!("{line}");
        }
    }

    Ok(())
}
