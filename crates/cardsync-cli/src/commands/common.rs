use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use cardsync_core::config::{default_db_path, ENV_DB_PATH};
use cardsync_core::db::Database;
use cardsync_core::normalize::parse_server_date;
use cardsync_core::sync::KindSummary;
use cardsync_core::{Card, Contact, Lead};
use chrono::Utc;
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct CardListItem {
    pub id: String,
    pub remote_id: Option<String>,
    pub name: String,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub primary_email: Option<String>,
    pub is_active: bool,
    pub updated_at: i64,
}

#[derive(Debug, Serialize)]
pub struct ContactListItem {
    pub id: String,
    pub remote_id: Option<String>,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub source: String,
    pub lead_id: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct LeadListItem {
    pub id: String,
    pub remote_id: Option<String>,
    pub name: String,
    pub organization_name: Option<String>,
    pub email: Option<String>,
    pub status: String,
    pub updated_at: String,
}

pub fn card_to_list_item(card: &Card) -> CardListItem {
    CardListItem {
        id: card.id.clone(),
        remote_id: card.remote_id.clone(),
        name: card.full_name(),
        company_name: card.company_name.clone(),
        job_title: card.job_title.clone(),
        primary_email: card.primary_email().map(|email| email.email.clone()),
        is_active: card.is_active,
        updated_at: card.updated_at,
    }
}

pub fn contact_to_list_item(contact: &Contact) -> ContactListItem {
    ContactListItem {
        id: contact.id.clone(),
        remote_id: contact.remote_id.clone(),
        name: contact.display_name(),
        company: contact.company.clone(),
        email: contact.email.clone(),
        source: contact.provenance.to_string(),
        lead_id: contact.lead_id.clone(),
        updated_at: contact.updated_at.clone(),
    }
}

pub fn lead_to_list_item(lead: &Lead) -> LeadListItem {
    LeadListItem {
        id: lead.id.clone(),
        remote_id: lead.remote_id.clone(),
        name: lead_name(lead),
        organization_name: lead.organization_name.clone(),
        email: lead.email.clone(),
        status: lead.status.to_string(),
        updated_at: lead.updated_at.clone(),
    }
}

pub fn format_card_lines(cards: &[Card]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    cards
        .iter()
        .map(|card| {
            let short_id = short_id(&card.id);
            let name = truncate(&card.full_name(), 30);
            let company = truncate(card.company_name.as_deref().unwrap_or("-"), 24);
            let relative_time = format_relative_time(card.updated_at, now_ms);
            let marker = if card.is_active { "" } else { "  (inactive)" };
            format!("{short_id:<13}  {name:<30}  {company:<24}  {relative_time}{marker}")
        })
        .collect()
}

pub fn format_contact_lines(contacts: &[Contact]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    contacts
        .iter()
        .map(|contact| {
            let short_id = short_id(&contact.id);
            let name = truncate(&contact.display_name(), 30);
            let email = truncate(contact.email.as_deref().unwrap_or("-"), 30);
            let relative_time = format_server_time(&contact.updated_at, now_ms);
            format!(
                "{short_id:<13}  {name:<30}  {email:<30}  {relative_time:<10}  {}",
                contact.provenance
            )
        })
        .collect()
}

pub fn format_lead_lines(leads: &[Lead]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    leads
        .iter()
        .map(|lead| {
            let short_id = short_id(&lead.id);
            let name = truncate(&lead_name(lead), 30);
            let organization = truncate(lead.organization_name.as_deref().unwrap_or("-"), 24);
            let relative_time = format_server_time(&lead.updated_at, now_ms);
            format!(
                "{short_id:<13}  {name:<30}  {organization:<24}  {relative_time:<10}  {}",
                lead.status
            )
        })
        .collect()
}

pub fn format_summary_line(summary: &KindSummary) -> String {
    let mut line = format!(
        "{:<9} fetched {:>4}  stored {:>4}",
        summary.kind.plural(),
        summary.fetched,
        summary.upserted
    );
    if summary.purged > 0 {
        line.push_str(&format!("  purged {}", summary.purged));
    }
    line
}

fn lead_name(lead: &Lead) -> String {
    let joined = format!("{} {}", lead.first_name, lead.last_name)
        .trim()
        .to_string();
    if joined.is_empty() {
        lead.full_name.clone().unwrap_or_default()
    } else {
        joined
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn truncate(value: &str, max_chars: usize) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

fn format_server_time(raw: &str, now_ms: i64) -> String {
    parse_server_date(raw).map_or_else(|| "-".to_string(), |ms| format_relative_time(ms, now_ms))
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    resolve_db_path_from(cli_db_path, env::var_os(ENV_DB_PATH), default_db_path())
}

/// `--db-path`, then the environment, then the platform data directory.
pub fn resolve_db_path_from(
    cli_db_path: Option<PathBuf>,
    env_db_path: Option<OsString>,
    fallback: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    cli_db_path
        .or_else(|| env_db_path.filter(|value| !value.is_empty()).map(PathBuf::from))
        .or(fallback)
        .ok_or_else(|| CliError::Config("Failed to resolve CLI data directory".to_string()))
}

pub async fn open_database(path: &Path) -> Result<Database, CliError> {
    Ok(Database::open(path).await?)
}
