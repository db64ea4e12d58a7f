//! Database migrations

use crate::error::Result;
use libsql::Connection;

use super::repository::with_transaction;

/// Current schema version
const CURRENT_VERSION: i32 = 1;

/// Run all pending migrations
pub async fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn).await?;

    if version < 1 {
        migrate_v1(conn).await?;
    }

    Ok(())
}

/// Get the current schema version
async fn get_version(conn: &Connection) -> Result<i32> {
    let mut rows = conn
        .query(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            (),
        )
        .await?;

    let exists: bool = if let Some(row) = rows.next().await? {
        row.get::<i32>(0)? != 0
    } else {
        false
    };

    if !exists {
        return Ok(0);
    }

    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM schema_version", ())
        .await?;

    let version: i32 = if let Some(row) = rows.next().await? {
        row.get(0)?
    } else {
        0
    };

    Ok(version)
}

/// Run each statement in order inside one transaction.
async fn apply(conn: &Connection, statements: &[&str]) -> Result<()> {
    with_transaction(conn, async {
        for stmt in statements {
            conn.execute(stmt, ()).await?;
        }
        Ok(())
    })
    .await
}

/// Migration to version 1: cards with their child rows, contacts, leads
async fn migrate_v1(conn: &Connection) -> Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        "CREATE TABLE IF NOT EXISTS cards (
            id TEXT PRIMARY KEY,
            remote_id TEXT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            company_name TEXT,
            job_title TEXT,
            bio TEXT,
            theme TEXT,
            profile_photo_path TEXT,
            company_logo_path TEXT,
            cover_graphic_path TEXT,
            address_street TEXT,
            address_city TEXT,
            address_state TEXT,
            address_zip_code TEXT,
            address_country TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0
        )",
        "CREATE INDEX IF NOT EXISTS idx_cards_remote_id ON cards(remote_id)",
        "CREATE INDEX IF NOT EXISTS idx_cards_updated ON cards(updated_at DESC)",
        "CREATE TABLE IF NOT EXISTS card_emails (
            card_id TEXT NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
            id TEXT NOT NULL,
            position INTEGER NOT NULL,
            email TEXT NOT NULL,
            kind TEXT NOT NULL,
            label TEXT,
            is_primary INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (card_id, id)
        )",
        "CREATE TABLE IF NOT EXISTS card_phones (
            card_id TEXT NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
            id TEXT NOT NULL,
            position INTEGER NOT NULL,
            phone_number TEXT NOT NULL,
            kind TEXT NOT NULL,
            label TEXT,
            PRIMARY KEY (card_id, id)
        )",
        "CREATE TABLE IF NOT EXISTS card_websites (
            card_id TEXT NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
            id TEXT NOT NULL,
            position INTEGER NOT NULL,
            url TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            is_primary INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (card_id, id)
        )",
        "CREATE TABLE IF NOT EXISTS contacts (
            id TEXT PRIMARY KEY,
            remote_id TEXT,
            lead_id TEXT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            mobile_phone TEXT,
            company TEXT,
            job_title TEXT,
            address TEXT,
            city TEXT,
            state TEXT,
            zip_code TEXT,
            country TEXT,
            website TEXT,
            notes TEXT,
            comments_from_lead TEXT,
            birthdate TEXT,
            photo_url TEXT,
            provenance TEXT NOT NULL,
            source_metadata TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0
        )",
        "CREATE INDEX IF NOT EXISTS idx_contacts_remote_id ON contacts(remote_id)",
        "CREATE INDEX IF NOT EXISTS idx_contacts_lead_id ON contacts(lead_id)",
        "CREATE INDEX IF NOT EXISTS idx_contacts_updated ON contacts(updated_at DESC)",
        "CREATE TABLE IF NOT EXISTS leads (
            id TEXT PRIMARY KEY,
            remote_id TEXT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            full_name TEXT,
            email TEXT,
            work_phone TEXT,
            mobile_phone TEXT,
            street_address TEXT,
            city TEXT,
            state TEXT,
            zip_code TEXT,
            country TEXT,
            organization_name TEXT,
            job_title TEXT,
            birthdate TEXT,
            website TEXT,
            photo_url TEXT,
            comments_from_lead TEXT,
            card_first_name TEXT,
            card_last_name TEXT,
            card_company TEXT,
            card_job_title TEXT,
            qr_title TEXT,
            qr_type TEXT,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0
        )",
        "CREATE INDEX IF NOT EXISTS idx_leads_remote_id ON leads(remote_id)",
        "CREATE INDEX IF NOT EXISTS idx_leads_updated ON leads(updated_at DESC)",
        "INSERT INTO schema_version (version) VALUES (1)",
    ];

    apply(conn, &statements).await?;

    tracing::info!("Migrated database to version {CURRENT_VERSION}");
    Ok(())
}
