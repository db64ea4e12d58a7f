//! Card repository implementation

use libsql::{params, Connection, Row};

use crate::error::Result;
use crate::models::{Address, Card, CardEmail, CardPhone, CardWebsite};

use super::repository::{find_local_id, position, EntityRepository};

const CARD_COLUMNS: &str = "id, remote_id, first_name, last_name, phone_number, company_name, \
     job_title, bio, theme, profile_photo_path, company_logo_path, cover_graphic_path, \
     address_street, address_city, address_state, address_zip_code, address_country, \
     created_at, updated_at, is_active, is_deleted";

/// libSQL implementation of `EntityRepository` for cards
pub struct LibSqlCardRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlCardRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EntityRepository for LibSqlCardRepository<'_> {
    type Entity = Card;

    const TABLE: &'static str = "cards";

    fn connection(&self) -> &Connection {
        self.conn
    }

    async fn get(&self, id: &str) -> Result<Option<Card>> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?"),
                [id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(self.hydrate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Card>> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {CARD_COLUMNS} FROM cards WHERE is_deleted = 0 ORDER BY updated_at DESC"
                ),
                (),
            )
            .await?;

        let mut cards = Vec::new();
        while let Some(row) = rows.next().await? {
            cards.push(self.hydrate(&row).await?);
        }
        Ok(cards)
    }

    async fn upsert_one(&self, card: &Card) -> Result<()> {
        let id = find_local_id(
            self.conn,
            "cards",
            &[
                ("id", Some(card.id.as_str())),
                ("remote_id", card.remote_id.as_deref()),
            ],
        )
        .await?
        .unwrap_or_else(|| card.id.clone());

        let address = card.address.clone().unwrap_or_default();
        self.conn
            .execute(
                &format!(
                    "INSERT INTO cards ({CARD_COLUMNS})
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                     ON CONFLICT(id) DO UPDATE SET
                        remote_id = excluded.remote_id,
                        first_name = excluded.first_name,
                        last_name = excluded.last_name,
                        phone_number = excluded.phone_number,
                        company_name = excluded.company_name,
                        job_title = excluded.job_title,
                        bio = excluded.bio,
                        theme = excluded.theme,
                        profile_photo_path = excluded.profile_photo_path,
                        company_logo_path = excluded.company_logo_path,
                        cover_graphic_path = excluded.cover_graphic_path,
                        address_street = excluded.address_street,
                        address_city = excluded.address_city,
                        address_state = excluded.address_state,
                        address_zip_code = excluded.address_zip_code,
                        address_country = excluded.address_country,
                        created_at = excluded.created_at,
                        updated_at = excluded.updated_at,
                        is_active = excluded.is_active,
                        is_deleted = excluded.is_deleted"
                ),
                params![
                    id.as_str(),
                    card.remote_id.clone(),
                    card.first_name.as_str(),
                    card.last_name.as_str(),
                    card.phone_number.as_str(),
                    card.company_name.clone(),
                    card.job_title.clone(),
                    card.bio.clone(),
                    card.theme.clone(),
                    card.profile_photo_path.clone(),
                    card.company_logo_path.clone(),
                    card.cover_graphic_path.clone(),
                    address.street,
                    address.city,
                    address.state,
                    address.zip_code,
                    address.country,
                    card.created_at,
                    card.updated_at,
                    i64::from(card.is_active),
                    i64::from(card.is_deleted)
                ],
            )
            .await?;

        self.replace_children(&id, card).await
    }
}

impl LibSqlCardRepository<'_> {
    /// Child rows are replaced wholesale, never merged.
    async fn replace_children(&self, card_id: &str, card: &Card) -> Result<()> {
        for table in ["card_emails", "card_phones", "card_websites"] {
            self.conn
                .execute(&format!("DELETE FROM {table} WHERE card_id = ?"), [card_id])
                .await?;
        }

        for (index, email) in card.emails.iter().enumerate() {
            self.conn
                .execute(
                    "INSERT INTO card_emails (card_id, id, position, email, kind, label, is_primary)
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                    params![
                        card_id,
                        email.id.as_str(),
                        position(index),
                        email.email.as_str(),
                        email.kind.as_str(),
                        email.label.clone(),
                        i64::from(email.is_primary)
                    ],
                )
                .await?;
        }

        for (index, phone) in card.phones.iter().enumerate() {
            self.conn
                .execute(
                    "INSERT INTO card_phones (card_id, id, position, phone_number, kind, label)
                     VALUES (?, ?, ?, ?, ?, ?)",
                    params![
                        card_id,
                        phone.id.as_str(),
                        position(index),
                        phone.phone_number.as_str(),
                        phone.kind.as_str(),
                        phone.label.clone()
                    ],
                )
                .await?;
        }

        for (index, website) in card.websites.iter().enumerate() {
            self.conn
                .execute(
                    "INSERT INTO card_websites (card_id, id, position, url, name, description, is_primary)
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                    params![
                        card_id,
                        website.id.as_str(),
                        position(index),
                        website.url.as_str(),
                        website.name.as_str(),
                        website.description.clone(),
                        i64::from(website.is_primary)
                    ],
                )
                .await?;
        }

        Ok(())
    }

    async fn hydrate(&self, row: &Row) -> Result<Card> {
        let mut card = Self::parse_card(row)?;
        card.emails = self.load_emails(&card.id).await?;
        card.phones = self.load_phones(&card.id).await?;
        card.websites = self.load_websites(&card.id).await?;
        Ok(card)
    }

    fn parse_card(row: &Row) -> Result<Card> {
        let address = Address {
            street: row.get(12)?,
            city: row.get(13)?,
            state: row.get(14)?,
            zip_code: row.get(15)?,
            country: row.get(16)?,
        };

        Ok(Card {
            id: row.get(0)?,
            remote_id: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            phone_number: row.get(4)?,
            company_name: row.get(5)?,
            job_title: row.get(6)?,
            bio: row.get(7)?,
            theme: row.get(8)?,
            profile_photo_path: row.get(9)?,
            company_logo_path: row.get(10)?,
            cover_graphic_path: row.get(11)?,
            emails: Vec::new(),
            phones: Vec::new(),
            websites: Vec::new(),
            address: (!address.is_empty()).then_some(address),
            created_at: row.get(17)?,
            updated_at: row.get(18)?,
            is_active: row.get::<i64>(19)? != 0,
            is_deleted: row.get::<i64>(20)? != 0,
        })
    }

    async fn load_emails(&self, card_id: &str) -> Result<Vec<CardEmail>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, email, kind, label, is_primary FROM card_emails
                 WHERE card_id = ? ORDER BY position",
                [card_id],
            )
            .await?;

        let mut emails = Vec::new();
        while let Some(row) = rows.next().await? {
            emails.push(CardEmail {
                id: row.get(0)?,
                email: row.get(1)?,
                kind: row.get::<String>(2)?.parse().unwrap_or_default(),
                label: row.get(3)?,
                is_primary: row.get::<i64>(4)? != 0,
            });
        }
        Ok(emails)
    }

    async fn load_phones(&self, card_id: &str) -> Result<Vec<CardPhone>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, phone_number, kind, label FROM card_phones
                 WHERE card_id = ? ORDER BY position",
                [card_id],
            )
            .await?;

        let mut phones = Vec::new();
        while let Some(row) = rows.next().await? {
            phones.push(CardPhone {
                id: row.get(0)?,
                phone_number: row.get(1)?,
                kind: row.get::<String>(2)?.parse().unwrap_or_default(),
                label: row.get(3)?,
            });
        }
        Ok(phones)
    }

    async fn load_websites(&self, card_id: &str) -> Result<Vec<CardWebsite>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, url, name, description, is_primary FROM card_websites
                 WHERE card_id = ? ORDER BY position",
                [card_id],
            )
            .await?;

        let mut websites = Vec::new();
        while let Some(row) = rows.next().await? {
            websites.push(CardWebsite {
                id: row.get(0)?,
                url: row.get(1)?,
                name: row.get(2)?,
                description: row.get(3)?,
                is_primary: row.get::<i64>(4)? != 0,
            });
        }
        Ok(websites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{EmailKind, PhoneKind};
    use pretty_assertions::assert_eq;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn remote_card(remote_id: &str, first_name: &str) -> Card {
        let mut card = Card::new_local(first_name, "Tester");
        card.id = remote_id.to_string();
        card.remote_id = Some(remote_id.to_string());
        card.updated_at = 1_700_000_000_000;
        card.created_at = 1_700_000_000_000;
        card
    }

    fn email(id: &str, address: &str) -> CardEmail {
        CardEmail {
            id: id.to_string(),
            email: address.to_string(),
            kind: EmailKind::Work,
            label: None,
            is_primary: false,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upsert_and_get_round_trip() {
        let db = setup().await;
        let repo = LibSqlCardRepository::new(db.connection());

        let mut card = remote_card("10", "Ada");
        card.company_name = Some("Engines Ltd".to_string());
        card.emails = vec![email("e1", "ada@example.com")];
        card.phones = vec![CardPhone {
            id: "p1".to_string(),
            phone_number: "555-0100".to_string(),
            kind: PhoneKind::Home,
            label: Some("evenings".to_string()),
        }];
        card.websites = vec![CardWebsite {
            id: "w1".to_string(),
            url: "https://example.com".to_string(),
            name: String::new(),
            description: None,
            is_primary: true,
        }];
        card.address = Some(Address {
            city: Some("London".to_string()),
            ..Address::default()
        });

        assert_eq!(repo.upsert_many(&[card.clone()]).await.unwrap(), 1);
        let loaded = repo.get("10").await.unwrap().unwrap();
        assert_eq!(loaded, card);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upsert_is_idempotent() {
        let db = setup().await;
        let repo = LibSqlCardRepository::new(db.connection());
        let mut card = remote_card("10", "Ada");
        card.emails = vec![email("e1", "ada@example.com")];

        repo.upsert_many(&[card.clone()]).await.unwrap();
        let first = repo.list().await.unwrap();
        repo.upsert_many(&[card]).await.unwrap();
        let second = repo.list().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_match_by_remote_id_keeps_local_id() {
        let db = setup().await;
        let repo = LibSqlCardRepository::new(db.connection());

        let mut local = Card::new_local("Ada", "Lovelace");
        local.remote_id = Some("42".to_string());
        let local_id = local.id.clone();
        repo.upsert_many(&[local]).await.unwrap();

        let incoming = remote_card("42", "Augusta");
        repo.upsert_many(&[incoming]).await.unwrap();

        let cards = repo.list().await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, local_id);
        assert_eq!(cards[0].first_name, "Augusta");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_children_are_replaced_not_merged() {
        let db = setup().await;
        let repo = LibSqlCardRepository::new(db.connection());

        let mut card = remote_card("10", "Ada");
        card.emails = vec![email("e1", "old@example.com"), email("e2", "other@example.com")];
        repo.upsert_many(&[card.clone()]).await.unwrap();

        card.emails = vec![email("e3", "new@example.com")];
        repo.upsert_many(&[card]).await.unwrap();

        let loaded = repo.get("10").await.unwrap().unwrap();
        let addresses: Vec<&str> = loaded.emails.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(addresses, vec!["new@example.com"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_hides_soft_deleted_and_orders_newest_first() {
        let db = setup().await;
        let repo = LibSqlCardRepository::new(db.connection());

        let older = remote_card("1", "Older");
        let mut newer = remote_card("2", "Newer");
        newer.updated_at += 1_000;
        let mut deleted = remote_card("3", "Gone");
        deleted.is_deleted = true;
        repo.upsert_many(&[older, newer, deleted]).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|card| card.first_name)
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
        assert!(repo.get("3").await.unwrap().unwrap().is_deleted);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_purge_and_clear_cascade_to_children() {
        let db = setup().await;
        let repo = LibSqlCardRepository::new(db.connection());

        let mut kept = remote_card("1", "Kept");
        kept.emails = vec![email("e1", "kept@example.com")];
        let mut dropped = remote_card("2", "Dropped");
        dropped.emails = vec![email("e2", "dropped@example.com")];
        repo.upsert_many(&[kept, dropped]).await.unwrap();

        assert_eq!(repo.purge_missing(&["1".to_string()]).await.unwrap(), 1);
        assert!(repo.get("2").await.unwrap().is_none());
        assert!(repo.load_emails("2").await.unwrap().is_empty());

        assert_eq!(repo.clear().await.unwrap(), 1);
        assert!(repo.list().await.unwrap().is_empty());
        assert!(repo.load_emails("1").await.unwrap().is_empty());
    }
}
