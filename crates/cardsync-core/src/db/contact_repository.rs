//! Contact repository implementation

use libsql::{params, Connection, Row};

use crate::error::Result;
use crate::models::{Contact, Provenance};

use super::repository::{find_local_id, EntityRepository};

const CONTACT_COLUMNS: &str = "id, remote_id, lead_id, first_name, last_name, email, phone, \
     mobile_phone, company, job_title, address, city, state, zip_code, country, website, notes, \
     comments_from_lead, birthdate, photo_url, provenance, source_metadata, created_at, \
     updated_at, is_deleted";

/// libSQL implementation of `EntityRepository` for contacts
///
/// Besides local and remote id, a contact also matches a row that references
/// the same lead, as long as that row has no remote id yet or carries the
/// same one. A converted lead then never yields two contacts, while distinct
/// server contacts that share a lead stay distinct.
pub struct LibSqlContactRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlContactRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EntityRepository for LibSqlContactRepository<'_> {
    type Entity = Contact;

    const TABLE: &'static str = "contacts";

    fn connection(&self) -> &Connection {
        self.conn
    }

    async fn get(&self, id: &str) -> Result<Option<Contact>> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?"),
                [id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_contact(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Contact>> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {CONTACT_COLUMNS} FROM contacts WHERE is_deleted = 0 ORDER BY updated_at DESC"
                ),
                (),
            )
            .await?;

        let mut contacts = Vec::new();
        while let Some(row) = rows.next().await? {
            contacts.push(Self::parse_contact(&row)?);
        }
        Ok(contacts)
    }

    async fn upsert_one(&self, contact: &Contact) -> Result<()> {
        let matched = find_local_id(
            self.conn,
            "contacts",
            &[
                ("id", Some(contact.id.as_str())),
                ("remote_id", contact.remote_id.as_deref()),
            ],
        )
        .await?;
        let id = match matched {
            Some(id) => id,
            None => self
                .find_unclaimed_by_lead(contact)
                .await?
                .unwrap_or_else(|| contact.id.clone()),
        };

        self.conn
            .execute(
                &format!(
                    "INSERT INTO contacts ({CONTACT_COLUMNS})
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                     ON CONFLICT(id) DO UPDATE SET
                        remote_id = excluded.remote_id,
                        lead_id = excluded.lead_id,
                        first_name = excluded.first_name,
                        last_name = excluded.last_name,
                        email = excluded.email,
                        phone = excluded.phone,
                        mobile_phone = excluded.mobile_phone,
                        company = excluded.company,
                        job_title = excluded.job_title,
                        address = excluded.address,
                        city = excluded.city,
                        state = excluded.state,
                        zip_code = excluded.zip_code,
                        country = excluded.country,
                        website = excluded.website,
                        notes = excluded.notes,
                        comments_from_lead = excluded.comments_from_lead,
                        birthdate = excluded.birthdate,
                        photo_url = excluded.photo_url,
                        provenance = excluded.provenance,
                        source_metadata = excluded.source_metadata,
                        created_at = excluded.created_at,
                        updated_at = excluded.updated_at,
                        is_deleted = excluded.is_deleted"
                ),
                params![
                    id.as_str(),
                    contact.remote_id.clone(),
                    contact.lead_id.clone(),
                    contact.first_name.as_str(),
                    contact.last_name.as_str(),
                    contact.email.clone(),
                    contact.phone.clone(),
                    contact.mobile_phone.clone(),
                    contact.company.clone(),
                    contact.job_title.clone(),
                    contact.address.clone(),
                    contact.city.clone(),
                    contact.state.clone(),
                    contact.zip_code.clone(),
                    contact.country.clone(),
                    contact.website.clone(),
                    contact.notes.clone(),
                    contact.comments_from_lead.clone(),
                    contact.birthdate.clone(),
                    contact.photo_url.clone(),
                    contact.provenance.as_str(),
                    contact.source_metadata.clone(),
                    contact.created_at.as_str(),
                    contact.updated_at.as_str(),
                    i64::from(contact.is_deleted)
                ],
            )
            .await?;

        Ok(())
    }
}

impl LibSqlContactRepository<'_> {
    /// Local id of a row for the same lead that no other server contact owns.
    async fn find_unclaimed_by_lead(&self, contact: &Contact) -> Result<Option<String>> {
        let Some(lead_id) = contact.lead_id.as_deref() else {
            return Ok(None);
        };
        let mut rows = self
            .conn
            .query(
                "SELECT id FROM contacts
                 WHERE lead_id = ? AND (remote_id IS NULL OR remote_id = ?)
                 LIMIT 1",
                params![lead_id, contact.remote_id.clone()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    fn parse_contact(row: &Row) -> Result<Contact> {
        Ok(Contact {
            id: row.get(0)?,
            remote_id: row.get(1)?,
            lead_id: row.get(2)?,
            first_name: row.get(3)?,
            last_name: row.get(4)?,
            email: row.get(5)?,
            phone: row.get(6)?,
            mobile_phone: row.get(7)?,
            company: row.get(8)?,
            job_title: row.get(9)?,
            address: row.get(10)?,
            city: row.get(11)?,
            state: row.get(12)?,
            zip_code: row.get(13)?,
            country: row.get(14)?,
            website: row.get(15)?,
            notes: row.get(16)?,
            comments_from_lead: row.get(17)?,
            birthdate: row.get(18)?,
            photo_url: row.get(19)?,
            provenance: Provenance::from(row.get::<String>(20)?),
            source_metadata: row.get(21)?,
            created_at: row.get(22)?,
            updated_at: row.get(23)?,
            is_deleted: row.get::<i64>(24)? != 0,
        })
    }
}
