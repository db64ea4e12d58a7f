//! Lead repository implementation

use libsql::{params, Connection, Row};

use crate::error::Result;
use crate::models::{Lead, LeadStatus};

use super::repository::{find_local_id, EntityRepository};

const LEAD_COLUMNS: &str = "id, remote_id, first_name, last_name, full_name, email, work_phone, \
     mobile_phone, street_address, city, state, zip_code, country, organization_name, job_title, \
     birthdate, website, photo_url, comments_from_lead, card_first_name, card_last_name, \
     card_company, card_job_title, qr_title, qr_type, status, created_at, updated_at, is_deleted";

/// libSQL implementation of `EntityRepository` for leads
pub struct LibSqlLeadRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlLeadRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EntityRepository for LibSqlLeadRepository<'_> {
    type Entity = Lead;

    const TABLE: &'static str = "leads";

    fn connection(&self) -> &Connection {
        self.conn
    }

    async fn get(&self, id: &str) -> Result<Option<Lead>> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?"),
                [id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_lead(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Lead>> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {LEAD_COLUMNS} FROM leads WHERE is_deleted = 0 ORDER BY updated_at DESC"
                ),
                (),
            )
            .await?;

        let mut leads = Vec::new();
        while let Some(row) = rows.next().await? {
            leads.push(Self::parse_lead(&row)?);
        }
        Ok(leads)
    }

    async fn upsert_one(&self, lead: &Lead) -> Result<()> {
        let id = find_local_id(
            self.conn,
            "leads",
            &[
                ("id", Some(lead.id.as_str())),
                ("remote_id", lead.remote_id.as_deref()),
            ],
        )
        .await?
        .unwrap_or_else(|| lead.id.clone());

        self.conn
            .execute(
                &format!(
                    "INSERT INTO leads ({LEAD_COLUMNS})
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                     ON CONFLICT(id) DO UPDATE SET
                        remote_id = excluded.remote_id,
                        first_name = excluded.first_name,
                        last_name = excluded.last_name,
                        full_name = excluded.full_name,
                        email = excluded.email,
                        work_phone = excluded.work_phone,
                        mobile_phone = excluded.mobile_phone,
                        street_address = excluded.street_address,
                        city = excluded.city,
                        state = excluded.state,
                        zip_code = excluded.zip_code,
                        country = excluded.country,
                        organization_name = excluded.organization_name,
                        job_title = excluded.job_title,
                        birthdate = excluded.birthdate,
                        website = excluded.website,
                        photo_url = excluded.photo_url,
                        comments_from_lead = excluded.comments_from_lead,
                        card_first_name = excluded.card_first_name,
                        card_last_name = excluded.card_last_name,
                        card_company = excluded.card_company,
                        card_job_title = excluded.card_job_title,
                        qr_title = excluded.qr_title,
                        qr_type = excluded.qr_type,
                        status = excluded.status,
                        created_at = excluded.created_at,
                        updated_at = excluded.updated_at,
                        is_deleted = excluded.is_deleted"
                ),
                params![
                    id.as_str(),
                    lead.remote_id.clone(),
                    lead.first_name.as_str(),
                    lead.last_name.as_str(),
                    lead.full_name.clone(),
                    lead.email.clone(),
                    lead.work_phone.clone(),
                    lead.mobile_phone.clone(),
                    lead.street_address.clone(),
                    lead.city.clone(),
                    lead.state.clone(),
                    lead.zip_code.clone(),
                    lead.country.clone(),
                    lead.organization_name.clone(),
                    lead.job_title.clone(),
                    lead.birthdate.clone(),
                    lead.website.clone(),
                    lead.photo_url.clone(),
                    lead.comments_from_lead.clone(),
                    lead.card_first_name.clone(),
                    lead.card_last_name.clone(),
                    lead.card_company.clone(),
                    lead.card_job_title.clone(),
                    lead.qr_title.clone(),
                    lead.qr_type.clone(),
                    lead.status.as_str(),
                    lead.created_at.as_str(),
                    lead.updated_at.as_str(),
                    i64::from(lead.is_deleted)
                ],
            )
            .await?;

        Ok(())
    }
}

impl LibSqlLeadRepository<'_> {
    fn parse_lead(row: &Row) -> Result<Lead> {
        let status: String = row.get(25)?;
        Ok(Lead {
            id: row.get(0)?,
            remote_id: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            full_name: row.get(4)?,
            email: row.get(5)?,
            work_phone: row.get(6)?,
            mobile_phone: row.get(7)?,
            street_address: row.get(8)?,
            city: row.get(9)?,
            state: row.get(10)?,
            zip_code: row.get(11)?,
            country: row.get(12)?,
            organization_name: row.get(13)?,
            job_title: row.get(14)?,
            birthdate: row.get(15)?,
            website: row.get(16)?,
            photo_url: row.get(17)?,
            comments_from_lead: row.get(18)?,
            card_first_name: row.get(19)?,
            card_last_name: row.get(20)?,
            card_company: row.get(21)?,
            card_job_title: row.get(22)?,
            qr_title: row.get(23)?,
            qr_type: row.get(24)?,
            status: LeadStatus::from_wire(Some(status.as_str())),
            created_at: row.get(26)?,
            updated_at: row.get(27)?,
            is_deleted: row.get::<i64>(28)? != 0,
        })
    }
}
