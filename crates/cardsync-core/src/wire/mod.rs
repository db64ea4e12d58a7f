//! Raw records as the server sends them.
//!
//! Each struct lists every field name the server has used for a concept,
//! including legacy aliases. Collapsing aliases into one canonical field is
//! the normalizer's job, not the decoder's.

pub mod lenient;

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireCard {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub bio: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub theme: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub profile_photo_path: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company_logo_path: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub cover_graphic_path: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub emails: Vec<WireEmail>,
    #[serde(deserialize_with = "lenient::list")]
    pub phones: Vec<WirePhone>,
    #[serde(deserialize_with = "lenient::list")]
    pub websites: Vec<WireWebsite>,
    #[serde(deserialize_with = "lenient::object")]
    pub address: Option<WireAddress>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_active: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_deleted: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireEmail {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WirePhone {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub phone_number: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireWebsite {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireAddress {
    #[serde(deserialize_with = "lenient::text")]
    pub street: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub postal_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireContact {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(rename = "id_lead", deserialize_with = "lenient::id")]
    pub lead_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email_primary: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub work_phone: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub phone_primary: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub mobile_phone: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub organization_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub street_address: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub address_line1: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub state_province: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub postal_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub website_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub notes: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub comments_from_lead: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub birthdate: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub photo_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub source_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub source_metadata: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_deleted: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireLead {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email_primary: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub work_phone: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub mobile_phone: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub street_address: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub organization_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub birthdate: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub website_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub photo_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub comments_from_lead: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub card_first_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub card_last_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub card_company: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub card_job_title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub qr_title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub qr_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_deleted: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub updated_at: Option<String>,
}
