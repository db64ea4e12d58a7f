//! Contact model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Entity, EntityKind};

/// Where a contact came from.
///
/// `Other` keeps any explicit source string the server sent (for example
/// `qr_scan` or `referral`) verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Provenance {
    #[default]
    Manual,
    Converted,
    Other(String),
}

impl Provenance {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manual => "manual",
            Self::Converted => "converted",
            Self::Other(source) => source,
        }
    }
}

impl From<String> for Provenance {
    fn from(value: String) -> Self {
        match value.as_str() {
            "manual" => Self::Manual,
            "converted" => Self::Converted,
            _ => Self::Other(value),
        }
    }
}

impl From<Provenance> for String {
    fn from(value: Provenance) -> Self {
        match value {
            Provenance::Other(source) => source,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contact as cached locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub remote_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub comments_from_lead: Option<String>,
    pub birthdate: Option<String>,
    pub photo_url: Option<String>,
    pub provenance: Provenance,
    pub source_metadata: Option<String>,
    /// Lead this contact was converted from
    pub lead_id: Option<String>,
    /// Server timestamp, passed through as received
    pub created_at: String,
    /// Server timestamp, passed through as received
    pub updated_at: String,
    pub is_deleted: bool,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Full name, else the email, else a placeholder.
    pub fn display_name(&self) -> String {
        let full_name = self.full_name();
        if !full_name.is_empty() {
            return full_name;
        }
        self.email
            .clone()
            .unwrap_or_else(|| "Unknown Contact".to_string())
    }
}

impl Entity for Contact {
    const KIND: EntityKind = EntityKind::Contact;

    fn remote_id(&self) -> Option<&str> {
        self.remote_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_round_trips_through_strings() {
        assert_eq!(Provenance::from("manual".to_string()), Provenance::Manual);
        assert_eq!(
            Provenance::from("converted".to_string()),
            Provenance::Converted
        );
        assert_eq!(
            Provenance::from("qr_scan".to_string()),
            Provenance::Other("qr_scan".to_string())
        );
        assert_eq!(String::from(Provenance::Other("referral".into())), "referral");
    }

    #[test]
    fn provenance_serializes_as_plain_string() {
        let json = serde_json::to_string(&Provenance::Converted).unwrap();
        assert_eq!(json, "\"converted\"");
    }
}
