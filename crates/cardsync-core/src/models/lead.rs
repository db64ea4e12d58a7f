//! Lead model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Entity, EntityKind};

/// Lead lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Converted,
}

impl LeadStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Converted => "converted",
        }
    }

    /// `converted` (any case) is converted; everything else is a new lead.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some(status) if status.trim().eq_ignore_ascii_case("converted") => Self::Converted,
            _ => Self::New,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lead captured through a card or custom QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub remote_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub work_phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub organization_name: Option<String>,
    pub job_title: Option<String>,
    pub birthdate: Option<String>,
    pub website: Option<String>,
    pub photo_url: Option<String>,
    pub comments_from_lead: Option<String>,
    // Snapshot of the card that captured the lead
    pub card_first_name: Option<String>,
    pub card_last_name: Option<String>,
    pub card_company: Option<String>,
    pub card_job_title: Option<String>,
    // Snapshot of the custom QR code that captured the lead
    pub qr_title: Option<String>,
    pub qr_type: Option<String>,
    pub status: LeadStatus,
    pub created_at: String,
    pub updated_at: String,
    pub is_deleted: bool,
}

impl Lead {
    pub fn display_name(&self) -> String {
        if let Some(full_name) = self.full_name.as_deref().filter(|name| !name.is_empty()) {
            return full_name.to_string();
        }
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub const fn is_converted(&self) -> bool {
        matches!(self.status, LeadStatus::Converted)
    }

    /// Describes what captured the lead: the card owner, or the QR code.
    pub fn source_label(&self) -> String {
        if let (Some(first), Some(last)) = (&self.card_first_name, &self.card_last_name) {
            return format!("{first} {last}");
        }
        let qr_type = self.qr_type.as_deref().map(capitalize);
        match (self.qr_title.as_deref().filter(|title| !title.is_empty()), qr_type) {
            (Some(title), qr_type) => {
                format!("QR {}: {title}", qr_type.as_deref().unwrap_or("Custom"))
            }
            (None, Some(qr_type)) => format!("QR {qr_type}"),
            (None, None) => "Unknown Card".to_string(),
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

impl Entity for Lead {
    const KIND: EntityKind = EntityKind::Lead;

    fn remote_id(&self) -> Option<&str> {
        self.remote_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> Lead {
        Lead {
            id: "42".to_string(),
            remote_id: Some("42".to_string()),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            full_name: None,
            email: None,
            work_phone: None,
            mobile_phone: None,
            street_address: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            organization_name: None,
            job_title: None,
            birthdate: None,
            website: None,
            photo_url: None,
            comments_from_lead: None,
            card_first_name: None,
            card_last_name: None,
            card_company: None,
            card_job_title: None,
            qr_title: None,
            qr_type: None,
            status: LeadStatus::New,
            created_at: String::new(),
            updated_at: String::new(),
            is_deleted: false,
        }
    }

    #[test]
    fn status_from_wire_only_recognizes_converted() {
        assert_eq!(LeadStatus::from_wire(Some("Converted")), LeadStatus::Converted);
        assert_eq!(LeadStatus::from_wire(Some("new")), LeadStatus::New);
        assert_eq!(LeadStatus::from_wire(Some("archived")), LeadStatus::New);
        assert_eq!(LeadStatus::from_wire(None), LeadStatus::New);
    }

    #[test]
    fn display_name_prefers_full_name() {
        let mut lead = lead();
        assert_eq!(lead.display_name(), "Grace Hopper");
        lead.full_name = Some("Rear Admiral Hopper".to_string());
        assert_eq!(lead.display_name(), "Rear Admiral Hopper");
    }

    #[test]
    fn source_label_describes_card_or_qr() {
        let mut lead = lead();
        assert_eq!(lead.source_label(), "Unknown Card");

        lead.qr_type = Some("event".to_string());
        assert_eq!(lead.source_label(), "QR Event");

        lead.qr_title = Some("Booth 12".to_string());
        assert_eq!(lead.source_label(), "QR Event: Booth 12");

        lead.card_first_name = Some("Ada".to_string());
        lead.card_last_name = Some("Lovelace".to_string());
        assert_eq!(lead.source_label(), "Ada Lovelace");
    }
}
