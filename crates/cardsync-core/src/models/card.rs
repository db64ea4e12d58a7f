//! Business card model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{new_local_id, Entity, EntityKind};

/// Category of an email address on a card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    Work,
    Personal,
    #[default]
    Other,
}

impl EmailKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Other => "other",
        }
    }

    /// Case-insensitive match against the email vocabulary, falling back to `Other`.
    pub fn from_wire(value: Option<&str>) -> Self {
        value.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for EmailKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown email type: {other}")),
        }
    }
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a phone number on a card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneKind {
    #[default]
    Mobile,
    Work,
    Home,
    Other,
}

impl PhoneKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Work => "work",
            Self::Home => "home",
            Self::Other => "other",
        }
    }

    /// Case-insensitive match against the phone vocabulary, falling back to `Mobile`.
    pub fn from_wire(value: Option<&str>) -> Self {
        value.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for PhoneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "work" => Ok(Self::Work),
            "home" => Ok(Self::Home),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown phone type: {other}")),
        }
    }
}

impl fmt::Display for PhoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEmail {
    pub id: String,
    pub email: String,
    pub kind: EmailKind,
    pub label: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPhone {
    pub id: String,
    pub phone_number: String,
    pub kind: PhoneKind,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardWebsite {
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: Option<String>,
    pub is_primary: bool,
}

/// Postal address attached to a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// True when no field carries a value.
    pub const fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
            && self.country.is_none()
    }

    /// Single-line rendering of the non-empty parts.
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// A business card as cached locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Local identity
    pub id: String,
    /// Server identity, present only once the card is known to the server
    pub remote_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub theme: Option<String>,
    pub profile_photo_path: Option<String>,
    pub company_logo_path: Option<String>,
    pub cover_graphic_path: Option<String>,
    pub emails: Vec<CardEmail>,
    pub phones: Vec<CardPhone>,
    pub websites: Vec<CardWebsite>,
    pub address: Option<Address>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
    pub is_active: bool,
    /// Soft delete flag mirrored from the server
    pub is_deleted: bool,
}

impl Card {
    /// Create a local-only card that has no server counterpart yet.
    #[must_use]
    pub fn new_local(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: new_local_id(),
            remote_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: String::new(),
            company_name: None,
            job_title: None,
            bio: None,
            theme: None,
            profile_photo_path: None,
            company_logo_path: None,
            cover_graphic_path: None,
            emails: Vec::new(),
            phones: Vec::new(),
            websites: Vec::new(),
            address: None,
            created_at: now,
            updated_at: now,
            is_active: true,
            is_deleted: false,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Primary email, else the first work email, else the first email.
    pub fn primary_email(&self) -> Option<&CardEmail> {
        self.emails
            .iter()
            .find(|email| email.is_primary)
            .or_else(|| {
                self.emails
                    .iter()
                    .find(|email| email.kind == EmailKind::Work)
            })
            .or_else(|| self.emails.first())
    }
}

impl Entity for Card {
    const KIND: EntityKind = EntityKind::Card;

    fn remote_id(&self) -> Option<&str> {
        self.remote_id.as_deref()
    }
}
