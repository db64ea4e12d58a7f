//! Canonical models for cached cards, contacts, and leads

mod card;
mod contact;
mod lead;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use card::{Address, Card, CardEmail, CardPhone, CardWebsite, EmailKind, PhoneKind};
pub use contact::{Contact, Provenance};
pub use lead::{Lead, LeadStatus};

/// The three kinds of records kept in the local cache, in sync order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Card,
    Contact,
    Lead,
}

impl EntityKind {
    /// Order in which a full sync pass visits each kind.
    pub const SYNC_ORDER: [Self; 3] = [Self::Card, Self::Contact, Self::Lead];

    /// Plural label used in messages and table names.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Card => "cards",
            Self::Contact => "contacts",
            Self::Lead => "leads",
        }
    }

    /// Human-readable name used in sync error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "business cards",
            Self::Contact | Self::Lead => self.plural(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Kind tag and server identity shared by every canonical entity.
pub trait Entity {
    const KIND: EntityKind;

    /// Server identity, when known
    fn remote_id(&self) -> Option<&str>;
}

/// Generate a new local identity (UUID v7, time-sortable).
#[must_use]
pub fn new_local_id() -> String {
    Uuid::now_v7().to_string()
}
