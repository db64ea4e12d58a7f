//! cardsync-core - Core library for cardsync
//!
//! Pulls business cards, contacts, and leads from the ShareMyCard REST API,
//! normalizes the loosely typed payloads, and keeps them in a local libSQL
//! cache. The CLI is a thin layer over [`sync::SyncCoordinator`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod normalize;
pub mod remote;
pub mod sync;
pub mod util;
pub mod wire;

pub use error::{Error, Result};
pub use models::{Card, Contact, EntityKind, Lead};
pub use sync::{SyncCoordinator, SyncResult};
