//! Local cache storage for cardsync

mod card_repository;
mod connection;
mod contact_repository;
mod lead_repository;
mod migrations;
mod repository;

pub use card_repository::LibSqlCardRepository;
pub use connection::Database;
pub use contact_repository::LibSqlContactRepository;
pub use lead_repository::LibSqlLeadRepository;
pub use repository::{EntityRepository, SnapshotCounts};
