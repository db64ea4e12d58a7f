//! Full-pass sync of cards, contacts, and leads.
//!
//! A pass visits each kind in [`EntityKind::SYNC_ORDER`]: fetch, normalize,
//! then upsert and optionally purge rows the server no longer lists, both in
//! one transaction. A failing kind is recorded and the pass moves on; nothing
//! escapes [`SyncCoordinator::run_full_sync`] as an error.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::config::ClientConfig;
use crate::db::{
    Database, EntityRepository, LibSqlCardRepository, LibSqlContactRepository,
    LibSqlLeadRepository, SnapshotCounts,
};
use crate::models::{Entity, EntityKind};
use crate::normalize::{Normalize, Normalizer};
use crate::remote::{Envelope, RemoteEntityClient, RemoteResult};

pub const ALREADY_RUNNING_MESSAGE: &str = "already in progress";
pub const SUCCESS_MESSAGE: &str = "Sync completed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Hard delete cached rows whose remote id is absent from the fetched list
    pub purge_missing: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            purge_missing: true,
        }
    }
}

impl From<&ClientConfig> for SyncOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            purge_missing: config.purge_missing,
        }
    }
}

/// Counts for one kind that synced without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindSummary {
    pub kind: EntityKind,
    pub fetched: usize,
    pub upserted: usize,
    pub purged: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    pub succeeded: bool,
    pub message: String,
    /// One message per failed kind, in sync order
    pub errors: Vec<String>,
    pub summaries: Vec<KindSummary>,
    /// Set when the call found another pass already running
    pub skipped: bool,
}

impl SyncResult {
    fn already_running() -> Self {
        Self {
            succeeded: false,
            message: ALREADY_RUNNING_MESSAGE.to_string(),
            errors: Vec::new(),
            summaries: Vec::new(),
            skipped: true,
        }
    }

    fn completed(summaries: Vec<KindSummary>, errors: Vec<String>) -> Self {
        let message = if errors.is_empty() {
            SUCCESS_MESSAGE.to_string()
        } else {
            format!(
                "Sync completed with {} error(s): {}",
                errors.len(),
                errors.join(", ")
            )
        };

        Self {
            succeeded: errors.is_empty(),
            message,
            errors,
            summaries,
            skipped: false,
        }
    }
}

/// Clears the running flag when dropped, including when the pass future is
/// dropped mid-flight.
struct RunningGuard<'a>(&'a AtomicBool);

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs full sync passes from a remote client into the local cache.
///
/// At most one pass runs per coordinator; a concurrent call returns a
/// skipped result immediately instead of waiting.
pub struct SyncCoordinator<C> {
    client: C,
    database: Database,
    options: SyncOptions,
    running: AtomicBool,
}

impl<C: RemoteEntityClient> SyncCoordinator<C> {
    pub fn new(client: C, database: Database) -> Self {
        Self {
            client,
            database,
            options: SyncOptions::default(),
            running: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> SyncState {
        if self.running.load(Ordering::Acquire) {
            SyncState::Running
        } else {
            SyncState::Idle
        }
    }

    pub const fn database(&self) -> &Database {
        &self.database
    }

    pub const fn client(&self) -> &C {
        &self.client
    }

    pub async fn run_full_sync(&self) -> SyncResult {
        let Some(_guard) = RunningGuard::acquire(&self.running) else {
            tracing::info!("Sync requested while another pass is running; skipping");
            return SyncResult::already_running();
        };

        tracing::info!("Starting full sync");
        let normalizer = Normalizer::new();
        let conn = self.database.connection();
        let mut summaries = Vec::new();
        let mut errors = Vec::new();

        for kind in EntityKind::SYNC_ORDER {
            let outcome = match kind {
                EntityKind::Card => {
                    self.sync_kind(
                        &normalizer,
                        self.client.list_cards(),
                        &LibSqlCardRepository::new(conn),
                    )
                    .await
                }
                EntityKind::Contact => {
                    self.sync_kind(
                        &normalizer,
                        self.client.list_contacts(),
                        &LibSqlContactRepository::new(conn),
                    )
                    .await
                }
                EntityKind::Lead => {
                    self.sync_kind(
                        &normalizer,
                        self.client.list_leads(),
                        &LibSqlLeadRepository::new(conn),
                    )
                    .await
                }
            };

            match outcome {
                Ok(summary) => summaries.push(summary),
                Err(detail) => {
                    let error = format!("Failed to sync {}: {detail}", kind.label());
                    tracing::warn!("{error}");
                    errors.push(error);
                }
            }
        }

        let result = SyncResult::completed(summaries, errors);
        tracing::info!("Full sync complete: {}", result.message);
        result
    }

    /// Fetch, normalize, and store one kind. Errors come back as text.
    async fn sync_kind<W, R>(
        &self,
        normalizer: &Normalizer,
        fetch: impl Future<Output = RemoteResult<Envelope<W>>>,
        repository: &R,
    ) -> std::result::Result<KindSummary, String>
    where
        R: EntityRepository,
        W: Normalize<Output = R::Entity>,
    {
        let kind = <R::Entity as Entity>::KIND;

        let envelope = fetch.await.map_err(|e| e.to_string())?;
        if !envelope.succeeded {
            return Err(envelope
                .message
                .unwrap_or_else(|| "server reported failure".to_string()));
        }
        let records = envelope
            .records
            .ok_or_else(|| "response contained no data".to_string())?;

        let entities: Vec<R::Entity> = records
            .iter()
            .map(|record| record.normalize(normalizer))
            .collect();

        let SnapshotCounts { upserted, purged } = repository
            .apply_snapshot(&entities, self.options.purge_missing)
            .await
            .map_err(|e| e.to_string())?;

        tracing::debug!(
            "Synced {kind}: fetched {}, upserted {upserted}, purged {purged}",
            records.len()
        );

        Ok(KindSummary {
            kind,
            fetched: records.len(),
            upserted,
            purged,
        })
    }
}
