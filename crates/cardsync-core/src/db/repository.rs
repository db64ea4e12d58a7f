//! Repository trait shared by the cached entity kinds

use std::future::Future;

use libsql::{params::Params, Connection, Value};

use crate::error::Result;
use crate::models::Entity;

/// Rows written and purged by one [`EntityRepository::apply_snapshot`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotCounts {
    pub upserted: usize,
    pub purged: usize,
}

/// Storage operations for one entity kind (async)
#[allow(async_fn_in_trait)]
pub trait EntityRepository {
    type Entity: Entity;

    /// Table holding rows of this kind
    const TABLE: &'static str;

    fn connection(&self) -> &Connection;

    /// Insert or overwrite one entity. The caller owns the transaction.
    ///
    /// An entity matches an existing row by local id first, then by remote
    /// id. A match keeps the row's local id and overwrites every other
    /// field.
    async fn upsert_one(&self, entity: &Self::Entity) -> Result<()>;

    /// Get a single entity by local id, including soft-deleted rows
    async fn get(&self, id: &str) -> Result<Option<Self::Entity>>;

    /// List entities that are not soft-deleted, most recently updated first
    async fn list(&self) -> Result<Vec<Self::Entity>>;

    /// Insert or overwrite every entity in one transaction.
    ///
    /// Returns the number of entities written.
    async fn upsert_many(&self, entities: &[Self::Entity]) -> Result<usize> {
        with_transaction(self.connection(), async {
            for entity in entities {
                self.upsert_one(entity).await?;
            }
            Ok(entities.len())
        })
        .await
    }

    /// Upsert a full server listing and, when `purge_missing` is set, delete
    /// remote rows it no longer contains. Both steps share one transaction.
    async fn apply_snapshot(
        &self,
        entities: &[Self::Entity],
        purge_missing: bool,
    ) -> Result<SnapshotCounts> {
        let conn = self.connection();
        with_transaction(conn, async {
            for entity in entities {
                self.upsert_one(entity).await?;
            }

            let purged = if purge_missing {
                let remote_ids: Vec<String> = entities
                    .iter()
                    .filter_map(|entity| entity.remote_id().map(str::to_string))
                    .collect();
                purge_missing_remote(conn, Self::TABLE, &remote_ids).await?
            } else {
                0
            };

            Ok(SnapshotCounts {
                upserted: entities.len(),
                purged,
            })
        })
        .await
    }

    /// Hard delete rows whose remote id is not in `remote_ids`.
    ///
    /// Rows without a remote id are never touched.
    async fn purge_missing(&self, remote_ids: &[String]) -> Result<usize> {
        purge_missing_remote(self.connection(), Self::TABLE, remote_ids).await
    }

    /// Delete every row of this kind
    async fn clear(&self) -> Result<usize> {
        let deleted = self
            .connection()
            .execute(&format!("DELETE FROM {}", Self::TABLE), ())
            .await?;
        Ok(usize::try_from(deleted).unwrap_or(usize::MAX))
    }
}

/// Run `work` between `BEGIN` and `COMMIT`, rolling back on any error.
pub async fn with_transaction<T, F>(conn: &Connection, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    conn.execute("BEGIN TRANSACTION", ()).await?;

    match work.await {
        Ok(value) => {
            if let Err(e) = conn.execute("COMMIT", ()).await {
                conn.execute("ROLLBACK", ()).await.ok();
                return Err(e.into());
            }
            Ok(value)
        }
        Err(e) => {
            conn.execute("ROLLBACK", ()).await.ok();
            Err(e)
        }
    }
}

/// Delete rows of `table` carrying a remote id outside `remote_ids`.
pub async fn purge_missing_remote(
    conn: &Connection,
    table: &str,
    remote_ids: &[String],
) -> Result<usize> {
    let deleted = if remote_ids.is_empty() {
        conn.execute(
            &format!("DELETE FROM {table} WHERE remote_id IS NOT NULL"),
            (),
        )
        .await?
    } else {
        let placeholders = vec!["?"; remote_ids.len()].join(", ");
        let values = remote_ids
            .iter()
            .map(|id| Value::Text(id.clone()))
            .collect();
        conn.execute(
            &format!(
                "DELETE FROM {table} WHERE remote_id IS NOT NULL AND remote_id NOT IN ({placeholders})"
            ),
            Params::Positional(values),
        )
        .await?
    };

    usize::try_from(deleted).map_err(|e| crate::error::Error::Database(e.to_string()))
}

/// Find the local id of the first row matching any candidate, in order.
///
/// Each candidate is a `(column, value)` pair; absent values are skipped.
pub async fn find_local_id(
    conn: &Connection,
    table: &str,
    candidates: &[(&str, Option<&str>)],
) -> Result<Option<String>> {
    for (column, value) in candidates {
        let Some(value) = value else {
            continue;
        };
        let mut rows = conn
            .query(
                &format!("SELECT id FROM {table} WHERE {column} = ? LIMIT 1"),
                [*value],
            )
            .await?;
        if let Some(row) = rows.next().await? {
            return Ok(Some(row.get::<String>(0)?));
        }
    }
    Ok(None)
}

/// Child row position as stored in the database.
pub fn position(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
