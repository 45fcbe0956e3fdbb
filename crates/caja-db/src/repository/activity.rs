//! # Activity Log Repository
//!
//! Who-did-what audit rows. Written inside the same transaction as the
//! operation they record, so a rolled-back operation leaves no trace here
//! either.

use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use caja_core::ActivityEntry;

/// Repository for the activity log.
#[derive(Debug, Clone)]
pub struct ActivityLogRepository {
    pool: SqlitePool,
}

impl ActivityLogRepository {
    /// Creates a new ActivityLogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ActivityLogRepository { pool }
    }

    /// Lists a user's activity, newest first.
    pub async fn list_recent(&self, user_id: &str, limit: u32) -> DbResult<Vec<ActivityEntry>> {
        let entries = sqlx::query_as::<_, ActivityEntry>(
            r#"
            SELECT id, user_id, action, entity_type, entity_id, details, created_at
            FROM activity_log
            WHERE user_id = ?1
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Appends an activity row on the given executor.
    pub async fn insert<'e, E>(&self, executor: E, entry: &ActivityEntry) -> DbResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(user_id = %entry.user_id, action = ?entry.action, "Recording activity");

        sqlx::query(
            r#"
            INSERT INTO activity_log (
                id, user_id, action, entity_type, entity_id, details, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(entry.action)
        .bind(&entry.entity_type)
        .bind(&entry.entity_id)
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(executor)
        .await?;

        Ok(())
    }
}
