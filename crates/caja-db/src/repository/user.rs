//! # User Repository
//!
//! Database operations for users. The engine does not authenticate anyone;
//! it stores users so product ownership, sale attribution, and the audit
//! trail have rows to reference.

use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use caja_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        self.fetch(&self.pool, id).await
    }

    /// Gets a user by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, role, manager_id, created_at
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by ID on the given executor (composes into transactions).
    pub async fn fetch<'e, E>(&self, executor: E, id: &str) -> DbResult<Option<User>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, role, manager_id, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - username already taken
    pub async fn insert<'e, E>(&self, executor: E, user: &User) -> DbResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(id = %user.id, username = %user.username, "Inserting user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, role, manager_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(user.role)
        .bind(&user.manager_id)
        .bind(user.created_at)
        .execute(executor)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let db_err: DbError = e.into();
                if let DbError::UniqueViolation { .. } = db_err {
                    Err(DbError::duplicate("username", &user.username))
                } else {
                    Err(db_err)
                }
            }
        }
    }

    /// Counts users (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
