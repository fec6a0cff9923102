//! Attempt-log repository implementation.
//!
//! `generation_attempt` is append-only: one row per generation attempt
//! regardless of outcome, never updated or deleted.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use quizmill_core::{new_v7, AttemptLog, AttemptLogRepository, Error, NewAttemptLog, Result};

/// PostgreSQL implementation of [`AttemptLogRepository`].
pub struct PgAttemptLogRepository {
    pool: PgPool,
}

impl PgAttemptLogRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptLogRepository for PgAttemptLogRepository {
    async fn append(&self, entry: NewAttemptLog) -> Result<Uuid> {
        let id = new_v7();
        sqlx::query(
            "INSERT INTO generation_attempt
                 (id, prompt, params, model, response, success, error, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(id)
        .bind(&entry.prompt)
        .bind(&entry.params)
        .bind(&entry.model)
        .bind(&entry.response)
        .bind(entry.success)
        .bind(&entry.error)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AttemptLog>> {
        let rows = sqlx::query(
            "SELECT id, prompt, params, model, response, success, error, created_at
             FROM generation_attempt
             ORDER BY created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| AttemptLog {
                id: row.get("id"),
                prompt: row.get("prompt"),
                params: row.get("params"),
                model: row.get("model"),
                response: row.get("response"),
                success: row.get("success"),
                error: row.get("error"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM generation_attempt")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.get("n"))
    }
}
