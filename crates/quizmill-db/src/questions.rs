//! Question repository implementation.

use async_trait::async_trait;
use pgvector::Vector;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use quizmill_core::{
    new_v7, Error, QuestionRepository, Result, SimilarHit, ValidatedQuestion,
};

/// PostgreSQL implementation of [`QuestionRepository`].
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn question_from_row(row: &sqlx::postgres::PgRow) -> Result<ValidatedQuestion> {
    let choices: JsonValue = row.get("choices");
    Ok(ValidatedQuestion {
        id: row.get("id"),
        topic: row.get("topic"),
        difficulty: row.get("difficulty"),
        text: row.get("text"),
        choices: serde_json::from_value(choices)?,
        correct_answer: row.get("correct_answer"),
        explanation: row.get("explanation"),
        estimated_time_seconds: row.get("estimated_time_seconds"),
        metadata: row.get("metadata"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    async fn insert(&self, question: &ValidatedQuestion) -> Result<Uuid> {
        sqlx::query(
            "INSERT INTO question
                 (id, topic, difficulty, text, choices, correct_answer,
                  explanation, estimated_time_seconds, metadata, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(question.id)
        .bind(&question.topic)
        .bind(&question.difficulty)
        .bind(&question.text)
        .bind(serde_json::to_value(&question.choices)?)
        .bind(&question.correct_answer)
        .bind(&question.explanation)
        .bind(question.estimated_time_seconds)
        .bind(&question.metadata)
        .bind(question.created_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(question.id)
    }

    async fn fetch(&self, id: Uuid) -> Result<ValidatedQuestion> {
        let row = sqlx::query(
            "SELECT id, topic, difficulty, text, choices, correct_answer,
                    explanation, estimated_time_seconds, metadata, created_at
             FROM question
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::QuestionNotFound(id))?;

        question_from_row(&row)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let row = sqlx::query("SELECT 1 AS one FROM question WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.is_some())
    }

    async fn list_recent(
        &self,
        topic: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ValidatedQuestion>> {
        let rows = sqlx::query(
            "SELECT id, topic, difficulty, text, choices, correct_answer,
                    explanation, estimated_time_seconds, metadata, created_at
             FROM question
             WHERE ($1::text IS NULL OR topic = $1)
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(topic)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(question_from_row).collect()
    }

    async fn find_nearest(
        &self,
        query_vec: &Vector,
        k: i64,
        topic: Option<&str>,
    ) -> Result<Vec<SimilarHit>> {
        let rows = sqlx::query(
            "SELECT q.id AS question_id,
                    1.0 - (e.vector <=> $1::vector) AS score
             FROM question_embedding e
             JOIN question q ON q.id = e.question_id
             WHERE ($2::text IS NULL OR q.topic = $2)
             ORDER BY e.vector <=> $1::vector
             LIMIT $3",
        )
        .bind(query_vec)
        .bind(topic)
        .bind(k)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| SimilarHit {
                question_id: row.get("question_id"),
                score: row.get::<f64, _>("score") as f32,
            })
            .collect())
    }

    async fn attach_embedding(
        &self,
        question_id: Uuid,
        vector: &Vector,
        model: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO question_embedding (id, question_id, vector, model)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (question_id)
             DO UPDATE SET vector = EXCLUDED.vector, model = EXCLUDED.model",
        )
        .bind(new_v7())
        .bind(question_id)
        .bind(vector)
        .bind(model)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }
}
