//! Core traits for quizmill abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend for text completion (LLM).
///
/// The pipeline treats the provider as a black box: prompt in, best-effort
/// JSON-shaped text out. Parsing and validation happen downstream.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is available and responding.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

/// Backend for generating text embeddings.
///
/// This is the only pipeline component allowed to fail due to an external
/// provider outage; callers fall back to the fingerprint strategy.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Generate embeddings for the given texts.
    ///
    /// Returns a vector of embedding vectors, one per input text.
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>>;

    /// Get the expected dimension of embedding vectors.
    fn dimension(&self) -> usize;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

// =============================================================================
// CONTENT STORE TRAITS
// =============================================================================

/// Repository for the validated, de-duplicated question corpus.
///
/// The corpus is the only shared mutable resource in the pipeline: read by
/// the similarity index, written on persist. No transaction spans the
/// duplicate-check-then-insert gap.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a validated question. Returns the stored id.
    async fn insert(&self, question: &ValidatedQuestion) -> Result<Uuid>;

    /// Fetch a question by id.
    async fn fetch(&self, id: Uuid) -> Result<ValidatedQuestion>;

    /// Check if a question exists.
    async fn exists(&self, id: Uuid) -> Result<bool>;

    /// List the most recently created questions, newest first, optionally
    /// restricted to a topic. Backs the fingerprint duplicate check.
    async fn list_recent(&self, topic: Option<&str>, limit: i64)
        -> Result<Vec<ValidatedQuestion>>;

    /// Find the k stored questions nearest to `query_vec` by cosine
    /// similarity, descending, optionally restricted to a topic.
    async fn find_nearest(
        &self,
        query_vec: &Vector,
        k: i64,
        topic: Option<&str>,
    ) -> Result<Vec<SimilarHit>>;

    /// Attach (or replace) the embedding stored for a question.
    async fn attach_embedding(&self, question_id: Uuid, vector: &Vector, model: &str)
        -> Result<()>;
}

/// Repository for the append-only generation attempt log.
///
/// Rows are created on every attempt regardless of outcome, never updated
/// or deleted.
#[async_trait]
pub trait AttemptLogRepository: Send + Sync {
    /// Append one attempt-log row. Returns the new row's id.
    async fn append(&self, entry: NewAttemptLog) -> Result<Uuid>;

    /// List the most recent attempt rows, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<AttemptLog>>;

    /// Total number of logged attempts.
    async fn count(&self) -> Result<i64>;
}
