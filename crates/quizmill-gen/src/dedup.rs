//! Duplicate detection over the stored question corpus.
//!
//! Two strategies: a vector nearest-neighbour check (preferred) and a
//! fingerprint scan over a bounded recent window (fallback). The vector
//! path degrades to the fingerprint path on any error; an indeterminate
//! check never blocks generation, so `find_duplicate` is infallible.

use std::sync::Arc;

use tracing::{debug, warn};

use quizmill_core::{
    defaults, DuplicateReason, EmbeddingBackend, QuestionRepository, Result, SimilarityVerdict,
};

/// Configuration for the duplicate check.
#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Whether the vector strategy is attempted at all.
    pub vector_index_enabled: bool,
    /// Cosine similarity at or above which the best match is a duplicate.
    pub threshold: f32,
    /// Neighbours fetched per vector check; only the top hit is compared
    /// to the threshold.
    pub nearest_k: i64,
    /// Fingerprint scan window. Duplicates older than this are not
    /// detected, trading recall for bounded cost.
    pub recent_window: i64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            vector_index_enabled: true,
            threshold: defaults::SIMILARITY_THRESHOLD,
            nearest_k: defaults::NEAREST_K,
            recent_window: defaults::RECENT_WINDOW,
        }
    }
}

impl DedupConfig {
    /// Create config from environment variables (with defaults).
    pub fn from_env() -> Self {
        let vector_index_enabled = std::env::var("QUIZMILL_VECTOR_INDEX")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let threshold = std::env::var("QUIZMILL_SIMILARITY_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(defaults::SIMILARITY_THRESHOLD);

        let recent_window = std::env::var("QUIZMILL_RECENT_WINDOW")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(defaults::RECENT_WINDOW);

        let nearest_k = std::env::var("QUIZMILL_NEAREST_K")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(defaults::NEAREST_K);

        Self {
            vector_index_enabled,
            threshold,
            nearest_k,
            recent_window,
        }
    }

    /// Enable or disable the vector strategy.
    pub fn with_vector_index(mut self, enabled: bool) -> Self {
        self.vector_index_enabled = enabled;
        self
    }

    /// Set the similarity threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// The text the embedding provider sees for one question: text and choices
/// concatenated. Shared between the duplicate check and the post-persist
/// embedding attachment so stored and queried vectors line up.
pub fn embedding_input(text: &str, choices: &[String]) -> String {
    format!("{} {}", text, choices.join(" "))
}

/// Normalize text for fingerprint comparison: lowercase, strip
/// non-alphanumerics, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized, pipe-joined choice list for fingerprint comparison.
pub fn choice_fingerprint(choices: &[String]) -> String {
    choices
        .iter()
        .map(|c| normalize_text(c))
        .collect::<Vec<_>>()
        .join("|")
}

/// Duplicate finder over the stored corpus.
///
/// Owns no durable state; both strategies query the repository's existing
/// records.
pub struct SimilarityIndex {
    embeddings: Arc<dyn EmbeddingBackend>,
    store: Arc<dyn QuestionRepository>,
    config: DedupConfig,
}

impl SimilarityIndex {
    /// Create a new index.
    pub fn new(
        embeddings: Arc<dyn EmbeddingBackend>,
        store: Arc<dyn QuestionRepository>,
        config: DedupConfig,
    ) -> Self {
        Self {
            embeddings,
            store,
            config,
        }
    }

    /// Judge whether a candidate duplicates an already-stored question.
    ///
    /// `threshold` overrides the configured similarity threshold for this
    /// call. Never fails: vector-path errors fall back to the fingerprint
    /// strategy, and a fingerprint-path error yields "not a duplicate".
    pub async fn find_duplicate(
        &self,
        text: &str,
        choices: &[String],
        topic: Option<&str>,
        threshold: Option<f32>,
    ) -> SimilarityVerdict {
        let threshold = threshold.unwrap_or(self.config.threshold);

        if self.config.vector_index_enabled {
            match self.vector_verdict(text, choices, topic, threshold).await {
                Ok(verdict) => return verdict,
                Err(e) => {
                    warn!(
                        subsystem = "dedup",
                        component = "similarity_index",
                        error = %e,
                        "Vector duplicate check failed, falling back to fingerprint"
                    );
                }
            }
        }

        match self.fingerprint_verdict(text, choices, topic).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(
                    subsystem = "dedup",
                    component = "similarity_index",
                    error = %e,
                    "Fingerprint duplicate check failed, treating candidate as unique"
                );
                SimilarityVerdict::unique()
            }
        }
    }

    async fn vector_verdict(
        &self,
        text: &str,
        choices: &[String],
        topic: Option<&str>,
        threshold: f32,
    ) -> Result<SimilarityVerdict> {
        let input = embedding_input(text, choices);
        let vectors = self.embeddings.embed_texts(&[input]).await?;
        let query = vectors
            .first()
            .ok_or_else(|| quizmill_core::Error::Embedding("provider returned no vector".into()))?;

        let hits = self
            .store
            .find_nearest(query, self.config.nearest_k, topic)
            .await?;

        // Top-1 only; no aggregation across the k candidates.
        if let Some(best) = hits.first() {
            debug!(
                subsystem = "dedup",
                component = "similarity_index",
                score = best.score,
                result_count = hits.len(),
                "Vector duplicate check scored"
            );
            if best.score >= threshold {
                return Ok(SimilarityVerdict::duplicate(
                    DuplicateReason::EmbeddingMatch,
                    best.question_id,
                    best.score,
                ));
            }
        }

        Ok(SimilarityVerdict::unique())
    }

    async fn fingerprint_verdict(
        &self,
        text: &str,
        choices: &[String],
        topic: Option<&str>,
    ) -> Result<SimilarityVerdict> {
        let recent = self
            .store
            .list_recent(topic, self.config.recent_window)
            .await?;

        let text_fp = normalize_text(text);
        for existing in &recent {
            if normalize_text(&existing.text) == text_fp {
                return Ok(SimilarityVerdict::duplicate(
                    DuplicateReason::ExactText,
                    existing.id,
                    1.0,
                ));
            }
        }

        let choices_fp = choice_fingerprint(choices);
        for existing in &recent {
            if choice_fingerprint(&existing.choices) == choices_fp {
                return Ok(SimilarityVerdict::duplicate(
                    DuplicateReason::ChoiceSetMatch,
                    existing.id,
                    1.0,
                ));
            }
        }

        Ok(SimilarityVerdict::unique())
    }
}
