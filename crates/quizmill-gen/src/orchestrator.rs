//! The generation state machine: request a candidate, validate it, check
//! it against the similarity index, retry on failure, persist on success.

use std::sync::Arc;

use serde_json::{json, Value as JsonValue};
use tokio::time::sleep;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use quizmill_core::{
    validator, AttemptLogRepository, CompletionBackend, EmbeddingBackend, Error, NewAttemptLog,
    QuestionRepository, Result, ValidatedQuestion,
};
use quizmill_inference::parse_candidate;

use crate::config::GeneratorConfig;
use crate::dedup::{embedding_input, SimilarityIndex};
use crate::prompt::PromptTemplate;

/// Outcome of one attempt inside the retry loop.
enum AttemptOutcome {
    /// Question validated, de-duplicated, and persisted.
    Done(ValidatedQuestion),
    /// Non-fatal failure; the loop may request a fresh candidate.
    Retry(String),
    /// Terminal failure surfaced to the caller immediately.
    Fatal(Error),
}

/// Top-level orchestrator for duplicate-safe question generation.
pub struct GenerationOrchestrator {
    completions: Arc<dyn CompletionBackend>,
    embeddings: Arc<dyn EmbeddingBackend>,
    store: Arc<dyn QuestionRepository>,
    attempts: Arc<dyn AttemptLogRepository>,
    index: SimilarityIndex,
    prompts: PromptTemplate,
    config: GeneratorConfig,
}

impl GenerationOrchestrator {
    /// Create a new orchestrator. The prompt template and config are
    /// explicit values; there is no process-wide state.
    pub fn new(
        completions: Arc<dyn CompletionBackend>,
        embeddings: Arc<dyn EmbeddingBackend>,
        store: Arc<dyn QuestionRepository>,
        attempts: Arc<dyn AttemptLogRepository>,
        prompts: PromptTemplate,
        config: GeneratorConfig,
    ) -> Self {
        let index = SimilarityIndex::new(embeddings.clone(), store.clone(), config.dedup.clone());
        Self {
            completions,
            embeddings,
            store,
            attempts,
            index,
            prompts,
            config,
        }
    }

    /// Generate, validate, de-duplicate, and persist one question.
    ///
    /// Retries up to `config.max_attempts` times on provider errors,
    /// validation errors, and duplicate verdicts, waiting
    /// `backoff_ms * attempt` between attempts. Question-insert failures
    /// are terminal and not retried. Every attempt appends exactly one
    /// attempt-log row.
    ///
    /// Concurrent calls are not coordinated: two callers can both pass the
    /// duplicate check before either persists, so near-duplicate pairs can
    /// land under contention. The recent-window check is best-effort, not
    /// linearizable.
    #[instrument(
        skip(self),
        fields(subsystem = "gen", component = "orchestrator", op = "generate_one")
    )]
    pub async fn generate_one(
        &self,
        topic: &str,
        difficulty: &str,
        requester_id: Option<Uuid>,
    ) -> Result<ValidatedQuestion> {
        let prompt = self.prompts.render(topic, difficulty);
        let params = json!({
            "topic": topic,
            "difficulty": difficulty,
            "requester_id": requester_id,
        });

        let mut last_error = String::new();
        for attempt in 1..=self.config.max_attempts {
            match self.attempt_once(&prompt, &params, topic, difficulty).await {
                AttemptOutcome::Done(question) => {
                    info!(
                        question_id = %question.id,
                        topic = %topic,
                        difficulty = %difficulty,
                        attempt = attempt,
                        "Question generated"
                    );
                    return Ok(question);
                }
                AttemptOutcome::Fatal(e) => return Err(e),
                AttemptOutcome::Retry(message) => {
                    warn!(
                        topic = %topic,
                        difficulty = %difficulty,
                        attempt = attempt,
                        error = %message,
                        "Generation attempt failed"
                    );
                    last_error = message;
                    if attempt < self.config.max_attempts {
                        sleep(self.config.backoff_for(attempt)).await;
                    }
                }
            }
        }

        Err(Error::Generation {
            attempts: self.config.max_attempts,
            last: last_error,
        })
    }

    async fn attempt_once(
        &self,
        prompt: &str,
        params: &JsonValue,
        topic: &str,
        difficulty: &str,
    ) -> AttemptOutcome {
        let raw = match self.completions.complete(prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                let message = e.to_string();
                self.log_attempt(prompt, params, None, false, Some(&message))
                    .await;
                return AttemptOutcome::Retry(message);
            }
        };

        let candidate = match parse_candidate(&raw) {
            Ok(candidate) => candidate,
            Err(e) => {
                let message = e.to_string();
                self.log_attempt(prompt, params, Some(&raw), false, Some(&message))
                    .await;
                return AttemptOutcome::Retry(message);
            }
        };

        let question = match validator::validate(&candidate, topic, difficulty) {
            Ok(question) => question,
            Err(e) => {
                let message = e.to_string();
                self.log_attempt(prompt, params, Some(&raw), false, Some(&message))
                    .await;
                return AttemptOutcome::Retry(message);
            }
        };

        let verdict = self
            .index
            .find_duplicate(&question.text, &question.choices, Some(topic), None)
            .await;
        if verdict.is_duplicate {
            let reason = verdict
                .reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let message = format!("duplicate:{}", reason);
            self.log_attempt(prompt, params, Some(&raw), false, Some(&message))
                .await;
            return AttemptOutcome::Retry(message);
        }

        if let Err(e) = self.store.insert(&question).await {
            self.log_attempt(prompt, params, Some(&raw), false, Some(&e.to_string()))
                .await;
            return AttemptOutcome::Fatal(e);
        }

        self.log_attempt(prompt, params, Some(&raw), true, None).await;
        self.attach_embedding(&question).await;

        AttemptOutcome::Done(question)
    }

    /// Append one attempt-log row. The audit write is best-effort: a
    /// failed append is logged and swallowed rather than turning the
    /// attempt itself into a failure.
    async fn log_attempt(
        &self,
        prompt: &str,
        params: &JsonValue,
        response: Option<&str>,
        success: bool,
        error: Option<&str>,
    ) {
        let entry = NewAttemptLog {
            prompt: prompt.to_string(),
            params: params.clone(),
            model: self.completions.model_name().to_string(),
            response: response.map(String::from),
            success,
            error: error.map(String::from),
        };

        if let Err(e) = self.attempts.append(entry).await {
            warn!(
                subsystem = "gen",
                component = "orchestrator",
                error = %e,
                "Failed to append attempt log"
            );
        }
    }

    /// Best-effort embedding attachment after a successful persist, so the
    /// corpus grows richer for future duplicate checks. Failure never rolls
    /// back or fails the stored question.
    async fn attach_embedding(&self, question: &ValidatedQuestion) {
        if !self.config.dedup.vector_index_enabled {
            return;
        }

        let input = embedding_input(&question.text, &question.choices);
        let vector = match self.embeddings.embed_texts(&[input]).await {
            Ok(mut vectors) if !vectors.is_empty() => vectors.remove(0),
            Ok(_) => {
                warn!(
                    question_id = %question.id,
                    "Embedding provider returned no vector, skipping attachment"
                );
                return;
            }
            Err(e) => {
                warn!(
                    question_id = %question.id,
                    error = %e,
                    "Embedding failed, question stored without vector"
                );
                return;
            }
        };

        if let Err(e) = self
            .store
            .attach_embedding(question.id, &vector, self.embeddings.model_name())
            .await
        {
            warn!(
                question_id = %question.id,
                error = %e,
                "Failed to store embedding, question stored without vector"
            );
        }
    }
}
