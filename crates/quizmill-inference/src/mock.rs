//! Mock inference backend for deterministic testing.
//!
//! Provides scripted completion responses, switchable embedding failures,
//! and hash-seeded deterministic embeddings: identical texts always embed
//! to identical vectors (cosine 1.0), distinct texts to uncorrelated ones.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quizmill_inference::mock::MockBackend;
//! use quizmill_core::CompletionBackend;
//!
//! let backend = MockBackend::new().with_dimension(16);
//! backend.push_completion(r#"{"question":"Q","options":["a","b"],"correctAnswer":"a"}"#);
//! let raw = backend.complete("prompt").await.unwrap();
//! assert!(raw.contains("question"));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quizmill_core::{CompletionBackend, EmbeddingBackend, Error, Result, Vector};

/// One recorded call against the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

/// Scripted completion outcome.
enum Scripted {
    Response(String),
    Failure(String),
}

/// Mock completion + embedding backend for testing.
#[derive(Clone)]
pub struct MockBackend {
    dimension: usize,
    completions: Arc<Mutex<VecDeque<Scripted>>>,
    default_response: Arc<String>,
    embeddings_down: Arc<AtomicBool>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            dimension: 16,
            completions: Arc::new(Mutex::new(VecDeque::new())),
            default_response: Arc::new(
                r#"{"question":"Mock question?","options":["a","b"],"correctAnswer":"a"}"#
                    .to_string(),
            ),
            embeddings_down: Arc::new(AtomicBool::new(false)),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the embedding dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the response returned when no scripted completion is queued.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = Arc::new(response.into());
        self
    }

    /// Queue a scripted completion response (FIFO).
    pub fn push_completion(&self, response: impl Into<String>) {
        self.completions
            .lock()
            .unwrap()
            .push_back(Scripted::Response(response.into()));
    }

    /// Queue a scripted completion failure (FIFO).
    pub fn push_completion_error(&self, message: impl Into<String>) {
        self.completions
            .lock()
            .unwrap()
            .push_back(Scripted::Failure(message.into()));
    }

    /// Make every subsequent `embed_texts` call fail (provider outage).
    pub fn set_embeddings_down(&self, down: bool) {
        self.embeddings_down.store(down, Ordering::SeqCst);
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of completion calls recorded so far.
    pub fn completion_calls(&self) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == "complete")
            .count()
    }

    /// Deterministic embedding for a text: hash-seeded pseudo-random
    /// components in `[-1, 1]`.
    pub fn embedding_for(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish() | 1;

        (0..self.dimension)
            .map(|_| {
                // xorshift64
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state as f64 / u64::MAX as f64) as f32 * 2.0 - 1.0
            })
            .collect()
    }

    fn record(&self, operation: &str, input: &str) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
        });
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.record("complete", prompt);
        match self.completions.lock().unwrap().pop_front() {
            Some(Scripted::Response(r)) => Ok(r),
            Some(Scripted::Failure(msg)) => Err(Error::Completion(msg)),
            None => Ok(self.default_response.as_ref().clone()),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn model_name(&self) -> &str {
        "mock-gen"
    }
}

#[async_trait]
impl EmbeddingBackend for MockBackend {
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
        for text in texts {
            self.record("embed", text);
        }
        if self.embeddings_down.load(Ordering::SeqCst) {
            return Err(Error::Embedding("mock embedding provider down".to_string()));
        }
        Ok(texts
            .iter()
            .map(|t| Vector::from(self.embedding_for(t)))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "mock-embed"
    }
}
