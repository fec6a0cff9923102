//! Configuration for the generation pipeline.

use std::time::Duration;

use quizmill_core::defaults;

use crate::dedup::DedupConfig;

/// Configuration for the generation orchestrator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Maximum provider attempts per `generate_one` call.
    pub max_attempts: u32,
    /// Base backoff in milliseconds; the wait before retry N+1 is
    /// `backoff_ms * N` (linear).
    pub backoff_ms: u64,
    /// Duplicate-check configuration.
    pub dedup: DedupConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::MAX_ATTEMPTS,
            backoff_ms: defaults::BACKOFF_MS,
            dedup: DedupConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `QUIZMILL_MAX_ATTEMPTS` | `3` | Provider attempts per call |
    /// | `QUIZMILL_BACKOFF_MS` | `300` | Linear backoff base |
    /// | `QUIZMILL_VECTOR_INDEX` | `true` | Enable the vector strategy |
    /// | `QUIZMILL_SIMILARITY_THRESHOLD` | `0.87` | Duplicate threshold |
    /// | `QUIZMILL_RECENT_WINDOW` | `500` | Fingerprint scan window |
    /// | `QUIZMILL_NEAREST_K` | `5` | Neighbours per vector check |
    pub fn from_env() -> Self {
        let max_attempts = std::env::var("QUIZMILL_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults::MAX_ATTEMPTS)
            .max(1);

        let backoff_ms = std::env::var("QUIZMILL_BACKOFF_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::BACKOFF_MS);

        Self {
            max_attempts,
            backoff_ms,
            dedup: DedupConfig::from_env(),
        }
    }

    /// Set the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the backoff base in milliseconds.
    pub fn with_backoff_ms(mut self, ms: u64) -> Self {
        self.backoff_ms = ms;
        self
    }

    /// Replace the duplicate-check configuration.
    pub fn with_dedup(mut self, dedup: DedupConfig) -> Self {
        self.dedup = dedup;
        self
    }

    /// Cooperative wait before the attempt after `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_ms * u64::from(attempt))
    }
}
