//! Centralized default constants for the quizmill system.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates should reference these constants instead of defining their
//! own magic numbers.

// =============================================================================
// GENERATION
// =============================================================================

/// Maximum provider attempts per `generate_one` call.
pub const MAX_ATTEMPTS: u32 = 3;

/// Base backoff between attempts in milliseconds; the wait is
/// `BACKOFF_MS * attempt` (linear).
pub const BACKOFF_MS: u64 = 300;

/// Default answering time in seconds when the provider omits one.
pub const ESTIMATED_TIME_SECS: i32 = 60;

// =============================================================================
// DEDUPLICATION
// =============================================================================

/// Cosine similarity at or above which the best vector match is a duplicate.
pub const SIMILARITY_THRESHOLD: f32 = 0.87;

/// Nearest neighbours fetched per vector duplicate check.
pub const NEAREST_K: i64 = 5;

/// How many recent records the fingerprint fallback scans. Duplicates
/// older than this window are not detected, trading recall for bounded
/// cost.
pub const RECENT_WINDOW: i64 = 500;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Ollama base URL.
pub const OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default generation model name (Ollama).
pub const GEN_MODEL: &str = "gpt-oss:20b";

/// Default embedding model name (Ollama).
pub const EMBED_MODEL: &str = "nomic-embed-text";

/// Default embedding vector dimension for nomic-embed-text.
pub const EMBED_DIMENSION: usize = 768;

/// Timeout for embedding requests in seconds.
pub const EMBED_TIMEOUT_SECS: u64 = 30;

/// Timeout for generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 120;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_defaults() {
        assert_eq!(MAX_ATTEMPTS, 3);
        assert_eq!(BACKOFF_MS, 300);
    }

    #[test]
    fn test_dedup_defaults() {
        assert!(SIMILARITY_THRESHOLD > 0.0 && SIMILARITY_THRESHOLD < 1.0);
        assert_eq!(NEAREST_K, 5);
        assert_eq!(RECENT_WINDOW, 500);
    }

    #[test]
    fn test_time_default_is_positive() {
        assert!(ESTIMATED_TIME_SECS > 0);
    }
}
