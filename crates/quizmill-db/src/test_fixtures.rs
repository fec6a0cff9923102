//! Test fixtures for integration tests.
//!
//! Always compiled so integration tests (in tests/) can use
//! `DEFAULT_TEST_DATABASE_URL`.

use quizmill_core::{new_v7, ValidatedQuestion};

/// Database URL used by live-database integration tests when
/// `DATABASE_URL` is not set.
pub const DEFAULT_TEST_DATABASE_URL: &str = "postgres://localhost/quizmill_test";

/// Resolve the integration-test database URL from the environment.
pub fn test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string())
}

/// Build a minimal valid question for inserting in tests.
pub fn sample_question(topic: &str, text: &str) -> ValidatedQuestion {
    ValidatedQuestion {
        id: new_v7(),
        topic: topic.to_string(),
        difficulty: "beginner".to_string(),
        text: text.to_string(),
        choices: vec!["a".to_string(), "b".to_string()],
        correct_answer: "a".to_string(),
        explanation: None,
        estimated_time_seconds: 60,
        metadata: serde_json::json!({}),
        created_at: chrono::Utc::now(),
    }
}
