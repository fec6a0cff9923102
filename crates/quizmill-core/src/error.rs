//! Error types for quizmill.

use thiserror::Error;

/// Result type alias using quizmill's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural validation failure for a provider candidate.
///
/// Each variant corresponds to one validation rule; the rules are applied
/// in order and the first failure wins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Question text is empty after trimming.
    #[error("question text is empty")]
    EmptyText,

    /// Fewer than two answer choices.
    #[error("expected at least 2 choices, got {0}")]
    TooFewChoices(usize),

    /// The candidate carries no correct answer at all.
    #[error("correct answer is missing")]
    MissingAnswer,

    /// The correct answer is neither a valid choice index nor an exact
    /// member of the choice list.
    #[error("correct answer is not one of the choices")]
    AnswerNotInChoices,

    /// Estimated answering time must be a positive number of seconds.
    #[error("estimated time must be positive, got {0}")]
    InvalidEstimatedTime(i64),
}

/// Core error type for quizmill operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Question not found
    #[error("Question not found: {0}")]
    QuestionNotFound(uuid::Uuid),

    /// Completion provider failed or returned malformed output
    #[error("Completion error: {0}")]
    Completion(String),

    /// Embedding provider failed or returned malformed output
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Candidate failed structural validation
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// All generation attempts exhausted; carries the last underlying error
    #[error("Generation failed after {attempts} attempts: {last}")]
    Generation { attempts: u32, last: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
