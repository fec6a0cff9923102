//! # quizmill-core
//!
//! Core types, traits, and abstractions for the quizmill question
//! generation pipeline.
//!
//! This crate provides:
//! - The candidate/question data model shared by every other crate
//! - The structural validator that gates everything the provider returns
//! - Backend traits for completion and embedding providers
//! - Repository traits for the question corpus and the attempt audit log
//! - The shared error type and `Result` alias
//!
//! # Example
//!
//! ```
//! use quizmill_core::{validator, AnswerRef, Candidate};
//!
//! let candidate = Candidate {
//!     text: "What is 2+2?".to_string(),
//!     choices: vec!["3".into(), "4".into()],
//!     correct_answer: Some(AnswerRef::Index(1)),
//!     explanation: None,
//!     estimated_time_seconds: None,
//! };
//!
//! let question = validator::validate(&candidate, "Algebra", "beginner").unwrap();
//! assert_eq!(question.correct_answer, "4");
//! ```

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;
pub mod validator;

pub use error::{Error, Result, SchemaError};
pub use models::{
    AnswerRef, AttemptLog, Candidate, DuplicateReason, NewAttemptLog, SimilarHit,
    SimilarityVerdict, ValidatedQuestion, Vector,
};
pub use traits::{AttemptLogRepository, CompletionBackend, EmbeddingBackend, QuestionRepository};
pub use uuid_utils::new_v7;
pub use validator::validate;
