//! # quizmill-gen
//!
//! The duplicate-safe question generation pipeline for quizmill.
//!
//! This crate provides:
//! - [`GenerationOrchestrator`] — the retry state machine that turns a
//!   topic and difficulty into exactly one persisted, validated,
//!   de-duplicated question
//! - [`SimilarityIndex`] — vector-first duplicate detection with a
//!   fingerprint fallback over a bounded recent window
//! - [`PromptTemplate`] and [`GeneratorConfig`] — explicit configuration,
//!   no process-wide state
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quizmill_gen::{GenerationOrchestrator, GeneratorConfig, PromptTemplate};
//! use quizmill_inference::OllamaBackend;
//! use quizmill_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> quizmill_core::Result<()> {
//!     let backend = Arc::new(OllamaBackend::from_env());
//!     let db = Database::connect("postgres://localhost/quizmill").await?;
//!     let store = Arc::new(db.questions);
//!     let attempts = Arc::new(db.attempts);
//!
//!     let orchestrator = GenerationOrchestrator::new(
//!         backend.clone(),
//!         backend,
//!         store,
//!         attempts,
//!         PromptTemplate::default(),
//!         GeneratorConfig::from_env(),
//!     );
//!
//!     let question = orchestrator.generate_one("Algebra", "beginner", None).await?;
//!     println!("{}: {}", question.id, question.text);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dedup;
pub mod orchestrator;
pub mod prompt;

// Re-export core types
pub use quizmill_core::*;

pub use config::GeneratorConfig;
pub use dedup::{DedupConfig, SimilarityIndex};
pub use orchestrator::GenerationOrchestrator;
pub use prompt::PromptTemplate;
