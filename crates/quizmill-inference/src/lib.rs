//! # quizmill-inference
//!
//! Completion and embedding provider backends for quizmill.
//!
//! This crate provides:
//! - Ollama implementation of the completion and embedding backends
//! - Candidate parsing from best-effort JSON provider output
//! - Pure cosine similarity usable without any network call
//! - A deterministic mock backend for tests
//!
//! # Feature Flags
//!
//! - `ollama` (default): Enable the Ollama backend
//! - `mock`: Expose the mock backend outside of tests
//!
//! # Example
//!
//! ```rust,no_run
//! use quizmill_inference::OllamaBackend;
//! use quizmill_core::CompletionBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OllamaBackend::from_env();
//!     let raw = backend.complete("Write a question about algebra").await.unwrap();
//!     let candidate = quizmill_inference::parse_candidate(&raw).unwrap();
//! }
//! ```

pub mod candidate;
pub mod similarity;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use quizmill_core::*;

pub use candidate::parse_candidate;
pub use similarity::cosine_similarity;

#[cfg(feature = "ollama")]
pub use ollama::OllamaBackend;
