//! # quizmill-db
//!
//! PostgreSQL database layer for quizmill.
//!
//! This crate provides:
//! - Connection pool management
//! - The question-corpus repository (insert, recent window, pgvector
//!   nearest-neighbour lookup, embedding attachment)
//! - The append-only generation-attempt log repository
//!
//! ## Example
//!
//! ```rust,ignore
//! use quizmill_db::Database;
//! use quizmill_core::QuestionRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/quizmill").await?;
//!     let recent = db.questions.list_recent(Some("Algebra"), 10).await?;
//!     println!("{} recent questions", recent.len());
//!     Ok(())
//! }
//! ```

pub mod attempts;
pub mod pool;
pub mod questions;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use quizmill_core::*;

pub use attempts::PgAttemptLogRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use questions::PgQuestionRepository;

use sqlx::PgPool;

/// Facade bundling the repositories over one connection pool.
pub struct Database {
    pool: PgPool,
    pub questions: PgQuestionRepository,
    pub attempts: PgAttemptLogRepository,
}

impl Database {
    /// Connect with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with_config(database_url, PoolConfig::default()).await
    }

    /// Connect with custom pool configuration.
    pub async fn connect_with_config(database_url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(database_url, config).await?;
        Ok(Self::from_pool(pool))
    }

    /// Build a `Database` over an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            questions: PgQuestionRepository::new(pool.clone()),
            attempts: PgAttemptLogRepository::new(pool.clone()),
            pool,
        }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run embedded schema migrations.
    #[cfg(feature = "migrations")]
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}
