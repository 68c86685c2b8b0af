//! Database access layer
//!
//! Read-only repositories over the POS tables. Each repository sits behind a
//! trait so the report service can run against PostgreSQL or an in-memory
//! source.

pub mod repository;

use shared::error::AppError;
use shared::models::UnknownVariant;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::core::Config;

/// Repository error
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row carried enum text this service does not understand
    #[error("corrupt row: {0}")]
    Corrupt(#[from] UnknownVariant),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(e) => {
                tracing::error!(error = %e, "Repository query failed");
                AppError::database(e.to_string())
            }
            RepoError::Corrupt(e) => {
                tracing::error!(error = %e, "Repository row could not be decoded");
                AppError::database(e.to_string())
            }
        }
    }
}

/// Open the PostgreSQL pool
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.request_timeout)
        .connect(&config.database_url)
        .await?;
    tracing::info!(
        max_connections = config.db_max_connections,
        "PostgreSQL pool connected"
    );
    Ok(pool)
}
