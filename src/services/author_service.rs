//! Domain service for the author catalog.

use thiserror::Error;

use crate::models::Author;

#[derive(Debug, Error)]
pub enum AuthorError {
    #[error("Author not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthorError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait AuthorService: Send + Sync {
    async fn list(&self) -> Result<Vec<Author>, AuthorError>;

    /// # Errors
    ///
    /// Returns [`AuthorError::NotFound`] for an unknown id.
    async fn get(&self, id: i32) -> Result<Author, AuthorError>;

    /// Authors by follower count, highest first, truncated to `limit`.
    async fn top(&self, limit: u64) -> Result<Vec<Author>, AuthorError>;
}
