//! Domain service for the story catalog.

use thiserror::Error;

use crate::models::{NewStory, Story, StoryQuery};

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Story not found")]
    NotFound,

    #[error("Author not found")]
    AuthorNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for StoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for StoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait StoryService: Send + Sync {
    /// Stories matching the genre filter, in the requested order.
    async fn list(&self, query: StoryQuery) -> Result<Vec<Story>, StoryError>;

    /// # Errors
    ///
    /// Returns [`StoryError::NotFound`] for an unknown id.
    async fn get(&self, id: i32) -> Result<Story, StoryError>;

    /// Publishes a story: inserts it, fans out genre tags and bumps the
    /// author's story counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoryError::AuthorNotFound`] for an unknown author id.
    async fn create(&self, new_story: NewStory) -> Result<Story, StoryError>;
}
