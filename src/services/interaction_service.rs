//! Domain service for story interactions: likes, comments, views.

use thiserror::Error;

use crate::models::{Comment, NewComment};

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("Story not found")]
    StoryNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for InteractionError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for InteractionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result of a like attempt. `liked_now` is false when the user had already
/// liked the story, in which case the counter did not move.
#[derive(Debug, Clone, Copy)]
pub struct LikeOutcome {
    pub liked_now: bool,
    pub likes: i32,
}

#[async_trait::async_trait]
pub trait InteractionService: Send + Sync {
    /// Records a like; the (story, user) pair counts at most once.
    async fn like(&self, story_id: i32, user_id: i32) -> Result<LikeOutcome, InteractionError>;

    /// Adds a comment and bumps the story's comment counter.
    async fn comment(&self, new_comment: NewComment) -> Result<Comment, InteractionError>;

    /// Unconditionally bumps the view counter; returns the new count.
    async fn view(&self, story_id: i32) -> Result<i32, InteractionError>;

    /// Comments for a story, newest first.
    async fn comments(&self, story_id: i32) -> Result<Vec<Comment>, InteractionError>;
}
