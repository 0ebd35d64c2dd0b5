//! `SeaORM` implementation of the `InteractionService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::models::{Comment, NewComment};
use crate::services::interaction_service::{InteractionError, InteractionService, LikeOutcome};

pub struct SeaOrmInteractionService {
    store: Store,
}

impl SeaOrmInteractionService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl InteractionService for SeaOrmInteractionService {
    async fn like(&self, story_id: i32, user_id: i32) -> Result<LikeOutcome, InteractionError> {
        let (liked_now, likes) = self
            .store
            .like_story(story_id, user_id)
            .await?
            .ok_or(InteractionError::StoryNotFound)?;

        Ok(LikeOutcome { liked_now, likes })
    }

    async fn comment(&self, new_comment: NewComment) -> Result<Comment, InteractionError> {
        self.store
            .add_comment(&new_comment)
            .await?
            .ok_or(InteractionError::StoryNotFound)
    }

    async fn view(&self, story_id: i32) -> Result<i32, InteractionError> {
        self.store
            .record_view(story_id)
            .await?
            .ok_or(InteractionError::StoryNotFound)
    }

    async fn comments(&self, story_id: i32) -> Result<Vec<Comment>, InteractionError> {
        Ok(self.store.comments_for_story(story_id).await?)
    }
}
