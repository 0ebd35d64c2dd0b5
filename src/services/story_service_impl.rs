//! `SeaORM` implementation of the `StoryService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::models::{NewStory, Story, StoryQuery};
use crate::services::story_service::{StoryError, StoryService};

pub struct SeaOrmStoryService {
    store: Store,
}

impl SeaOrmStoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StoryService for SeaOrmStoryService {
    async fn list(&self, query: StoryQuery) -> Result<Vec<Story>, StoryError> {
        Ok(self.store.list_stories(&query).await?)
    }

    async fn get(&self, id: i32) -> Result<Story, StoryError> {
        self.store.get_story(id).await?.ok_or(StoryError::NotFound)
    }

    async fn create(&self, new_story: NewStory) -> Result<Story, StoryError> {
        let story = self
            .store
            .create_story(&new_story)
            .await?
            .ok_or(StoryError::AuthorNotFound)?;

        tracing::info!("Published story {} ({})", story.id, story.title);

        Ok(story)
    }
}
