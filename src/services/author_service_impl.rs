//! `SeaORM` implementation of the `AuthorService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::models::Author;
use crate::services::author_service::{AuthorError, AuthorService};

pub struct SeaOrmAuthorService {
    store: Store,
}

impl SeaOrmAuthorService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthorService for SeaOrmAuthorService {
    async fn list(&self) -> Result<Vec<Author>, AuthorError> {
        Ok(self.store.list_authors().await?)
    }

    async fn get(&self, id: i32) -> Result<Author, AuthorError> {
        self.store
            .get_author(id)
            .await?
            .ok_or(AuthorError::NotFound)
    }

    async fn top(&self, limit: u64) -> Result<Vec<Author>, AuthorError> {
        Ok(self.store.top_authors(limit).await?)
    }
}
