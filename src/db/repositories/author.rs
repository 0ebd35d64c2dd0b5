use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};

use crate::entities::authors;
use crate::models::Author;

pub struct AuthorRepository {
    conn: DatabaseConnection,
}

fn map_author(model: authors::Model) -> Author {
    Author {
        id: model.id,
        name: model.name,
        avatar: model.avatar,
        bio: model.bio,
        rating: model.rating,
        stories_count: model.stories_count,
        followers: model.followers,
    }
}

impl AuthorRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Author>> {
        let rows = authors::Entity::find()
            .order_by_asc(authors::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list authors")?;

        Ok(rows.into_iter().map(map_author).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Author>> {
        let row = authors::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query author")?;

        Ok(row.map(map_author))
    }

    /// Authors ordered by follower count, highest first.
    pub async fn top(&self, limit: u64) -> Result<Vec<Author>> {
        let rows = authors::Entity::find()
            .order_by_desc(authors::Column::Followers)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list top authors")?;

        Ok(rows.into_iter().map(map_author).collect())
    }
}
