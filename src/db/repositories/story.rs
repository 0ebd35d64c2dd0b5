use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::warn;

use crate::entities::{authors, stories, story_genres, users};
use crate::models::{AdminStoryRow, AuthorSummary, NewStory, RecentStory, Story, StoryQuery,
    StorySort};

pub struct StoryRepository {
    conn: DatabaseConnection,
}

fn map_story(
    model: stories::Model,
    author: Option<authors::Model>,
    genres: Vec<String>,
) -> Option<Story> {
    let Some(author) = author else {
        warn!("Story {} references missing author {}", model.id, model.author_id);
        return None;
    };

    Some(Story {
        id: model.id,
        title: model.title,
        description: model.description,
        content: model.content,
        author: AuthorSummary {
            id: author.id,
            name: author.name,
            avatar: author.avatar,
            rating: author.rating,
            stories_count: author.stories_count,
        },
        genres,
        rating: model.rating,
        views: model.views,
        likes: model.likes,
        comments_count: model.comments_count,
        reading_time: model.reading_time,
        published_at: model.published_at,
        created_by: model.created_by,
    })
}

async fn genres_for_stories<C: ConnectionTrait>(
    conn: &C,
    story_ids: &[i32],
) -> Result<HashMap<i32, Vec<String>>> {
    if story_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = story_genres::Entity::find()
        .filter(story_genres::Column::StoryId.is_in(story_ids.iter().copied()))
        .order_by_asc(story_genres::Column::Genre)
        .all(conn)
        .await
        .context("Failed to load story genres")?;

    let mut map: HashMap<i32, Vec<String>> = HashMap::new();
    for row in rows {
        map.entry(row.story_id).or_default().push(row.genre);
    }
    Ok(map)
}

impl StoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts the story, fans out its genre tags and bumps the author's
    /// story counter in one transaction. Returns None when the author does
    /// not exist.
    pub async fn create(&self, new_story: &NewStory) -> Result<Option<Story>> {
        let txn = self.conn.begin().await?;

        let Some(author) = authors::Entity::find_by_id(new_story.author_id)
            .one(&txn)
            .await
            .context("Failed to load author for story creation")?
        else {
            return Ok(None);
        };

        let published_at = chrono::Utc::now().to_rfc3339();

        let active = stories::ActiveModel {
            title: Set(new_story.title.clone()),
            description: Set(new_story.description.clone()),
            content: Set(new_story.content.clone()),
            author_id: Set(new_story.author_id),
            created_by: Set(new_story.created_by),
            rating: Set(0.0),
            views: Set(0),
            likes: Set(0),
            comments_count: Set(0),
            reading_time: Set(new_story.reading_time),
            published_at: Set(published_at),
            ..Default::default()
        };

        let story = active
            .insert(&txn)
            .await
            .context("Failed to insert story")?;

        let mut genres: Vec<String> = Vec::new();
        for genre in &new_story.genres {
            let genre = genre.trim();
            if genre.is_empty() || genres.iter().any(|g| g == genre) {
                continue;
            }
            genres.push(genre.to_string());
        }

        for genre in &genres {
            let tag = story_genres::ActiveModel {
                story_id: Set(story.id),
                genre: Set(genre.clone()),
            };
            story_genres::Entity::insert(tag)
                .exec(&txn)
                .await
                .context("Failed to insert story genre")?;
        }

        authors::Entity::update_many()
            .col_expr(
                authors::Column::StoriesCount,
                Expr::col(authors::Column::StoriesCount).add(1),
            )
            .filter(authors::Column::Id.eq(new_story.author_id))
            .exec(&txn)
            .await
            .context("Failed to bump author story count")?;

        txn.commit().await?;

        Ok(map_story(
            story,
            Some(authors::Model {
                stories_count: author.stories_count + 1,
                ..author
            }),
            genres,
        ))
    }

    pub async fn list(&self, query: &StoryQuery) -> Result<Vec<Story>> {
        let mut select = stories::Entity::find().find_also_related(authors::Entity);

        if let Some(genre) = &query.genre {
            select = select
                .join(JoinType::InnerJoin, stories::Relation::StoryGenres.def())
                .filter(story_genres::Column::Genre.eq(genre.as_str()));
        }

        select = match query.sort {
            StorySort::Latest => select
                .order_by_desc(stories::Column::PublishedAt)
                .order_by_desc(stories::Column::Id),
            StorySort::Popular => select.order_by_desc(stories::Column::Views),
            StorySort::Rating => select.order_by_desc(stories::Column::Rating),
        };

        let rows = select
            .all(&self.conn)
            .await
            .context("Failed to list stories")?;

        let ids: Vec<i32> = rows.iter().map(|(story, _)| story.id).collect();
        let mut genres = genres_for_stories(&self.conn, &ids).await?;

        Ok(rows
            .into_iter()
            .filter_map(|(story, author)| {
                let story_genres = genres.remove(&story.id).unwrap_or_default();
                map_story(story, author, story_genres)
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Story>> {
        let Some((story, author)) = stories::Entity::find_by_id(id)
            .find_also_related(authors::Entity)
            .one(&self.conn)
            .await
            .context("Failed to query story")?
        else {
            return Ok(None);
        };

        let mut genres = genres_for_stories(&self.conn, &[story.id]).await?;
        let story_genres = genres.remove(&story.id).unwrap_or_default();

        Ok(map_story(story, author, story_genres))
    }

    /// Newest-first page for the admin panel, with the submitting user's
    /// username joined in.
    pub async fn admin_list(&self, limit: u64, offset: u64) -> Result<(Vec<AdminStoryRow>, u64)> {
        let total = stories::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count stories")?;

        let rows = stories::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(stories::Column::PublishedAt)
            .order_by_desc(stories::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("Failed to list stories for admin")?;

        let list = rows
            .into_iter()
            .map(|(story, user)| AdminStoryRow {
                id: story.id,
                title: story.title,
                author: user.map(|u| u.username),
                views: story.views,
                likes: story.likes,
                comments_count: story.comments_count,
                published_at: story.published_at,
            })
            .collect();

        Ok((list, total))
    }

    pub async fn count(&self) -> Result<u64> {
        stories::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count stories")
    }

    pub async fn count_published_since(&self, cutoff: &str) -> Result<u64> {
        stories::Entity::find()
            .filter(stories::Column::PublishedAt.gt(cutoff))
            .count(&self.conn)
            .await
            .context("Failed to count recent stories")
    }

    pub async fn count_by_creator(&self, user_id: i32) -> Result<u64> {
        stories::Entity::find()
            .filter(stories::Column::CreatedBy.eq(user_id))
            .count(&self.conn)
            .await
            .context("Failed to count stories by creator")
    }

    /// The creator's newest stories, for the profile page.
    pub async fn recent_by_creator(&self, user_id: i32, limit: u64) -> Result<Vec<RecentStory>> {
        let rows = stories::Entity::find()
            .filter(stories::Column::CreatedBy.eq(user_id))
            .order_by_desc(stories::Column::PublishedAt)
            .order_by_desc(stories::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list recent stories")?;

        Ok(rows
            .into_iter()
            .map(|story| RecentStory {
                id: story.id,
                title: story.title,
                rating: story.rating,
                views: story.views,
                likes: story.likes,
                published_at: story.published_at,
            })
            .collect())
    }
}
