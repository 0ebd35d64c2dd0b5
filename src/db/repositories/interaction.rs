use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::{comments, likes, stories};
use crate::models::{Comment, NewComment};

pub struct InteractionRepository {
    conn: DatabaseConnection,
}

fn map_comment(model: comments::Model) -> Comment {
    Comment {
        id: model.id,
        story_id: model.story_id,
        user_id: model.user_id,
        user_name: model.user_name,
        text: model.text,
        likes: model.likes,
        created_at: model.created_at,
    }
}

impl InteractionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Records a like. The (story, user) pair is inserted at most once; the
    /// story counter moves only when the row was actually inserted. Returns
    /// `(inserted, current_likes)`, or None when the story does not exist.
    pub async fn like(&self, story_id: i32, user_id: i32) -> Result<Option<(bool, i32)>> {
        let txn = self.conn.begin().await?;

        if stories::Entity::find_by_id(story_id)
            .one(&txn)
            .await
            .context("Failed to load story for like")?
            .is_none()
        {
            return Ok(None);
        }

        let like = likes::ActiveModel {
            story_id: Set(story_id),
            user_id: Set(user_id),
        };

        let insert = likes::Entity::insert(like)
            .on_conflict(
                OnConflict::columns([likes::Column::StoryId, likes::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&txn)
            .await;

        let inserted = match insert {
            Ok(_) => true,
            Err(DbErr::RecordNotInserted) => false,
            Err(err) => return Err(err).context("Failed to insert like"),
        };

        if inserted {
            stories::Entity::update_many()
                .col_expr(
                    stories::Column::Likes,
                    Expr::col(stories::Column::Likes).add(1),
                )
                .filter(stories::Column::Id.eq(story_id))
                .exec(&txn)
                .await
                .context("Failed to bump like counter")?;
        }

        let likes_now = stories::Entity::find_by_id(story_id)
            .one(&txn)
            .await
            .context("Failed to reload story after like")?
            .map_or(0, |story| story.likes);

        txn.commit().await?;

        Ok(Some((inserted, likes_now)))
    }

    /// Inserts a comment and bumps the story's comment counter in the same
    /// transaction. Returns None when the story does not exist.
    pub async fn comment(&self, new_comment: &NewComment) -> Result<Option<Comment>> {
        let txn = self.conn.begin().await?;

        if stories::Entity::find_by_id(new_comment.story_id)
            .one(&txn)
            .await
            .context("Failed to load story for comment")?
            .is_none()
        {
            return Ok(None);
        }

        let active = comments::ActiveModel {
            story_id: Set(new_comment.story_id),
            user_id: Set(new_comment.user_id),
            user_name: Set(new_comment.user_name.clone()),
            text: Set(new_comment.text.clone()),
            likes: Set(0),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let comment = active
            .insert(&txn)
            .await
            .context("Failed to insert comment")?;

        stories::Entity::update_many()
            .col_expr(
                stories::Column::CommentsCount,
                Expr::col(stories::Column::CommentsCount).add(1),
            )
            .filter(stories::Column::Id.eq(new_comment.story_id))
            .exec(&txn)
            .await
            .context("Failed to bump comment counter")?;

        txn.commit().await?;

        Ok(Some(map_comment(comment)))
    }

    /// Unconditional view-counter increment. Returns the new count, or None
    /// when the story does not exist.
    pub async fn record_view(&self, story_id: i32) -> Result<Option<i32>> {
        let result = stories::Entity::update_many()
            .col_expr(
                stories::Column::Views,
                Expr::col(stories::Column::Views).add(1),
            )
            .filter(stories::Column::Id.eq(story_id))
            .exec(&self.conn)
            .await
            .context("Failed to bump view counter")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let views = stories::Entity::find_by_id(story_id)
            .one(&self.conn)
            .await
            .context("Failed to reload story after view")?
            .map_or(0, |story| story.views);

        Ok(Some(views))
    }

    /// Comments for a story, newest first.
    pub async fn comments_for_story(&self, story_id: i32) -> Result<Vec<Comment>> {
        let rows = comments::Entity::find()
            .filter(comments::Column::StoryId.eq(story_id))
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list comments")?;

        Ok(rows.into_iter().map(map_comment).collect())
    }

    pub async fn count_comments(&self) -> Result<u64> {
        comments::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count comments")
    }

    pub async fn count_comments_by_user(&self, user_id: i32) -> Result<u64> {
        comments::Entity::find()
            .filter(comments::Column::UserId.eq(user_id))
            .count(&self.conn)
            .await
            .context("Failed to count comments by user")
    }
}
