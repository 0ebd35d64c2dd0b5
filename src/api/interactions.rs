use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::types::{CommentCreateResponse, CommentDto, CommentsResponse, LikeResponse,
    ViewResponse};
use super::validation::{non_empty, validate_story_id};
use super::{ApiError, AppState};
use crate::models::NewComment;

/// Display name recorded when the client does not send one.
const ANONYMOUS_NAME: &str = "Гость";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRequest {
    pub story_id: Option<i32>,
    pub action: Option<String>,
    pub user_id: Option<i32>,
    pub user_name: Option<String>,
    pub comment: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsQuery {
    pub story_id: Option<i32>,
}

/// POST /api/interactions — like, comment or view a story.
pub async fn post_interaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<InteractionRequest>,
) -> Result<Response, ApiError> {
    let (Some(story_id), Some(action), Some(user_id)) = (
        payload.story_id,
        non_empty(payload.action),
        payload.user_id,
    ) else {
        return Err(ApiError::MissingFields(&["storyId", "action", "userId"]));
    };

    let story_id = validate_story_id(story_id)?;

    match action.as_str() {
        "like" => {
            let outcome = state.interaction_service().like(story_id, user_id).await?;

            let message = if outcome.liked_now {
                "Story liked successfully"
            } else {
                "Already liked"
            };

            Ok(Json(LikeResponse {
                success: outcome.liked_now,
                story_id,
                likes: outcome.likes,
                liked: true,
                message: message.to_string(),
            })
            .into_response())
        }

        "comment" => {
            let Some(text) = non_empty(payload.comment) else {
                return Err(ApiError::validation("Comment text is required"));
            };

            let comment = state
                .interaction_service()
                .comment(NewComment {
                    story_id,
                    user_id,
                    user_name: non_empty(payload.user_name)
                        .unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
                    text,
                })
                .await?;

            Ok((
                StatusCode::CREATED,
                Json(CommentCreateResponse {
                    success: true,
                    comment: CommentDto::created(comment),
                    message: "Comment added successfully".to_string(),
                }),
            )
                .into_response())
        }

        "view" => {
            let views = state.interaction_service().view(story_id).await?;

            Ok(Json(ViewResponse {
                success: true,
                story_id,
                views,
                message: "View recorded".to_string(),
            })
            .into_response())
        }

        other => Err(ApiError::validation(format!(
            "Invalid action: '{}'. Valid actions: like, comment, view",
            other
        ))),
    }
}

/// GET /api/interactions?storyId=… — comments for a story, newest first.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CommentsQuery>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let Some(story_id) = query.story_id else {
        return Err(ApiError::validation("storyId parameter required"));
    };
    let story_id = validate_story_id(story_id)?;

    let comments = state.interaction_service().comments(story_id).await?;

    let comments: Vec<CommentDto> = comments.into_iter().map(CommentDto::listed).collect();
    let total = comments.len();

    Ok(Json(CommentsResponse {
        story_id,
        comments,
        total,
    }))
}
