use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::optional_session;
use super::types::{CreateStoryResponse, StoriesResponse, StoryDto};
use super::validation::{non_empty, validate_story_id};
use super::{ApiError, AppState};
use crate::models::{NewStory, StoryQuery, StorySort};

const DEFAULT_READING_TIME: i32 = 10;

#[derive(Deserialize)]
pub struct StoriesListQuery {
    pub genre: Option<String>,
    pub sort: Option<String>,
}

/// Genre tags arrive either as a list or as a single scalar.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum GenreInput {
    Many(Vec<String>),
    One(String),
}

impl GenreInput {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::Many(genres) => genres,
            Self::One(genre) => vec![genre],
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub genre: Option<GenreInput>,
    pub author_id: Option<i32>,
    pub reading_time: Option<i32>,
}

/// GET /api/stories — optional genre filter and sort order.
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StoriesListQuery>,
) -> Result<Json<StoriesResponse>, ApiError> {
    let stories = state
        .story_service()
        .list(StoryQuery {
            genre: non_empty(query.genre),
            sort: StorySort::parse(query.sort.as_deref()),
        })
        .await?;

    let stories: Vec<StoryDto> = stories.into_iter().map(StoryDto::from).collect();
    let total = stories.len();

    Ok(Json(StoriesResponse { stories, total }))
}

/// GET /api/stories/{id}
pub async fn get_story(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StoryDto>, ApiError> {
    let id = validate_story_id(id)?;
    let story = state.story_service().get(id).await?;

    Ok(Json(StoryDto::from(story)))
}

/// POST /api/stories — publish a story with its genre tags.
pub async fn create_story(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateStoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(title), Some(description), Some(author_id)) = (
        non_empty(payload.title),
        non_empty(payload.description),
        payload.author_id,
    ) else {
        return Err(ApiError::MissingFields(&[
            "title",
            "description",
            "authorId",
        ]));
    };

    // An authenticated submitter is recorded as the story's creator.
    let created_by = optional_session(&state, &headers).await.map(|user| user.id);

    let story = state
        .story_service()
        .create(NewStory {
            title,
            description,
            content: non_empty(payload.content),
            genres: payload.genre.map(GenreInput::into_vec).unwrap_or_default(),
            author_id,
            created_by,
            reading_time: payload.reading_time.unwrap_or(DEFAULT_READING_TIME),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateStoryResponse {
            success: true,
            story: story.into(),
            message: "Story created successfully".to_string(),
        }),
    ))
}
