use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::types::{AuthorDto, AuthorsResponse};
use super::validation::{parse_top_limit, validate_author_id};
use super::{ApiError, AppState};

#[derive(Deserialize)]
pub struct TopQuery {
    /// Free-text on the wire; non-numeric input falls back to the default.
    pub limit: Option<String>,
}

/// GET /api/authors
pub async fn list_authors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AuthorsResponse>, ApiError> {
    let authors = state.author_service().list().await?;

    Ok(Json(AuthorsResponse {
        authors: authors.into_iter().map(AuthorDto::from).collect(),
    }))
}

/// GET /api/authors/{id}
pub async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<AuthorDto>, ApiError> {
    let id = validate_author_id(id)?;
    let author = state.author_service().get(id).await?;

    Ok(Json(AuthorDto::from(author)))
}

/// GET /api/authors/top?limit=N
pub async fn top_authors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopQuery>,
) -> Result<Json<AuthorsResponse>, ApiError> {
    let limit = parse_top_limit(query.limit.as_deref());
    let authors = state.author_service().top(limit).await?;

    Ok(Json(AuthorsResponse {
        authors: authors.into_iter().map(AuthorDto::from).collect(),
    }))
}
