use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::require_session;
use super::types::{ProfileResponse, UpdateProfileResponse};
use super::validation::non_empty;
use super::{ApiError, AppState};
use crate::models::ProfilePatch;

#[derive(Deserialize)]
pub struct ProfileQuery {
    pub username: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// GET /api/profile — own profile, or another user's via `?username=`.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let viewer = require_session(&state, &headers).await?;

    let username = non_empty(query.username);
    let profile = state
        .auth_service()
        .profile(&viewer, username.as_deref())
        .await?;

    Ok(Json(ProfileResponse::from(profile)))
}

/// PUT /api/profile — partial self-update of fullName/bio/avatar.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let viewer = require_session(&state, &headers).await?;

    let patch = ProfilePatch {
        full_name: payload.full_name,
        bio: payload.bio,
        avatar: payload.avatar,
    };

    let updated = state
        .auth_service()
        .update_profile(viewer.id, patch)
        .await?;

    Ok(Json(UpdateProfileResponse {
        success: true,
        user: updated.into(),
    }))
}
