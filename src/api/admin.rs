use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::require_session;
use super::types::{
    AdminStatsResponse, AdminStoriesResponse, AdminStoryDto, AdminUpdateResponse, AdminUserDto,
    AdminUsersResponse,
};
use super::validation::{DEFAULT_PAGE_LIMIT, validate_limit, validate_role};
use super::{ApiError, AppState};
use crate::models::{AdminUserPatch, SessionUser};

#[derive(Deserialize)]
pub struct PageQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    pub user_id: Option<i32>,
    pub is_active: Option<bool>,
    pub role: Option<String>,
}

/// Session + admin role, or 403. A non-admin touching the admin surface is
/// rejected explicitly rather than falling through to self-service behavior.
async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<SessionUser, ApiError> {
    let user = require_session(state, headers).await?;

    if !user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    Ok(user)
}

fn page(query: &PageQuery) -> Result<(u64, u64), ApiError> {
    let limit = validate_limit(query.limit.unwrap_or(DEFAULT_PAGE_LIMIT))?;
    Ok((limit, query.offset.unwrap_or(0)))
}

/// GET /api/admin/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AdminStatsResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    let stats = state.auth_service().admin_stats().await?;

    Ok(Json(AdminStatsResponse {
        stats: stats.into(),
    }))
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<AdminUsersResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    let (limit, offset) = page(&query)?;
    let (users, total) = state.auth_service().admin_list_users(limit, offset).await?;

    Ok(Json(AdminUsersResponse {
        users: users.into_iter().map(AdminUserDto::from).collect(),
        total,
        limit,
        offset,
    }))
}

/// GET /api/admin/stories
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<AdminStoriesResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    let (limit, offset) = page(&query)?;
    let (stories, total) = state
        .auth_service()
        .admin_list_stories(limit, offset)
        .await?;

    Ok(Json(AdminStoriesResponse {
        stories: stories.into_iter().map(AdminStoryDto::from).collect(),
        total,
        limit,
        offset,
    }))
}

/// PUT /api/admin/users — toggle activation and/or change role.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<AdminUpdateUserRequest>,
) -> Result<Json<AdminUpdateResponse>, ApiError> {
    require_admin(&state, &headers).await?;

    let Some(user_id) = payload.user_id else {
        return Err(ApiError::validation("userId required"));
    };

    if let Some(role) = &payload.role {
        validate_role(role)?;
    }

    let updated = state
        .auth_service()
        .admin_update_user(AdminUserPatch {
            user_id,
            is_active: payload.is_active,
            role: payload.role,
        })
        .await?;

    Ok(Json(AdminUpdateResponse {
        success: true,
        user: updated.into(),
    }))
}
