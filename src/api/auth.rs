use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::types::{AuthResponse, CurrentUserDto, LogoutResponse, SessionResponse};
use super::validation::non_empty;
use super::{ApiError, AppState};
use crate::models::{NewUser, SessionUser};

/// Bearer credential header used by the frontend.
pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

// ============================================================================
// Request types
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Session helpers
// ============================================================================

#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Resolves the session header to its owner, or fails with 401.
pub async fn require_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<SessionUser, ApiError> {
    let token = session_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("No session token provided".to_string()))?;

    Ok(state.auth_service().authenticate(&token).await?)
}

/// Best-effort session resolution for endpoints that work anonymously.
pub async fn optional_session(state: &AppState, headers: &HeaderMap) -> Option<SessionUser> {
    let token = session_token(headers)?;
    state.auth_service().authenticate(&token).await.ok()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(email), Some(password), Some(username)) = (
        non_empty(payload.email),
        non_empty(payload.password),
        non_empty(payload.username),
    ) else {
        return Err(ApiError::MissingFields(&["email", "password", "username"]));
    };

    let session = state
        .auth_service()
        .register(NewUser {
            email,
            password,
            username,
            full_name: non_empty(payload.full_name),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token: session.token,
            user: session.user.into(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(email), Some(password)) = (non_empty(payload.email), non_empty(payload.password))
    else {
        return Err(ApiError::validation("Missing email or password"));
    };

    let session = state.auth_service().login(&email, &password).await?;

    Ok(Json(AuthResponse {
        success: true,
        token: session.token,
        user: session.user.into(),
    }))
}

/// GET /api/auth/session
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ApiError> {
    let user = require_session(&state, &headers).await?;

    Ok(Json(SessionResponse {
        user: CurrentUserDto::from(user),
    }))
}

/// DELETE /api/auth/session
///
/// Idempotent logout: succeeds whether or not a session header is present.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ApiError> {
    if let Some(token) = session_token(&headers) {
        state.auth_service().logout(&token).await?;
    }

    Ok(Json(LogoutResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}
