use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::services::{AuthError, AuthorError, InteractionError, StoryError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    /// 400 with the list of required body fields, mirroring the error shape
    /// the frontend expects.
    MissingFields(&'static [&'static str]),

    Unauthorized(String),

    Forbidden(String),

    MethodNotAllowed,

    Conflict(String),

    DatabaseError(String),

    InternalError(String),
}

/// JSON error body: `{"error": message}` plus an optional `required` list.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<String>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg)),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            ApiError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Missing required fields".to_string(),
                    required: Some(fields.iter().map(ToString::to_string).collect()),
                },
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorBody::new(msg)),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorBody::new(msg)),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody::new("Method not allowed"),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::new(msg)),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("A database error occurred"),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("An internal error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            required: None,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserExists => ApiError::Conflict("User already exists".to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::AccountDisabled => ApiError::Forbidden("Account is disabled".to_string()),
            AuthError::InvalidSession => {
                ApiError::Unauthorized("Invalid or expired session".to_string())
            }
            AuthError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            AuthError::Validation(msg) => ApiError::ValidationError(msg),
            AuthError::Database(msg) => ApiError::DatabaseError(msg),
            AuthError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<AuthorError> for ApiError {
    fn from(err: AuthorError) -> Self {
        match err {
            AuthorError::NotFound => ApiError::NotFound("Author not found".to_string()),
            AuthorError::Database(msg) => ApiError::DatabaseError(msg),
            AuthorError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<StoryError> for ApiError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::NotFound => ApiError::NotFound("Story not found".to_string()),
            StoryError::AuthorNotFound => ApiError::NotFound("Author not found".to_string()),
            StoryError::Validation(msg) => ApiError::ValidationError(msg),
            StoryError::Database(msg) => ApiError::DatabaseError(msg),
            StoryError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<InteractionError> for ApiError {
    fn from(err: InteractionError) -> Self {
        match err {
            InteractionError::StoryNotFound => ApiError::NotFound("Story not found".to_string()),
            InteractionError::Validation(msg) => ApiError::ValidationError(msg),
            InteractionError::Database(msg) => ApiError::DatabaseError(msg),
            InteractionError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }
}
