//! Domain service for accounts, sessions, profiles and the admin panel.

use thiserror::Error;

use crate::models::{
    AdminStats, AdminStoryRow, AdminUserPatch, NewUser, Profile, ProfilePatch, SessionUser, User,
};

/// Errors specific to account and session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists")]
    UserExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Invalid or expired session")]
    InvalidSession,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A freshly minted session: the bearer token plus its owner.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: SessionUser,
}

/// Domain service trait for authentication and account management.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and opens a session for it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserExists`] when the email or username is taken.
    async fn register(&self, new_user: NewUser) -> Result<AuthSession, AuthError>;

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a mismatch and
    /// [`AuthError::AccountDisabled`] for deactivated accounts.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Resolves a bearer token to its owner.
    async fn authenticate(&self, token: &str) -> Result<SessionUser, AuthError>;

    /// Drops the session row. Idempotent; unknown tokens are not an error.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Profile of the viewer, or of the named active user.
    async fn profile(
        &self,
        viewer: &SessionUser,
        username: Option<&str>,
    ) -> Result<Profile, AuthError>;

    /// Applies a self-service profile patch and returns the updated row.
    async fn update_profile(&self, user_id: i32, patch: ProfilePatch) -> Result<User, AuthError>;

    async fn admin_stats(&self) -> Result<AdminStats, AuthError>;

    async fn admin_list_users(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<User>, u64), AuthError>;

    async fn admin_list_stories(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<AdminStoryRow>, u64), AuthError>;

    /// Applies an admin user patch and returns the updated row.
    async fn admin_update_user(&self, patch: AdminUserPatch) -> Result<User, AuthError>;
}
