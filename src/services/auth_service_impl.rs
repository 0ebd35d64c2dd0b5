//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::db::{Store, hash_password};
use crate::models::{
    AdminStats, AdminStoryRow, AdminUserPatch, NewUser, Profile, ProfilePatch, ProfileUser,
    SessionUser, User,
};
use crate::services::auth_service::{AuthError, AuthService, AuthSession};

/// How many of the user's newest stories a profile carries.
const PROFILE_RECENT_STORIES: u64 = 10;

pub struct SeaOrmAuthService {
    store: Store,
    session_ttl_days: i64,
}

fn session_user(user: &User) -> SessionUser {
    SessionUser {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        full_name: user.full_name.clone(),
        avatar: user.avatar.clone(),
        role: user.role.clone(),
        bio: user.bio.clone(),
    }
}

fn profile_user(user: User) -> ProfileUser {
    ProfileUser {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        avatar: user.avatar,
        bio: user.bio,
        role: user.role,
        created_at: user.created_at,
    }
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, session_ttl_days: i64) -> Self {
        Self {
            store,
            session_ttl_days,
        }
    }

    async fn open_session(&self, user: &User) -> Result<AuthSession, AuthError> {
        let (token, _) = self
            .store
            .create_session(user.id, self.session_ttl_days)
            .await?;

        Ok(AuthSession {
            token,
            user: session_user(user),
        })
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, new_user: NewUser) -> Result<AuthSession, AuthError> {
        if self
            .store
            .email_or_username_taken(&new_user.email, &new_user.username)
            .await?
        {
            return Err(AuthError::UserExists);
        }

        let password_hash = hash_password(&new_user.password);
        let user = self.store.create_user(&new_user, &password_hash).await?;

        tracing::info!("Registered user: {}", user.username);

        self.open_session(&user).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let password_hash = hash_password(password);

        let user = self
            .store
            .find_user_by_credentials(email, &password_hash)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }

        self.open_session(&user).await
    }

    async fn authenticate(&self, token: &str) -> Result<SessionUser, AuthError> {
        self.store
            .find_session_user(token)
            .await?
            .ok_or(AuthError::InvalidSession)
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.store.delete_session(token).await?;
        Ok(())
    }

    async fn profile(
        &self,
        viewer: &SessionUser,
        username: Option<&str>,
    ) -> Result<Profile, AuthError> {
        let lookup = username.unwrap_or(&viewer.username);
        let user = self
            .store
            .get_active_user_by_username(lookup)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let user = profile_user(user);

        let stories_count = self.store.count_stories_by_creator(user.id).await?;
        let comments_count = self.store.count_comments_by_user(user.id).await?;
        let recent_stories = self
            .store
            .recent_stories_by_creator(user.id, PROFILE_RECENT_STORIES)
            .await?;

        Ok(Profile {
            user,
            stories_count,
            comments_count,
            recent_stories,
        })
    }

    async fn update_profile(&self, user_id: i32, patch: ProfilePatch) -> Result<User, AuthError> {
        if patch.is_empty() {
            return Err(AuthError::Validation("No fields to update".to_string()));
        }

        self.store
            .apply_profile_patch(user_id, &patch)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn admin_stats(&self) -> Result<AdminStats, AuthError> {
        let week_ago = (chrono::Utc::now() - chrono::Duration::days(7)).to_rfc3339();

        Ok(AdminStats {
            total_users: self.store.count_users().await?,
            total_stories: self.store.count_stories().await?,
            total_comments: self.store.count_comments().await?,
            new_users_week: self.store.count_users_created_since(&week_ago).await?,
            new_stories_week: self
                .store
                .count_stories_published_since(&week_ago)
                .await?,
        })
    }

    async fn admin_list_users(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<User>, u64), AuthError> {
        Ok(self.store.list_users(limit, offset).await?)
    }

    async fn admin_list_stories(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<AdminStoryRow>, u64), AuthError> {
        Ok(self.store.admin_list_stories(limit, offset).await?)
    }

    async fn admin_update_user(&self, patch: AdminUserPatch) -> Result<User, AuthError> {
        if patch.is_empty() {
            return Err(AuthError::Validation("No fields to update".to_string()));
        }

        let user = self
            .store
            .apply_admin_user_patch(&patch)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            "Admin update applied to user {}: active={} role={}",
            user.username,
            user.is_active,
            user.role
        );

        Ok(user)
    }
}
