use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entities::{sessions, users};
use crate::models::SessionUser;

pub struct SessionRepository {
    conn: DatabaseConnection,
}

impl SessionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Creates a session row for the user and returns (token, expiry).
    pub async fn create(&self, user_id: i32, ttl_days: i64) -> Result<(String, String)> {
        let token = generate_session_token();
        let expires_at = (chrono::Utc::now() + chrono::Duration::days(ttl_days)).to_rfc3339();

        let active = sessions::ActiveModel {
            session_token: Set(token.clone()),
            user_id: Set(user_id),
            expires_at: Set(expires_at.clone()),
        };
        active
            .insert(&self.conn)
            .await
            .context("Failed to insert session")?;

        Ok((token, expires_at))
    }

    /// Resolves a token to its owner. The token must exist, be unexpired,
    /// and belong to an active account.
    pub async fn find_user(&self, token: &str) -> Result<Option<SessionUser>> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sessions::Entity::find_by_id(token)
            .find_also_related(users::Entity)
            .filter(sessions::Column::ExpiresAt.gt(now))
            .filter(users::Column::IsActive.eq(true))
            .one(&self.conn)
            .await
            .context("Failed to resolve session token")?;

        Ok(result.and_then(|(_, user)| user).map(|user| SessionUser {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            avatar: user.avatar,
            role: user.role,
            bio: user.bio,
        }))
    }

    /// Deletes the session row if present. Idempotent.
    pub async fn delete(&self, token: &str) -> Result<()> {
        sessions::Entity::delete_by_id(token)
            .exec(&self.conn)
            .await
            .context("Failed to delete session")?;
        Ok(())
    }
}

/// Generates an opaque bearer token (32 random bytes, hex encoded).
#[must_use]
pub fn generate_session_token() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_token_shape() {
        let token = generate_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_session_token_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
    }
}
