use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::users;
use crate::models::{AdminUserPatch, NewUser, ProfilePatch, User};

pub struct UserRepository {
    conn: DatabaseConnection,
}

fn map_user(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        full_name: model.full_name,
        avatar: model.avatar,
        role: model.role,
        bio: model.bio,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// True when another account already holds the email or the username.
    pub async fn email_or_username_taken(&self, email: &str, username: &str) -> Result<bool> {
        let existing = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Email.eq(email))
                    .add(users::Column::Username.eq(username)),
            )
            .one(&self.conn)
            .await
            .context("Failed to check for existing user")?;

        Ok(existing.is_some())
    }

    pub async fn create(&self, new_user: &NewUser, password_hash: &str) -> Result<User> {
        let now = chrono::Utc::now().to_rfc3339();
        let full_name = new_user
            .full_name
            .clone()
            .unwrap_or_else(|| new_user.username.clone());

        let active = users::ActiveModel {
            email: Set(new_user.email.clone()),
            username: Set(new_user.username.clone()),
            password_hash: Set(password_hash.to_string()),
            full_name: Set(full_name),
            role: Set("user".to_string()),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        Ok(map_user(model))
    }

    /// Credential check: the stored hash must match the digest of the
    /// presented password exactly.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::PasswordHash.eq(password_hash))
            .one(&self.conn)
            .await
            .context("Failed to query user by credentials")?;

        Ok(user.map(map_user))
    }

    pub async fn get_active_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::IsActive.eq(true))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(map_user))
    }

    /// Applies a self-service profile patch; only present fields are written.
    /// Returns the updated row, or None when the user no longer exists.
    pub async fn apply_profile_patch(
        &self,
        user_id: i32,
        patch: &ProfilePatch,
    ) -> Result<Option<User>> {
        let Some(user) = users::Entity::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("Failed to load user for profile update")?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(full_name) = &patch.full_name {
            active.full_name = Set(full_name.clone());
        }
        if let Some(bio) = &patch.bio {
            active.bio = Set(Some(bio.clone()));
        }
        if let Some(avatar) = &patch.avatar {
            active.avatar = Set(Some(avatar.clone()));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update profile")?;

        Ok(Some(map_user(updated)))
    }

    /// Applies an admin patch (activation flag and/or role).
    pub async fn apply_admin_patch(&self, patch: &AdminUserPatch) -> Result<Option<User>> {
        let Some(user) = users::Entity::find_by_id(patch.user_id)
            .one(&self.conn)
            .await
            .context("Failed to load user for admin update")?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(role) = &patch.role {
            active.role = Set(role.clone());
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to apply admin user update")?;

        Ok(Some(map_user(updated)))
    }

    /// Newest-first page of users plus the unpaged total.
    pub async fn list(&self, limit: u64, offset: u64) -> Result<(Vec<User>, u64)> {
        let total = users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")?;

        let rows = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok((rows.into_iter().map(map_user).collect(), total))
    }

    pub async fn count(&self) -> Result<u64> {
        users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }

    pub async fn count_created_since(&self, cutoff: &str) -> Result<u64> {
        users::Entity::find()
            .filter(users::Column::CreatedAt.gt(cutoff))
            .count(&self.conn)
            .await
            .context("Failed to count recent users")
    }
}

/// Hex-encoded SHA-256 digest of the raw password.
#[must_use]
pub fn hash_password(password: &str) -> String {
    use sha2::{Digest, Sha256};

    let digest = Sha256::digest(password.as_bytes());
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_deterministic() {
        assert_eq!(hash_password("secret"), hash_password("secret"));
        assert_ne!(hash_password("secret"), hash_password("Secret"));
    }

    #[test]
    fn test_hash_password_is_hex_sha256() {
        let hash = hash_password("password");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        // Known digest of "password"
        assert_eq!(
            hash,
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }
}
