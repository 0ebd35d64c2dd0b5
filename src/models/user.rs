use super::story::RecentStory;

/// Full user row as stored, minus the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub role: String,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// The authenticated identity resolved from a session token.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub role: String,
    pub bio: Option<String>,
}

impl SessionUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: Option<String>,
}

/// Explicit patch for self-service profile updates: only present fields
/// are written.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.bio.is_none() && self.avatar.is_none()
    }
}

/// Explicit patch for admin-side user management.
#[derive(Debug, Clone)]
pub struct AdminUserPatch {
    pub user_id: i32,
    pub is_active: Option<bool>,
    pub role: Option<String>,
}

impl AdminUserPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_active.is_none() && self.role.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ProfileUser {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub created_at: String,
}

/// Profile payload: user info plus aggregated activity.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: ProfileUser,
    pub stories_count: u64,
    pub comments_count: u64,
    pub recent_stories: Vec<RecentStory>,
}

#[derive(Debug, Clone, Copy)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_stories: u64,
    pub total_comments: u64,
    pub new_users_week: u64,
    pub new_stories_week: u64,
}
