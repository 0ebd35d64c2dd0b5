use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::session::generate_session_token;
pub use repositories::user::hash_password;

use crate::models::{
    AdminStoryRow, AdminUserPatch, Author, Comment, NewComment, NewStory, NewUser, ProfilePatch,
    RecentStory, SessionUser, Story, StoryQuery, User,
};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // File-backed sqlite needs the file (and its directory) to exist
        // before sqlx will open it.
        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn session_repo(&self) -> repositories::session::SessionRepository {
        repositories::session::SessionRepository::new(self.conn.clone())
    }

    fn author_repo(&self) -> repositories::author::AuthorRepository {
        repositories::author::AuthorRepository::new(self.conn.clone())
    }

    fn story_repo(&self) -> repositories::story::StoryRepository {
        repositories::story::StoryRepository::new(self.conn.clone())
    }

    fn interaction_repo(&self) -> repositories::interaction::InteractionRepository {
        repositories::interaction::InteractionRepository::new(self.conn.clone())
    }

    // Users

    pub async fn email_or_username_taken(&self, email: &str, username: &str) -> Result<bool> {
        self.user_repo()
            .email_or_username_taken(email, username)
            .await
    }

    pub async fn create_user(&self, new_user: &NewUser, password_hash: &str) -> Result<User> {
        self.user_repo().create(new_user, password_hash).await
    }

    pub async fn find_user_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>> {
        self.user_repo()
            .find_by_credentials(email, password_hash)
            .await
    }

    pub async fn get_active_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_active_by_username(username).await
    }

    pub async fn apply_profile_patch(
        &self,
        user_id: i32,
        patch: &ProfilePatch,
    ) -> Result<Option<User>> {
        self.user_repo().apply_profile_patch(user_id, patch).await
    }

    pub async fn apply_admin_user_patch(&self, patch: &AdminUserPatch) -> Result<Option<User>> {
        self.user_repo().apply_admin_patch(patch).await
    }

    pub async fn list_users(&self, limit: u64, offset: u64) -> Result<(Vec<User>, u64)> {
        self.user_repo().list(limit, offset).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn count_users_created_since(&self, cutoff: &str) -> Result<u64> {
        self.user_repo().count_created_since(cutoff).await
    }

    // Sessions

    pub async fn create_session(&self, user_id: i32, ttl_days: i64) -> Result<(String, String)> {
        self.session_repo().create(user_id, ttl_days).await
    }

    pub async fn find_session_user(&self, token: &str) -> Result<Option<SessionUser>> {
        self.session_repo().find_user(token).await
    }

    pub async fn delete_session(&self, token: &str) -> Result<()> {
        self.session_repo().delete(token).await
    }

    // Authors

    pub async fn list_authors(&self) -> Result<Vec<Author>> {
        self.author_repo().list().await
    }

    pub async fn get_author(&self, id: i32) -> Result<Option<Author>> {
        self.author_repo().get(id).await
    }

    pub async fn top_authors(&self, limit: u64) -> Result<Vec<Author>> {
        self.author_repo().top(limit).await
    }

    // Stories

    pub async fn create_story(&self, new_story: &NewStory) -> Result<Option<Story>> {
        self.story_repo().create(new_story).await
    }

    pub async fn list_stories(&self, query: &StoryQuery) -> Result<Vec<Story>> {
        self.story_repo().list(query).await
    }

    pub async fn get_story(&self, id: i32) -> Result<Option<Story>> {
        self.story_repo().get(id).await
    }

    pub async fn admin_list_stories(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<AdminStoryRow>, u64)> {
        self.story_repo().admin_list(limit, offset).await
    }

    pub async fn count_stories(&self) -> Result<u64> {
        self.story_repo().count().await
    }

    pub async fn count_stories_published_since(&self, cutoff: &str) -> Result<u64> {
        self.story_repo().count_published_since(cutoff).await
    }

    pub async fn count_stories_by_creator(&self, user_id: i32) -> Result<u64> {
        self.story_repo().count_by_creator(user_id).await
    }

    pub async fn recent_stories_by_creator(
        &self,
        user_id: i32,
        limit: u64,
    ) -> Result<Vec<RecentStory>> {
        self.story_repo().recent_by_creator(user_id, limit).await
    }

    // Interactions

    pub async fn like_story(&self, story_id: i32, user_id: i32) -> Result<Option<(bool, i32)>> {
        self.interaction_repo().like(story_id, user_id).await
    }

    pub async fn add_comment(&self, new_comment: &NewComment) -> Result<Option<Comment>> {
        self.interaction_repo().comment(new_comment).await
    }

    pub async fn record_view(&self, story_id: i32) -> Result<Option<i32>> {
        self.interaction_repo().record_view(story_id).await
    }

    pub async fn comments_for_story(&self, story_id: i32) -> Result<Vec<Comment>> {
        self.interaction_repo().comments_for_story(story_id).await
    }

    pub async fn count_comments(&self) -> Result<u64> {
        self.interaction_repo().count_comments().await
    }

    pub async fn count_comments_by_user(&self, user_id: i32) -> Result<u64> {
        self.interaction_repo().count_comments_by_user(user_id).await
    }
}
