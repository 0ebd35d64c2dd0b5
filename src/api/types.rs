use serde::Serialize;

use crate::models::{
    AdminStats, AdminStoryRow, Author, AuthorSummary, Comment, Profile, RecentStory, SessionUser,
    Story, User,
};

// ============================================================================
// Users & sessions
// ============================================================================

/// User object returned from register/login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserDto {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub role: String,
}

impl From<SessionUser> for AuthUserDto {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            avatar: user.avatar,
            role: user.role,
        }
    }
}

/// User object returned from the session lookup; includes the bio.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserDto {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub role: String,
    pub bio: Option<String>,
}

impl From<SessionUser> for CurrentUserDto {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            avatar: user.avatar,
            role: user.role,
            bio: user.bio,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: AuthUserDto,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: CurrentUserDto,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUserDto {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStatsDto {
    pub stories_count: u64,
    pub comments_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentStoryDto {
    pub id: i32,
    pub title: String,
    pub rating: f32,
    pub views: i32,
    pub likes: i32,
    pub published_at: String,
}

impl From<RecentStory> for RecentStoryDto {
    fn from(story: RecentStory) -> Self {
        Self {
            id: story.id,
            title: story.title,
            rating: story.rating,
            views: story.views,
            likes: story.likes,
            published_at: story.published_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: ProfileUserDto,
    pub stats: ProfileStatsDto,
    pub recent_stories: Vec<RecentStoryDto>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user: ProfileUserDto {
                id: profile.user.id,
                username: profile.user.username,
                full_name: profile.user.full_name,
                avatar: profile.user.avatar,
                bio: profile.user.bio,
                role: profile.user.role,
                created_at: profile.user.created_at,
            },
            stats: ProfileStatsDto {
                stories_count: profile.stories_count,
                comments_count: profile.comments_count,
            },
            recent_stories: profile
                .recent_stories
                .into_iter()
                .map(RecentStoryDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProfileDto {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub role: String,
}

impl From<User> for UpdatedProfileDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            avatar: user.avatar,
            bio: user.bio,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub user: UpdatedProfileDto,
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsDto {
    pub total_users: u64,
    pub total_stories: u64,
    pub total_comments: u64,
    pub new_users_week: u64,
    pub new_stories_week: u64,
}

impl From<AdminStats> for AdminStatsDto {
    fn from(stats: AdminStats) -> Self {
        Self {
            total_users: stats.total_users,
            total_stories: stats.total_stories,
            total_comments: stats.total_comments,
            new_users_week: stats.new_users_week,
            new_stories_week: stats.new_stories_week,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminStatsResponse {
    pub stats: AdminStatsDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for AdminUserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminUsersResponse {
    pub users: Vec<AdminUserDto>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStoryDto {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub views: i32,
    pub likes: i32,
    pub comments: i32,
    pub published_at: String,
}

impl From<AdminStoryRow> for AdminStoryDto {
    fn from(row: AdminStoryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            views: row.views,
            likes: row.likes,
            comments: row.comments_count,
            published_at: row.published_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminStoriesResponse {
    pub stories: Vec<AdminStoryDto>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdatedUserDto {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub is_active: bool,
}

impl From<User> for AdminUpdatedUserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminUpdateResponse {
    pub success: bool,
    pub user: AdminUpdatedUserDto,
}

// ============================================================================
// Authors
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AuthorDto {
    pub id: i32,
    pub name: String,
    pub avatar: Option<String>,
    pub rating: f32,
    /// Published-story counter; the wire name matches the frontend contract.
    #[serde(rename = "stories")]
    pub stories_count: i32,
    pub followers: i32,
    pub bio: Option<String>,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            avatar: author.avatar,
            rating: author.rating,
            stories_count: author.stories_count,
            followers: author.followers,
            bio: author.bio,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorsResponse {
    pub authors: Vec<AuthorDto>,
}

#[derive(Debug, Serialize)]
pub struct AuthorSummaryDto {
    pub id: i32,
    pub name: String,
    pub avatar: Option<String>,
    pub rating: f32,
    #[serde(rename = "stories")]
    pub stories_count: i32,
}

impl From<AuthorSummary> for AuthorSummaryDto {
    fn from(author: AuthorSummary) -> Self {
        Self {
            id: author.id,
            name: author.name,
            avatar: author.avatar,
            rating: author.rating,
            stories_count: author.stories_count,
        }
    }
}

// ============================================================================
// Stories
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDto {
    pub id: i32,
    pub title: String,
    pub author: AuthorSummaryDto,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub genre: Vec<String>,
    pub rating: f32,
    pub views: i32,
    pub likes: i32,
    pub comments: i32,
    pub published_at: String,
    pub reading_time: i32,
}

impl From<Story> for StoryDto {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            title: story.title,
            author: AuthorSummaryDto::from(story.author),
            description: story.description,
            content: story.content,
            genre: story.genres,
            rating: story.rating,
            views: story.views,
            likes: story.likes,
            comments: story.comments_count,
            published_at: story.published_at,
            reading_time: story.reading_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoriesResponse {
    pub stories: Vec<StoryDto>,
    pub total: usize,
}

/// Create-story response shape: flat, with the author referenced by id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedStoryDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub genre: Vec<String>,
    pub author_id: i32,
    pub rating: f32,
    pub views: i32,
    pub likes: i32,
    pub comments: i32,
    pub reading_time: i32,
    pub published_at: String,
    pub status: String,
}

impl From<Story> for CreatedStoryDto {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            title: story.title,
            description: story.description,
            genre: story.genres,
            author_id: story.author.id,
            rating: story.rating,
            views: story.views,
            likes: story.likes,
            comments: story.comments_count,
            reading_time: story.reading_time,
            published_at: story.published_at,
            status: "published".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateStoryResponse {
    pub success: bool,
    pub story: CreatedStoryDto,
    pub message: String,
}

// ============================================================================
// Interactions
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_id: Option<i32>,
    pub user_id: i32,
    pub user_name: String,
    pub text: String,
    pub created_at: String,
    pub likes: i32,
}

impl CommentDto {
    /// Listing shape: the story id lives on the envelope, not per comment.
    #[must_use]
    pub fn listed(comment: Comment) -> Self {
        Self {
            id: comment.id,
            story_id: None,
            user_id: comment.user_id,
            user_name: comment.user_name,
            text: comment.text,
            created_at: comment.created_at,
            likes: comment.likes,
        }
    }

    /// Creation shape: echoes the story id back.
    #[must_use]
    pub fn created(comment: Comment) -> Self {
        Self {
            id: comment.id,
            story_id: Some(comment.story_id),
            user_id: comment.user_id,
            user_name: comment.user_name,
            text: comment.text,
            created_at: comment.created_at,
            likes: comment.likes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub success: bool,
    pub story_id: i32,
    pub likes: i32,
    pub liked: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CommentCreateResponse {
    pub success: bool,
    pub comment: CommentDto,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub success: bool,
    pub story_id: i32,
    pub views: i32,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResponse {
    pub story_id: i32,
    pub comments: Vec<CommentDto>,
    pub total: usize,
}
