//! In-memory implementations of the content service traits.
//!
//! Interchangeable with the `SeaORM` implementations behind the same traits;
//! selected with `content_backend = "memory"` in the config. Ships seeded
//! with the showcase catalog so the site renders without a database.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Author, AuthorSummary, Comment, NewComment, NewStory, Story, StoryQuery,
    StorySort};
use crate::services::author_service::{AuthorError, AuthorService};
use crate::services::interaction_service::{InteractionError, InteractionService, LikeOutcome};
use crate::services::story_service::{StoryError, StoryService};

/// Story row as held in memory; the author is joined at read time, like the
/// database backend does.
#[derive(Debug, Clone)]
struct StoredStory {
    id: i32,
    title: String,
    description: String,
    content: Option<String>,
    author_id: i32,
    created_by: Option<i32>,
    genres: Vec<String>,
    rating: f32,
    views: i32,
    likes: i32,
    comments_count: i32,
    reading_time: i32,
    published_at: String,
}

#[derive(Debug)]
pub struct MemoryCatalog {
    authors: Vec<Author>,
    stories: Vec<StoredStory>,
    comments: Vec<Comment>,
    likes: HashSet<(i32, i32)>,
    next_story_id: i32,
    next_comment_id: i32,
}

const AUTHOR_AVATAR: &str = "/img/4a8f619e-b09e-4045-86d6-b6e8f9490542.jpg";

impl MemoryCatalog {
    /// The showcase catalog the site launched with.
    #[must_use]
    pub fn seeded() -> Self {
        let authors = vec![
            Author {
                id: 1,
                name: "Александр Темный".to_string(),
                avatar: Some(AUTHOR_AVATAR.to_string()),
                bio: Some("Мастер психологических триллеров".to_string()),
                rating: 4.8,
                stories_count: 23,
                followers: 340,
            },
            Author {
                id: 2,
                name: "Мария Кровавая".to_string(),
                avatar: Some(AUTHOR_AVATAR.to_string()),
                bio: Some("Специалист по готической прозе".to_string()),
                rating: 4.6,
                stories_count: 15,
                followers: 289,
            },
            Author {
                id: 3,
                name: "Николай Мрачный".to_string(),
                avatar: Some(AUTHOR_AVATAR.to_string()),
                bio: Some("Король паранормальных историй".to_string()),
                rating: 4.9,
                stories_count: 31,
                followers: 456,
            },
            Author {
                id: 4,
                name: "Елена Призрачная".to_string(),
                avatar: Some(AUTHOR_AVATAR.to_string()),
                bio: Some("Создатель мистических сюжетов".to_string()),
                rating: 4.7,
                stories_count: 19,
                followers: 312,
            },
        ];

        let stories = vec![
            StoredStory {
                id: 1,
                title: "Тени в подвале".to_string(),
                description: "Когда старый дом начинает скрипеть по ночам, а тени на стенах \
                              становятся длиннее, становится ясно — здесь живет что-то древнее \
                              и злобное..."
                    .to_string(),
                content: None,
                author_id: 1,
                created_by: None,
                genres: vec![
                    "Мистика".to_string(),
                    "Психологический ужас".to_string(),
                ],
                rating: 4.9,
                views: 1250,
                likes: 89,
                comments_count: 23,
                reading_time: 8,
                published_at: "2024-01-15".to_string(),
            },
            StoredStory {
                id: 2,
                title: "Последний поезд".to_string(),
                description: "Полночный поезд, который приходит только раз в год. Пассажиры \
                              говорят, что билет в один конец стоит всего лишь душу..."
                    .to_string(),
                content: None,
                author_id: 2,
                created_by: None,
                genres: vec!["Сверхъестественное".to_string(), "Готика".to_string()],
                rating: 4.7,
                views: 980,
                likes: 67,
                comments_count: 18,
                reading_time: 12,
                published_at: "2024-01-12".to_string(),
            },
            StoredStory {
                id: 3,
                title: "Зеркальная комната".to_string(),
                description: "В каждом зеркале живет отражение, но что делать, если отражение \
                              начинает жить своей жизнью и планирует занять твое место?"
                    .to_string(),
                content: None,
                author_id: 3,
                created_by: None,
                genres: vec!["Паранормальное".to_string(), "Триллер".to_string()],
                rating: 4.8,
                views: 1560,
                likes: 124,
                comments_count: 35,
                reading_time: 15,
                published_at: "2024-01-10".to_string(),
            },
        ];

        let comments = vec![
            Comment {
                id: 1,
                story_id: 1,
                user_id: 5,
                user_name: "Иван Читатель".to_string(),
                text: "Потрясающая история! Мурашки по коже.".to_string(),
                likes: 12,
                created_at: "2024-01-16T10:30:00".to_string(),
            },
            Comment {
                id: 2,
                story_id: 1,
                user_id: 8,
                user_name: "Анна Страшная".to_string(),
                text: "Концовка превзошла все ожидания!".to_string(),
                likes: 8,
                created_at: "2024-01-16T14:20:00".to_string(),
            },
        ];

        Self {
            authors,
            stories,
            comments,
            likes: HashSet::new(),
            next_story_id: 4,
            next_comment_id: 3,
        }
    }

    fn author_summary(&self, author_id: i32) -> Option<AuthorSummary> {
        self.authors
            .iter()
            .find(|a| a.id == author_id)
            .cloned()
            .map(AuthorSummary::from)
    }

    fn assemble(&self, stored: &StoredStory) -> Option<Story> {
        let author = self.author_summary(stored.author_id)?;
        Some(Story {
            id: stored.id,
            title: stored.title.clone(),
            description: stored.description.clone(),
            content: stored.content.clone(),
            author,
            genres: stored.genres.clone(),
            rating: stored.rating,
            views: stored.views,
            likes: stored.likes,
            comments_count: stored.comments_count,
            reading_time: stored.reading_time,
            published_at: stored.published_at.clone(),
            created_by: stored.created_by,
        })
    }
}

/// One shared seeded catalog for the three memory services.
#[must_use]
pub fn seeded_catalog() -> Arc<RwLock<MemoryCatalog>> {
    Arc::new(RwLock::new(MemoryCatalog::seeded()))
}

pub struct MemoryAuthorService {
    catalog: Arc<RwLock<MemoryCatalog>>,
}

impl MemoryAuthorService {
    #[must_use]
    pub fn new(catalog: Arc<RwLock<MemoryCatalog>>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl AuthorService for MemoryAuthorService {
    async fn list(&self) -> Result<Vec<Author>, AuthorError> {
        Ok(self.catalog.read().await.authors.clone())
    }

    async fn get(&self, id: i32) -> Result<Author, AuthorError> {
        self.catalog
            .read()
            .await
            .authors
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(AuthorError::NotFound)
    }

    async fn top(&self, limit: u64) -> Result<Vec<Author>, AuthorError> {
        let mut authors = self.catalog.read().await.authors.clone();
        authors.sort_by(|a, b| b.followers.cmp(&a.followers));
        authors.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(authors)
    }
}

pub struct MemoryStoryService {
    catalog: Arc<RwLock<MemoryCatalog>>,
}

impl MemoryStoryService {
    #[must_use]
    pub fn new(catalog: Arc<RwLock<MemoryCatalog>>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl StoryService for MemoryStoryService {
    async fn list(&self, query: StoryQuery) -> Result<Vec<Story>, StoryError> {
        let catalog = self.catalog.read().await;

        let mut rows: Vec<&StoredStory> = catalog
            .stories
            .iter()
            .filter(|s| {
                query
                    .genre
                    .as_ref()
                    .is_none_or(|genre| s.genres.iter().any(|g| g == genre))
            })
            .collect();

        match query.sort {
            StorySort::Latest => rows.sort_by(|a, b| {
                b.published_at
                    .cmp(&a.published_at)
                    .then_with(|| b.id.cmp(&a.id))
            }),
            StorySort::Popular => rows.sort_by(|a, b| b.views.cmp(&a.views)),
            StorySort::Rating => rows.sort_by(|a, b| {
                b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
            }),
        }

        Ok(rows
            .into_iter()
            .filter_map(|stored| catalog.assemble(stored))
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Story, StoryError> {
        let catalog = self.catalog.read().await;
        catalog
            .stories
            .iter()
            .find(|s| s.id == id)
            .and_then(|stored| catalog.assemble(stored))
            .ok_or(StoryError::NotFound)
    }

    async fn create(&self, new_story: NewStory) -> Result<Story, StoryError> {
        let mut catalog = self.catalog.write().await;

        if !catalog.authors.iter().any(|a| a.id == new_story.author_id) {
            return Err(StoryError::AuthorNotFound);
        }

        let id = catalog.next_story_id;
        catalog.next_story_id += 1;

        let mut genres: Vec<String> = Vec::new();
        for genre in &new_story.genres {
            let genre = genre.trim();
            if genre.is_empty() || genres.iter().any(|g| g == genre) {
                continue;
            }
            genres.push(genre.to_string());
        }

        let stored = StoredStory {
            id,
            title: new_story.title,
            description: new_story.description,
            content: new_story.content,
            author_id: new_story.author_id,
            created_by: new_story.created_by,
            genres,
            rating: 0.0,
            views: 0,
            likes: 0,
            comments_count: 0,
            reading_time: new_story.reading_time,
            published_at: chrono::Utc::now().to_rfc3339(),
        };
        catalog.stories.push(stored);

        if let Some(author) = catalog
            .authors
            .iter_mut()
            .find(|a| a.id == new_story.author_id)
        {
            author.stories_count += 1;
        }

        let stored = catalog
            .stories
            .last()
            .cloned()
            .ok_or_else(|| StoryError::Internal("Story vanished after insert".to_string()))?;

        catalog
            .assemble(&stored)
            .ok_or(StoryError::AuthorNotFound)
    }
}

pub struct MemoryInteractionService {
    catalog: Arc<RwLock<MemoryCatalog>>,
}

impl MemoryInteractionService {
    #[must_use]
    pub fn new(catalog: Arc<RwLock<MemoryCatalog>>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl InteractionService for MemoryInteractionService {
    async fn like(&self, story_id: i32, user_id: i32) -> Result<LikeOutcome, InteractionError> {
        let mut catalog = self.catalog.write().await;

        if !catalog.stories.iter().any(|s| s.id == story_id) {
            return Err(InteractionError::StoryNotFound);
        }

        let liked_now = catalog.likes.insert((story_id, user_id));

        let story = catalog
            .stories
            .iter_mut()
            .find(|s| s.id == story_id)
            .ok_or(InteractionError::StoryNotFound)?;
        if liked_now {
            story.likes += 1;
        }

        Ok(LikeOutcome {
            liked_now,
            likes: story.likes,
        })
    }

    async fn comment(&self, new_comment: NewComment) -> Result<Comment, InteractionError> {
        let mut catalog = self.catalog.write().await;

        if !catalog.stories.iter().any(|s| s.id == new_comment.story_id) {
            return Err(InteractionError::StoryNotFound);
        }

        let id = catalog.next_comment_id;
        catalog.next_comment_id += 1;

        let comment = Comment {
            id,
            story_id: new_comment.story_id,
            user_id: new_comment.user_id,
            user_name: new_comment.user_name,
            text: new_comment.text,
            likes: 0,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        catalog.comments.push(comment.clone());

        if let Some(story) = catalog
            .stories
            .iter_mut()
            .find(|s| s.id == new_comment.story_id)
        {
            story.comments_count += 1;
        }

        Ok(comment)
    }

    async fn view(&self, story_id: i32) -> Result<i32, InteractionError> {
        let mut catalog = self.catalog.write().await;

        let story = catalog
            .stories
            .iter_mut()
            .find(|s| s.id == story_id)
            .ok_or(InteractionError::StoryNotFound)?;
        story.views += 1;

        Ok(story.views)
    }

    async fn comments(&self, story_id: i32) -> Result<Vec<Comment>, InteractionError> {
        let mut comments: Vec<Comment> = self
            .catalog
            .read()
            .await
            .comments
            .iter()
            .filter(|c| c.story_id == story_id)
            .cloned()
            .collect();

        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_like_counts_once_per_user() {
        let interactions = MemoryInteractionService::new(seeded_catalog());

        let first = interactions.like(1, 42).await.unwrap();
        assert!(first.liked_now);
        assert_eq!(first.likes, 90);

        let second = interactions.like(1, 42).await.unwrap();
        assert!(!second.liked_now);
        assert_eq!(second.likes, 90);

        let other_user = interactions.like(1, 43).await.unwrap();
        assert!(other_user.liked_now);
        assert_eq!(other_user.likes, 91);
    }

    #[tokio::test]
    async fn test_like_unknown_story() {
        let interactions = MemoryInteractionService::new(seeded_catalog());
        assert!(matches!(
            interactions.like(999, 1).await,
            Err(InteractionError::StoryNotFound)
        ));
    }

    #[tokio::test]
    async fn test_popular_sort_is_non_increasing() {
        let stories = MemoryStoryService::new(seeded_catalog());

        let listed = stories
            .list(StoryQuery {
                genre: None,
                sort: StorySort::Popular,
            })
            .await
            .unwrap();

        let views: Vec<i32> = listed.iter().map(|s| s.views).collect();
        assert!(views.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_genre_filter() {
        let stories = MemoryStoryService::new(seeded_catalog());

        let gothic = stories
            .list(StoryQuery {
                genre: Some("Готика".to_string()),
                sort: StorySort::Latest,
            })
            .await
            .unwrap();

        assert_eq!(gothic.len(), 1);
        assert_eq!(gothic[0].title, "Последний поезд");
    }

    #[tokio::test]
    async fn test_create_story_bumps_author_counter() {
        let catalog = seeded_catalog();
        let stories = MemoryStoryService::new(catalog.clone());
        let authors = MemoryAuthorService::new(catalog);

        let before = authors.get(1).await.unwrap().stories_count;

        let created = stories
            .create(NewStory {
                title: "Новый кошмар".to_string(),
                description: "Описание".to_string(),
                content: None,
                genres: vec!["Хоррор".to_string(), "Хоррор".to_string()],
                author_id: 1,
                created_by: None,
                reading_time: 10,
            })
            .await
            .unwrap();

        assert_eq!(created.genres, vec!["Хоррор".to_string()]);
        assert_eq!(created.views, 0);

        let after = authors.get(1).await.unwrap().stories_count;
        assert_eq!(after, before + 1);

        let fetched = stories.get(created.id).await.unwrap();
        assert_eq!(fetched.title, "Новый кошмар");
    }

    #[tokio::test]
    async fn test_top_authors_ordering() {
        let authors = MemoryAuthorService::new(seeded_catalog());

        let top = authors.top(2).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, 3);
        assert_eq!(top[1].id, 1);
    }

    #[tokio::test]
    async fn test_comments_newest_first() {
        let interactions = MemoryInteractionService::new(seeded_catalog());

        let comments = interactions.comments(1).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert!(comments[0].created_at >= comments[1].created_at);
    }
}
