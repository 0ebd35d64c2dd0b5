use super::author::AuthorSummary;

#[derive(Debug, Clone)]
pub struct Story {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub author: AuthorSummary,
    pub genres: Vec<String>,
    pub rating: f32,
    pub views: i32,
    pub likes: i32,
    pub comments_count: i32,
    pub reading_time: i32,
    pub published_at: String,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewStory {
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub genres: Vec<String>,
    pub author_id: i32,
    pub created_by: Option<i32>,
    pub reading_time: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorySort {
    #[default]
    Latest,
    Popular,
    Rating,
}

impl StorySort {
    /// Unknown values fall back to the default ordering.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("popular") => Self::Popular,
            Some("rating") => Self::Rating,
            _ => Self::Latest,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoryQuery {
    pub genre: Option<String>,
    pub sort: StorySort,
}

/// Row shape for the admin story listing (author is the submitting user's
/// username, absent when the story was created outside the API).
#[derive(Debug, Clone)]
pub struct AdminStoryRow {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub views: i32,
    pub likes: i32,
    pub comments_count: i32,
    pub published_at: String,
}

#[derive(Debug, Clone)]
pub struct RecentStory {
    pub id: i32,
    pub title: String,
    pub rating: f32,
    pub views: i32,
    pub likes: i32,
    pub published_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse() {
        assert_eq!(StorySort::parse(None), StorySort::Latest);
        assert_eq!(StorySort::parse(Some("latest")), StorySort::Latest);
        assert_eq!(StorySort::parse(Some("popular")), StorySort::Popular);
        assert_eq!(StorySort::parse(Some("rating")), StorySort::Rating);
        assert_eq!(StorySort::parse(Some("bogus")), StorySort::Latest);
    }
}
