#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub rating: f32,
    pub stories_count: i32,
    pub followers: i32,
}

/// Compact author view embedded in story payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorSummary {
    pub id: i32,
    pub name: String,
    pub avatar: Option<String>,
    pub rating: f32,
    pub stories_count: i32,
}

impl From<Author> for AuthorSummary {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            avatar: author.avatar,
            rating: author.rating,
            stories_count: author.stories_count,
        }
    }
}
