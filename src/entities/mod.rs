pub mod prelude;

pub mod authors;
pub mod comments;
pub mod likes;
pub mod sessions;
pub mod stories;
pub mod story_genres;
pub mod users;
