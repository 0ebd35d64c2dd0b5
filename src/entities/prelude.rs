pub use super::authors::Entity as Authors;
pub use super::comments::Entity as Comments;
pub use super::likes::Entity as Likes;
pub use super::sessions::Entity as Sessions;
pub use super::stories::Entity as Stories;
pub use super::story_genres::Entity as StoryGenres;
pub use super::users::Entity as Users;
