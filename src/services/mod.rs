pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, AuthSession};
pub use auth_service_impl::SeaOrmAuthService;

pub mod author_service;
pub mod author_service_impl;
pub use author_service::{AuthorError, AuthorService};
pub use author_service_impl::SeaOrmAuthorService;

pub mod story_service;
pub mod story_service_impl;
pub use story_service::{StoryError, StoryService};
pub use story_service_impl::SeaOrmStoryService;

pub mod interaction_service;
pub mod interaction_service_impl;
pub use interaction_service::{InteractionError, InteractionService, LikeOutcome};
pub use interaction_service_impl::SeaOrmInteractionService;

pub mod memory;
pub use memory::{MemoryAuthorService, MemoryInteractionService, MemoryStoryService};
