use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::{Config, ContentBackend};
use crate::db::Store;
use crate::services::{
    AuthService, AuthorService, InteractionService, MemoryAuthorService,
    MemoryInteractionService, MemoryStoryService, SeaOrmAuthService, SeaOrmAuthorService,
    SeaOrmInteractionService, SeaOrmStoryService, StoryService, memory,
};

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub author_service: Arc<dyn AuthorService>,

    pub story_service: Arc<dyn StoryService>,

    pub interaction_service: Arc<dyn InteractionService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.session_ttl_days,
        )) as Arc<dyn AuthService>;

        let (author_service, story_service, interaction_service) =
            Self::content_services(&config, &store);

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            auth_service,
            author_service,
            story_service,
            interaction_service,
        })
    }

    /// Picks the backing-store implementation set for the content services.
    fn content_services(
        config: &Config,
        store: &Store,
    ) -> (
        Arc<dyn AuthorService>,
        Arc<dyn StoryService>,
        Arc<dyn InteractionService>,
    ) {
        match config.general.content_backend {
            ContentBackend::Database => (
                Arc::new(SeaOrmAuthorService::new(store.clone())),
                Arc::new(SeaOrmStoryService::new(store.clone())),
                Arc::new(SeaOrmInteractionService::new(store.clone())),
            ),
            ContentBackend::Memory => {
                let catalog = memory::seeded_catalog();
                (
                    Arc::new(MemoryAuthorService::new(catalog.clone())),
                    Arc::new(MemoryStoryService::new(catalog.clone())),
                    Arc::new(MemoryInteractionService::new(catalog)),
                )
            }
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
