use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::state::SharedState;

mod admin;
pub mod auth;
mod authors;
mod error;
mod interactions;
mod profile;
mod stories;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

/// Preflight cache lifetime advertised to browsers.
const CORS_MAX_AGE_SECS: u64 = 86_400;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn crate::services::AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn author_service(&self) -> &Arc<dyn crate::services::AuthorService> {
        &self.shared.author_service
    }

    #[must_use]
    pub fn story_service(&self) -> &Arc<dyn crate::services::StoryService> {
        &self.shared.story_service
    }

    #[must_use]
    pub fn interaction_service(&self) -> &Arc<dyn crate::services::InteractionService> {
        &self.shared.interaction_service
    }
}

#[must_use]
pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState { shared })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config().read().await;
        config.server.cors_allowed_origins.clone()
    };

    let api_router = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route(
            "/auth/session",
            get(auth::current_user).delete(auth::logout),
        )
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/admin/stats", get(admin::get_stats))
        .route(
            "/admin/users",
            get(admin::list_users).put(admin::update_user),
        )
        .route("/admin/stories", get(admin::list_stories))
        .route("/authors", get(authors::list_authors))
        .route("/authors/top", get(authors::top_authors))
        .route("/authors/{id}", get(authors::get_author))
        .route(
            "/stories",
            get(stories::list_stories).post(stories::create_story),
        )
        .route("/stories/{id}", get(stories::get_story))
        .route(
            "/interactions",
            get(interactions::list_comments).post(interactions::post_interaction),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .fallback(not_found)
        .layer(
            cors_layer
                .allow_methods(Any)
                .allow_headers(Any)
                .max_age(Duration::from_secs(CORS_MAX_AGE_SECS)),
        )
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
