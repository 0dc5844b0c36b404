//! Application state - shared across all handlers.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use agora_core::ports::{
    Cache, LikeRepository, MessageboardRepository, PostRepository, ReadStateRepository,
    TopicRepository, UserRepository,
};
use agora_infra::cache::InMemoryCache;
use agora_infra::database::{
    DatabaseConnection, DbErr, PostgresLikeRepository, PostgresMessageboardRepository,
    PostgresPostRepository, PostgresReadStateRepository, PostgresTopicRepository,
    PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn Cache>,
    pub users: Arc<dyn UserRepository>,
    pub messageboards: Arc<dyn MessageboardRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub read_states: Arc<dyn ReadStateRepository>,
    pub posts_per_page: u64,
}

impl AppState {
    /// Build the application state. Fails when the database is unreachable;
    /// a forum API with no store behind it serves nothing useful.
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());

        let db = DatabaseConnection::init(&config.database).await?;
        let conn = db.conn;

        tracing::info!("Application state initialized");

        Ok(Self {
            cache,
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            messageboards: Arc::new(PostgresMessageboardRepository::new(conn.clone())),
            topics: Arc::new(PostgresTopicRepository::new(conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            likes: Arc::new(PostgresLikeRepository::new(conn.clone())),
            read_states: Arc::new(PostgresReadStateRepository::new(conn)),
            posts_per_page: config.posts_per_page,
        })
    }

    /// Record forum activity for the caller. Runs after every authenticated
    /// forum action; failures only log.
    pub async fn touch_user_activity(&self, user_id: Uuid) {
        if let Err(e) = self.users.touch_activity(user_id, Utc::now()).await {
            tracing::warn!(%user_id, error = %e, "Failed to record user activity");
        }
    }
}
