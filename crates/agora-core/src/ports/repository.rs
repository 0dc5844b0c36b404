use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Like, LikeToggle, Messageboard, Post, Topic, TopicReadState, User};
use crate::error::RepoError;
use crate::slug::SlugRef;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Record forum activity for a user (the `last_seen_at` touch that runs
    /// after every authenticated action).
    async fn touch_activity(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError>;
}

/// Messageboard repository.
#[async_trait]
pub trait MessageboardRepository: BaseRepository<Messageboard, Uuid> {
    /// Look a board up by slug or UUID.
    async fn find_by_ref(&self, board: &SlugRef) -> Result<Option<Messageboard>, RepoError>;

    /// Recompute the denormalized `topics_count`/`posts_count` columns from
    /// the source tables. Returns the number of boards updated.
    async fn refresh_counters(&self) -> Result<u64, RepoError>;
}

/// Topic repository.
#[async_trait]
pub trait TopicRepository: BaseRepository<Topic, Uuid> {
    /// Look a topic up by slug or UUID, scoped to one messageboard.
    async fn find_in_messageboard(
        &self,
        messageboard_id: Uuid,
        topic: &SlugRef,
    ) -> Result<Option<Topic>, RepoError>;
}

/// One page of a topic's posts, in creation order.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// List a topic's posts in creation order, paginated (1-based page).
    async fn list_by_topic(
        &self,
        topic_id: Uuid,
        page: u64,
        per_page: u64,
    ) -> Result<PostPage, RepoError>;

    /// The post immediately preceding `post` in its topic, if any.
    async fn previous_in_topic(&self, post: &Post) -> Result<Option<Post>, RepoError>;

    /// Insert a post and bump the topic's and board's denormalized counters
    /// in one transaction.
    async fn create_in_topic(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post and decrement the denormalized counters in one
    /// transaction.
    async fn delete_with_counters(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Like repository. Row writes and the post's `likes_count` update share a
/// transaction so the counter always matches the rows.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Toggle the caller's like on a post.
    async fn toggle(&self, user_id: Uuid, post_id: Uuid) -> Result<LikeToggle, RepoError>;

    /// Remove the caller's like if present. Idempotent.
    async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<LikeToggle, RepoError>;

    /// The caller's like on a post, if any.
    async fn find(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Like>, RepoError>;
}

/// Read-state repository, keyed on `(user_id, topic_id)`.
#[async_trait]
pub trait ReadStateRepository: Send + Sync {
    /// Upsert the watermark, moving it forward only.
    async fn mark_read(
        &self,
        user_id: Uuid,
        topic_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<TopicReadState, RepoError>;

    /// Rewind the watermark to `at`, or delete the read state when `at` is
    /// `None` (unmarking the first post of a topic).
    async fn rewind(
        &self,
        user_id: Uuid,
        topic_id: Uuid,
        at: Option<DateTime<Utc>>,
    ) -> Result<(), RepoError>;

    /// The caller's read state for a topic, if any.
    async fn get(&self, user_id: Uuid, topic_id: Uuid)
    -> Result<Option<TopicReadState>, RepoError>;
}
