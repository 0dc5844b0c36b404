//! PostgreSQL repository implementations for the forum.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Statement, TransactionTrait,
};
use uuid::Uuid;

use agora_core::domain::{Like, LikeToggle, Messageboard, Post, Topic, TopicReadState, User};
use agora_core::error::RepoError;
use agora_core::ports::{
    LikeRepository, MessageboardRepository, PostPage, PostRepository, ReadStateRepository,
    TopicRepository, UserRepository,
};
use agora_core::slug::SlugRef;

use super::entity::like::{self, Entity as LikeEntity};
use super::entity::messageboard::{self, Entity as MessageboardEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::topic::{self, Entity as TopicEntity};
use super::entity::topic_read_state::{self, Entity as ReadStateEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL messageboard repository.
pub type PostgresMessageboardRepository = PostgresBaseRepository<MessageboardEntity>;

/// PostgreSQL topic repository.
pub type PostgresTopicRepository = PostgresBaseRepository<TopicEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL like repository.
pub type PostgresLikeRepository = PostgresBaseRepository<LikeEntity>;

/// PostgreSQL topic read-state repository.
pub type PostgresReadStateRepository = PostgresBaseRepository<ReadStateEntity>;

fn txn_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Connection(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn touch_activity(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError> {
        UserEntity::update_many()
            .col_expr(user::Column::LastSeenAt, Expr::value(at))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

#[async_trait]
impl MessageboardRepository for PostgresMessageboardRepository {
    async fn find_by_ref(&self, board: &SlugRef) -> Result<Option<Messageboard>, RepoError> {
        let query = match board {
            SlugRef::Id(id) => MessageboardEntity::find_by_id(*id),
            SlugRef::Slug(slug) => {
                MessageboardEntity::find().filter(messageboard::Column::Slug.eq(slug.as_str()))
            }
        };

        let result = query.one(&self.db).await.map_err(map_db_err)?;
        Ok(result.map(Into::into))
    }

    async fn refresh_counters(&self) -> Result<u64, RepoError> {
        // Recompute both counters from the source tables in one statement.
        let stmt = Statement::from_string(
            DatabaseBackend::Postgres,
            r#"UPDATE messageboards m SET
                topics_count = (SELECT COUNT(*) FROM topics t WHERE t.messageboard_id = m.id),
                posts_count = (SELECT COUNT(*) FROM posts p
                    JOIN topics t ON p.topic_id = t.id
                    WHERE t.messageboard_id = m.id),
                updated_at = NOW()"#,
        );

        let result = self.db.execute(stmt).await.map_err(map_db_err)?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TopicRepository for PostgresTopicRepository {
    async fn find_in_messageboard(
        &self,
        messageboard_id: Uuid,
        topic_ref: &SlugRef,
    ) -> Result<Option<Topic>, RepoError> {
        let query =
            TopicEntity::find().filter(topic::Column::MessageboardId.eq(messageboard_id));
        let query = match topic_ref {
            SlugRef::Id(id) => query.filter(topic::Column::Id.eq(*id)),
            SlugRef::Slug(slug) => query.filter(topic::Column::Slug.eq(slug.as_str())),
        };

        let result = query.one(&self.db).await.map_err(map_db_err)?;
        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_by_topic(
        &self,
        topic_id: Uuid,
        page: u64,
        per_page: u64,
    ) -> Result<PostPage, RepoError> {
        let paginator = PostEntity::find()
            .filter(post::Column::TopicId.eq(topic_id))
            .order_by_asc(post::Column::CreatedAt)
            .paginate(&self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(page.max(1) - 1)
            .await
            .map_err(map_db_err)?;

        Ok(PostPage {
            posts: models.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn previous_in_topic(&self, target: &Post) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::TopicId.eq(target.topic_id))
            .filter(post::Column::CreatedAt.lt(target.created_at))
            .order_by_desc(post::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create_in_topic(&self, new_post: Post) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(txn_err)?;

        let topic_row = TopicEntity::find_by_id(new_post.topic_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let created_at = new_post.created_at;
        let active: post::ActiveModel = new_post.into();
        let model = active.insert(&txn).await.map_err(map_db_err)?;

        TopicEntity::update_many()
            .col_expr(
                topic::Column::PostsCount,
                Expr::col(topic::Column::PostsCount).add(1),
            )
            .col_expr(topic::Column::LastPostAt, Expr::value(created_at))
            .col_expr(topic::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(topic::Column::Id.eq(topic_row.id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        MessageboardEntity::update_many()
            .col_expr(
                messageboard::Column::PostsCount,
                Expr::col(messageboard::Column::PostsCount).add(1),
            )
            .filter(messageboard::Column::Id.eq(topic_row.messageboard_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(txn_err)?;
        Ok(model.into())
    }

    async fn delete_with_counters(&self, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(txn_err)?;

        let post_row = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;
        let topic_row = TopicEntity::find_by_id(post_row.topic_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        // last_post_at must point at the latest remaining post, if any
        let last_remaining = PostEntity::find()
            .filter(post::Column::TopicId.eq(topic_row.id))
            .order_by_desc(post::Column::CreatedAt)
            .one(&txn)
            .await
            .map_err(map_db_err)?;

        TopicEntity::update_many()
            .col_expr(
                topic::Column::PostsCount,
                Expr::col(topic::Column::PostsCount).sub(1),
            )
            .col_expr(
                topic::Column::LastPostAt,
                Expr::value(last_remaining.map(|p| p.created_at)),
            )
            .col_expr(topic::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(topic::Column::Id.eq(topic_row.id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        MessageboardEntity::update_many()
            .col_expr(
                messageboard::Column::PostsCount,
                Expr::col(messageboard::Column::PostsCount).sub(1),
            )
            .filter(messageboard::Column::Id.eq(topic_row.messageboard_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(txn_err)?;
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn toggle(&self, user_id: Uuid, post_id: Uuid) -> Result<LikeToggle, RepoError> {
        let txn = self.db.begin().await.map_err(txn_err)?;

        if PostEntity::find_by_id(post_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(RepoError::NotFound);
        }

        let existing = LikeEntity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .one(&txn)
            .await
            .map_err(map_db_err)?;

        let liked = match existing {
            Some(row) => {
                LikeEntity::delete_by_id(row.id)
                    .exec(&txn)
                    .await
                    .map_err(map_db_err)?;
                PostEntity::update_many()
                    .col_expr(
                        post::Column::LikesCount,
                        Expr::col(post::Column::LikesCount).sub(1),
                    )
                    .filter(post::Column::Id.eq(post_id))
                    .exec(&txn)
                    .await
                    .map_err(map_db_err)?;
                false
            }
            None => {
                // The unique index on (user_id, post_id) turns a concurrent
                // double-like into a constraint error.
                let active: like::ActiveModel = Like::new(user_id, post_id).into();
                active.insert(&txn).await.map_err(map_db_err)?;
                PostEntity::update_many()
                    .col_expr(
                        post::Column::LikesCount,
                        Expr::col(post::Column::LikesCount).add(1),
                    )
                    .filter(post::Column::Id.eq(post_id))
                    .exec(&txn)
                    .await
                    .map_err(map_db_err)?;
                true
            }
        };

        let likes_count = PostEntity::find_by_id(post_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .likes_count;

        txn.commit().await.map_err(txn_err)?;
        Ok(LikeToggle { liked, likes_count })
    }

    async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<LikeToggle, RepoError> {
        let txn = self.db.begin().await.map_err(txn_err)?;

        if PostEntity::find_by_id(post_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(RepoError::NotFound);
        }

        let deleted = LikeEntity::delete_many()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?
            .rows_affected;

        if deleted > 0 {
            PostEntity::update_many()
                .col_expr(
                    post::Column::LikesCount,
                    Expr::col(post::Column::LikesCount).sub(1),
                )
                .filter(post::Column::Id.eq(post_id))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        let likes_count = PostEntity::find_by_id(post_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .likes_count;

        txn.commit().await.map_err(txn_err)?;
        Ok(LikeToggle {
            liked: false,
            likes_count,
        })
    }

    async fn find(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl ReadStateRepository for PostgresReadStateRepository {
    async fn mark_read(
        &self,
        user_id: Uuid,
        topic_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<TopicReadState, RepoError> {
        let existing = ReadStateEntity::find_by_id((user_id, topic_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        match existing {
            Some(row) => {
                let mut state: TopicReadState = row.into();
                if state.observe(at) {
                    let active: topic_read_state::ActiveModel = state.clone().into();
                    active.update(&self.db).await.map_err(map_db_err)?;
                }
                Ok(state)
            }
            None => {
                let state = TopicReadState::new(user_id, topic_id, at);
                let active: topic_read_state::ActiveModel = state.clone().into();
                active.insert(&self.db).await.map_err(map_db_err)?;
                Ok(state)
            }
        }
    }

    async fn rewind(
        &self,
        user_id: Uuid,
        topic_id: Uuid,
        at: Option<DateTime<Utc>>,
    ) -> Result<(), RepoError> {
        match at {
            Some(at) => {
                // Unlike mark_read, a rewind moves the watermark backward, so
                // the upsert overwrites unconditionally.
                let state = TopicReadState::new(user_id, topic_id, at);
                let active: topic_read_state::ActiveModel = state.into();
                ReadStateEntity::insert(active)
                    .on_conflict(
                        OnConflict::columns([
                            topic_read_state::Column::UserId,
                            topic_read_state::Column::TopicId,
                        ])
                        .update_column(topic_read_state::Column::ReadAt)
                        .to_owned(),
                    )
                    .exec(&self.db)
                    .await
                    .map_err(map_db_err)?;
            }
            None => {
                ReadStateEntity::delete_many()
                    .filter(topic_read_state::Column::UserId.eq(user_id))
                    .filter(topic_read_state::Column::TopicId.eq(topic_id))
                    .exec(&self.db)
                    .await
                    .map_err(map_db_err)?;
            }
        }
        Ok(())
    }

    async fn get(
        &self,
        user_id: Uuid,
        topic_id: Uuid,
    ) -> Result<Option<TopicReadState>, RepoError> {
        let result = ReadStateEntity::find_by_id((user_id, topic_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}
