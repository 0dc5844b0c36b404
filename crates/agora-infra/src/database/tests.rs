#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use agora_core::domain::{Post, Topic, TopicReadState};
    use agora_core::ports::{
        BaseRepository, LikeRepository, ReadStateRepository, TopicRepository,
    };
    use agora_core::slug::SlugRef;

    use crate::database::entity::{post, topic, topic_read_state};
    use crate::database::postgres_repo::{
        PostgresLikeRepository, PostgresPostRepository, PostgresReadStateRepository,
        PostgresTopicRepository,
    };

    fn post_model(topic_id: Uuid, likes_count: i64) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: Uuid::new_v4(),
            topic_id,
            user_id: Uuid::new_v4(),
            content: "A reply".to_owned(),
            likes_count,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let topic_id = Uuid::new_v4();
        let model = post_model(topic_id, 3);
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.id, post_id);
        assert_eq!(found.topic_id, topic_id);
        assert_eq!(found.likes_count, 3);
    }

    #[tokio::test]
    async fn test_topic_lookup_by_slug_scoped_to_board() {
        let messageboard_id = Uuid::new_v4();
        let now = chrono::Utc::now();
        let model = topic::Model {
            id: Uuid::new_v4(),
            messageboard_id,
            user_id: Uuid::new_v4(),
            title: "General chat".to_owned(),
            slug: "general-chat".to_owned(),
            posts_count: 7,
            last_post_at: Some(now.into()),
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresTopicRepository::new(db);

        let result: Option<Topic> = repo
            .find_in_messageboard(messageboard_id, &SlugRef::Slug("general-chat".to_string()))
            .await
            .unwrap();

        let topic = result.unwrap();
        assert_eq!(topic.slug, "general-chat");
        assert_eq!(topic.messageboard_id, messageboard_id);
    }

    #[tokio::test]
    async fn test_mark_read_ignores_stale_watermark() {
        let user_id = Uuid::new_v4();
        let topic_id = Uuid::new_v4();
        let current = chrono::Utc::now();
        let stale = current - TimeDelta::hours(1);

        // Existing watermark is newer than the post being marked; no update
        // statement should run, so only the lookup is mocked.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![topic_read_state::Model {
                user_id,
                topic_id,
                read_at: current.into(),
            }]])
            .into_connection();

        let repo = PostgresReadStateRepository::new(db);

        let state: TopicReadState = repo.mark_read(user_id, topic_id, stale).await.unwrap();
        assert_eq!(state.read_at, current);
    }

    #[tokio::test]
    async fn test_unlike_without_existing_like_keeps_count() {
        let topic_id = Uuid::new_v4();
        let model = post_model(topic_id, 2);
        let post_id = model.id;
        let user_id = Uuid::new_v4();

        // Queries: post existence check, then the post re-read for the count.
        // Exec: the no-op delete. No decrement runs when nothing was deleted.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()], vec![model]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        let outcome = repo.unlike(user_id, post_id).await.unwrap();
        assert!(!outcome.liked);
        assert_eq!(outcome.likes_count, 2);
    }
}
