//! Post handlers - create, edit, delete, read tracking, quoting, reactions.

use std::time::Duration;

use actix_web::{HttpResponse, http::header, web};
use serde::Serialize;
use uuid::Uuid;

use agora_core::content::quote_content;
use agora_core::domain::{Messageboard, Post, Topic};
use agora_core::policy::{PostPolicy, authorize};
use agora_core::slug::SlugRef;
use agora_shared::Page;
use agora_shared::dto::{
    CreatePostRequest, LikeResponse, NewPostQuery, PostDraftResponse, PostListQuery, PostResponse,
    ReadStateResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const QUOTE_CACHE_TTL: Duration = Duration::from_secs(3600);

fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id,
        topic_id: post.topic_id,
        user_id: post.user_id,
        content: post.content.clone(),
        likes_count: post.likes_count,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

/// Resolve the `{board}/{topic}` path segments to records, 404ing on either.
async fn board_and_topic(
    state: &AppState,
    board_seg: &str,
    topic_seg: &str,
) -> Result<(Messageboard, Topic), AppError> {
    let board = state
        .messageboards
        .find_by_ref(&SlugRef::parse(board_seg))
        .await?
        .ok_or_else(|| AppError::NotFound("Messageboard not found".to_string()))?;

    let topic = state
        .topics
        .find_in_messageboard(board.id, &SlugRef::parse(topic_seg))
        .await?
        .ok_or_else(|| AppError::NotFound("Topic not found".to_string()))?;

    Ok((board, topic))
}

/// Resolve a `{id}` path segment to a post. Malformed UUIDs read as unknown
/// records and 404, matching lookup-by-identifier semantics elsewhere.
async fn post_by_segment(state: &AppState, raw: &str) -> Result<Post, AppError> {
    let id = Uuid::parse_str(raw)
        .map_err(|_| AppError::NotFound("Post not found".to_string()))?;

    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
}

#[derive(Serialize)]
struct PostListResponse {
    posts: Page<PostResponse>,
    /// The caller's read watermark for this topic, if any.
    read_at: Option<String>,
}

/// GET /api/messageboards/{board}/topics/{topic}/posts
pub async fn index(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, String)>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let (board_seg, topic_seg) = path.into_inner();
    let (_board, topic) = board_and_topic(&state, &board_seg, &topic_seg).await?;

    let page = query.page.unwrap_or(1).max(1);
    let listing = state
        .posts
        .list_by_topic(topic.id, page, state.posts_per_page)
        .await?;

    let read_state = state.read_states.get(identity.user_id, topic.id).await?;

    let items = listing.posts.iter().map(post_response).collect();
    let response = PostListResponse {
        posts: Page::new(items, page, state.posts_per_page, listing.total),
        read_at: read_state.map(|s| s.read_at.to_rfc3339()),
    };

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/messageboards/{board}/topics/{topic}/posts/new
///
/// Returns a draft payload for composing a post. With `quote_post_id`, the
/// content is prefilled with a quote of that post.
pub async fn new(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, String)>,
    query: web::Query<NewPostQuery>,
) -> AppResult<HttpResponse> {
    let (board_seg, topic_seg) = path.into_inner();
    let (_board, topic) = board_and_topic(&state, &board_seg, &topic_seg).await?;

    authorize(PostPolicy::can_create(&identity.actor()))?;

    let content = match query.quote_post_id {
        Some(quote_id) => {
            let quoted = state
                .posts
                .find_by_id(quote_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Quoted post not found".to_string()))?;
            quote_content(&quoted.content)
        }
        None => String::new(),
    };

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::Ok().json(PostDraftResponse {
        topic_id: topic.id,
        content,
    }))
}

/// POST /api/messageboards/{board}/topics/{topic}/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, String)>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let (board_seg, topic_seg) = path.into_inner();
    let (_board, topic) = board_and_topic(&state, &board_seg, &topic_seg).await?;

    authorize(PostPolicy::can_create(&identity.actor()))?;

    let post = Post::new(topic.id, identity.user_id, body.into_inner().content)?;
    let saved = state.posts.create_in_topic(post).await?;

    tracing::info!(post_id = %saved.id, topic_id = %topic.id, "Post created");

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::Created().json(post_response(&saved)))
}

/// GET /api/messageboards/{board}/topics/{topic}/posts/{id}/edit
///
/// Returns the post for editing. Requests addressed through a non-canonical
/// board or topic segment get a 301 to the canonical path.
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, String, String)>,
) -> AppResult<HttpResponse> {
    let (board_seg, topic_seg, id_seg) = path.into_inner();
    let post = post_by_segment(&state, &id_seg).await?;

    authorize(PostPolicy::can_update(&identity.actor(), &post))?;

    let topic = state
        .topics
        .find_by_id(post.topic_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Topic not found".to_string()))?;
    let board = state
        .messageboards
        .find_by_id(topic.messageboard_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Messageboard not found".to_string()))?;

    let board_ref = SlugRef::parse(&board_seg);
    let topic_ref = SlugRef::parse(&topic_seg);
    if !board_ref.matches(board.id, &board.slug) || !topic_ref.matches(topic.id, &topic.slug) {
        let location = format!(
            "/api/messageboards/{}/topics/{}/posts/{}/edit",
            board.slug, topic.slug, post.id
        );
        return Ok(HttpResponse::MovedPermanently()
            .insert_header((header::LOCATION, location))
            .finish());
    }

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let mut post = post_by_segment(&state, &path).await?;

    authorize(PostPolicy::can_update(&identity.actor(), &post))?;

    post.edit(body.into_inner().content)?;
    let saved = state.posts.save(post).await?;

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::Ok().json(post_response(&saved)))
}

/// DELETE /api/posts/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = post_by_segment(&state, &path).await?;

    authorize(PostPolicy::can_destroy(&identity.actor(), &post))?;

    state.posts.delete_with_counters(post.id).await?;

    tracing::info!(post_id = %post.id, "Post deleted");

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/read
pub async fn mark_as_read(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = post_by_segment(&state, &path).await?;

    authorize(PostPolicy::can_read(&identity.actor(), &post))?;

    state
        .read_states
        .mark_read(identity.user_id, post.topic_id, post.created_at)
        .await?;

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::Ok().json(ReadStateResponse { read: true }))
}

/// POST /api/posts/{id}/unread
///
/// Rewinds the caller's watermark to the previous post in the topic, or
/// clears the read state when this is the topic's first post.
pub async fn mark_as_unread(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = post_by_segment(&state, &path).await?;

    authorize(PostPolicy::can_read(&identity.actor(), &post))?;

    let previous = state.posts.previous_in_topic(&post).await?;
    state
        .read_states
        .rewind(
            identity.user_id,
            post.topic_id,
            previous.map(|p| p.created_at),
        )
        .await?;

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::Ok().json(ReadStateResponse { read: false }))
}

/// GET /api/posts/{id}/quote
///
/// Returns the post's content as a markdown blockquote, cached per
/// `(post id, updated_at)` so edits invalidate naturally.
pub async fn quote(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = post_by_segment(&state, &path).await?;

    authorize(PostPolicy::can_read(&identity.actor(), &post))?;

    let key = format!("quote:{}:{}", post.id, post.updated_at.timestamp());
    let body = match state.cache.get(&key).await {
        Some(cached) => cached,
        None => {
            let rendered = quote_content(&post.content);
            if let Err(e) = state
                .cache
                .set(&key, &rendered, Some(QUOTE_CACHE_TTL))
                .await
            {
                tracing::warn!(error = %e, "Failed to cache rendered quote");
            }
            rendered
        }
    };

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body))
}

/// POST /api/posts/{id}/like
///
/// Toggle: likes the post when the caller has no like, removes it otherwise.
/// Reactions only require authentication, no further policy check.
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = post_by_segment(&state, &path).await?;

    let outcome = state.likes.toggle(identity.user_id, post.id).await?;

    state.touch_user_activity(identity.user_id).await;
    let response = if outcome.liked {
        LikeResponse::like(outcome.likes_count)
    } else {
        LikeResponse::unlike(outcome.likes_count)
    };
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/posts/{id}/dislike
///
/// Explicit un-like; idempotent when the caller never liked the post.
pub async fn dislike(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = post_by_segment(&state, &path).await?;

    let outcome = state.likes.unlike(identity.user_id, post.id).await?;

    state.touch_user_activity(identity.user_id).await;
    Ok(HttpResponse::Ok().json(LikeResponse::unlike(outcome.likes_count)))
}
