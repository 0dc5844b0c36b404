//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Query parameters for composing a new post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPostQuery {
    /// When set, the draft content is prefilled with a quote of this post.
    pub quote_post_id: Option<Uuid>,
}

/// Draft payload returned by the `new` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraftResponse {
    pub topic_id: Uuid,
    pub content: String,
}

/// Request to create a post in a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

/// Request to update a post's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub content: String,
}

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub likes_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Query parameters for listing a topic's posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListQuery {
    /// 1-based page number; defaults to the first page.
    pub page: Option<u64>,
}

/// Read-state change acknowledgement for mark-as-read / mark-as-unread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadStateResponse {
    pub read: bool,
}

/// Outcome of a like or dislike action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    /// `"like"` when the caller now likes the post, `"unlike"` otherwise.
    pub kind: String,
    pub likes_count: i64,
}

impl LikeResponse {
    pub fn like(likes_count: i64) -> Self {
        Self {
            kind: "like".to_string(),
            likes_count,
        }
    }

    pub fn unlike(likes_count: i64) -> Self {
        Self {
            kind: "unlike".to_string(),
            likes_count,
        }
    }
}
