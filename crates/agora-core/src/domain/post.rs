use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Upper bound on post content length, in characters.
pub const MAX_CONTENT_LENGTH: usize = 65_535;

/// Post entity - a single message within a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    /// Denormalized count of Like rows for this post.
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post. Fails if the content does not validate.
    pub fn new(topic_id: Uuid, user_id: Uuid, content: String) -> Result<Self, DomainError> {
        Self::validate_content(&content)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            topic_id,
            user_id,
            content,
            likes_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the post's content, bumping `updated_at`.
    pub fn edit(&mut self, content: String) -> Result<(), DomainError> {
        Self::validate_content(&content)?;
        self.content = content;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Content must be non-empty after trimming and within the length cap.
    pub fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation("Post content is empty".to_string()));
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(DomainError::Validation(format!(
                "Post content exceeds {} characters",
                MAX_CONTENT_LENGTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_content() {
        let result = Post::new(Uuid::new_v4(), Uuid::new_v4(), "   \n".to_string());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn edit_bumps_updated_at() {
        let mut post = Post::new(Uuid::new_v4(), Uuid::new_v4(), "first".to_string()).unwrap();
        let before = post.updated_at;
        post.edit("second".to_string()).unwrap();
        assert_eq!(post.content, "second");
        assert!(post.updated_at >= before);
    }
}
