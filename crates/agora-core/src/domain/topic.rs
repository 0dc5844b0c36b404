use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::slugify;

/// Topic entity - a discussion thread within a messageboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: Uuid,
    pub messageboard_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    /// URL-friendly identifier, unique within the messageboard.
    pub slug: String,
    pub posts_count: i64,
    pub last_post_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Topic {
    /// Create a new topic; the slug is derived from the title.
    pub fn new(messageboard_id: Uuid, user_id: Uuid, title: String) -> Self {
        let now = Utc::now();
        let slug = slugify(&title);
        Self {
            id: Uuid::new_v4(),
            messageboard_id,
            user_id,
            title,
            slug,
            posts_count: 0,
            last_post_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
