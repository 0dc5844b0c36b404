use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::slugify;

/// Messageboard entity - a named collection of topics.
///
/// `topics_count` and `posts_count` are denormalized; post and topic writes
/// keep them current and a background job reconciles drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messageboard {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub topics_count: i64,
    pub posts_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Messageboard {
    /// Create a new messageboard; the slug is derived from the name.
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        let slug = slugify(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
            description,
            topics_count: 0,
            posts_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
