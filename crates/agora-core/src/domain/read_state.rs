use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user read tracking for a topic.
///
/// `read_at` is a watermark: every post created at or before it counts as
/// read. Marking a post read moves the watermark forward, never backward, so
/// a stale client re-marking an old post cannot un-read newer ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicReadState {
    pub user_id: Uuid,
    pub topic_id: Uuid,
    pub read_at: DateTime<Utc>,
}

impl TopicReadState {
    pub fn new(user_id: Uuid, topic_id: Uuid, read_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            topic_id,
            read_at,
        }
    }

    /// Advance the watermark to `post_at` if it is later than the current
    /// one. Returns true when the watermark moved.
    pub fn observe(&mut self, post_at: DateTime<Utc>) -> bool {
        if post_at > self.read_at {
            self.read_at = post_at;
            true
        } else {
            false
        }
    }

    /// Whether a post created at `post_at` counts as read.
    pub fn has_read(&self, post_at: DateTime<Utc>) -> bool {
        post_at <= self.read_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn observe_moves_forward_only() {
        let start = Utc::now();
        let mut state = TopicReadState::new(Uuid::new_v4(), Uuid::new_v4(), start);

        let later = start + TimeDelta::minutes(5);
        assert!(state.observe(later));
        assert_eq!(state.read_at, later);

        // An older post must not rewind the watermark.
        assert!(!state.observe(start));
        assert_eq!(state.read_at, later);
    }

    #[test]
    fn has_read_respects_watermark() {
        let now = Utc::now();
        let state = TopicReadState::new(Uuid::new_v4(), Uuid::new_v4(), now);

        assert!(state.has_read(now));
        assert!(state.has_read(now - TimeDelta::hours(1)));
        assert!(!state.has_read(now + TimeDelta::seconds(1)));
    }
}
