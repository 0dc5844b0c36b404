//! Authorization predicates for forum actions.
//!
//! Handlers check these before touching a repository; a failed check maps to
//! a 403 at the HTTP layer.

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;

/// The authenticated caller, as carried in token claims.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: Uuid,
    pub roles: Vec<String>,
}

impl Actor {
    pub fn new(user_id: Uuid, roles: Vec<String>) -> Self {
        Self { user_id, roles }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Moderators and admins may act on other users' posts.
    pub fn is_moderator(&self) -> bool {
        self.has_role("moderator") || self.has_role("admin")
    }
}

/// Policy for post actions.
pub struct PostPolicy;

impl PostPolicy {
    /// Any authenticated member may read posts.
    pub fn can_read(_actor: &Actor, _post: &Post) -> bool {
        true
    }

    /// Any authenticated member may create posts.
    pub fn can_create(_actor: &Actor) -> bool {
        true
    }

    /// Authors may edit their own posts; moderators may edit any.
    pub fn can_update(actor: &Actor, post: &Post) -> bool {
        actor.user_id == post.user_id || actor.is_moderator()
    }

    /// Same rule as editing.
    pub fn can_destroy(actor: &Actor, post: &Post) -> bool {
        Self::can_update(actor, post)
    }
}

/// Turn a policy check into a result, for `?`-style use in handlers.
pub fn authorize(allowed: bool) -> Result<(), DomainError> {
    if allowed {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_by(user_id: Uuid) -> Post {
        Post::new(Uuid::new_v4(), user_id, "content".to_string()).unwrap()
    }

    #[test]
    fn author_may_update_own_post() {
        let author = Actor::new(Uuid::new_v4(), vec!["user".to_string()]);
        let post = post_by(author.user_id);
        assert!(PostPolicy::can_update(&author, &post));
    }

    #[test]
    fn stranger_may_not_update_or_destroy() {
        let stranger = Actor::new(Uuid::new_v4(), vec!["user".to_string()]);
        let post = post_by(Uuid::new_v4());
        assert!(!PostPolicy::can_update(&stranger, &post));
        assert!(!PostPolicy::can_destroy(&stranger, &post));
        assert!(matches!(
            authorize(PostPolicy::can_update(&stranger, &post)),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn moderator_may_destroy_any_post() {
        let moderator = Actor::new(Uuid::new_v4(), vec!["moderator".to_string()]);
        let post = post_by(Uuid::new_v4());
        assert!(PostPolicy::can_destroy(&moderator, &post));
    }
}
