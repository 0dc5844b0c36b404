//! URL-friendly identifiers for messageboards and topics.
//!
//! Routes accept either a slug or a raw UUID for board and topic segments,
//! mirroring the friendly-id lookup of the original forum.

use uuid::Uuid;

/// A parsed path segment referring to a messageboard or topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugRef {
    Id(Uuid),
    Slug(String),
}

impl SlugRef {
    /// Parse a raw path segment. A segment that parses as a UUID is treated
    /// as an ID; anything else is a slug.
    pub fn parse(segment: &str) -> Self {
        match Uuid::parse_str(segment) {
            Ok(id) => SlugRef::Id(id),
            Err(_) => SlugRef::Slug(segment.to_string()),
        }
    }

    /// Whether this reference addresses the given (id, slug) pair.
    pub fn matches(&self, id: Uuid, slug: &str) -> bool {
        match self {
            SlugRef::Id(candidate) => *candidate == id,
            SlugRef::Slug(candidate) => candidate == slug,
        }
    }
}

/// Derive a slug from a human-readable name: lowercase alphanumeric runs
/// joined by single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_joins_words_with_dashes() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust   &  Forums  "), "rust-forums");
    }

    #[test]
    fn slugify_drops_leading_and_trailing_punctuation() {
        assert_eq!(slugify("--Sticky--"), "sticky");
    }

    #[test]
    fn parse_distinguishes_uuid_from_slug() {
        let id = Uuid::new_v4();
        assert_eq!(SlugRef::parse(&id.to_string()), SlugRef::Id(id));
        assert_eq!(
            SlugRef::parse("general-chat"),
            SlugRef::Slug("general-chat".to_string())
        );
    }

    #[test]
    fn matches_checks_the_right_side() {
        let id = Uuid::new_v4();
        assert!(SlugRef::Id(id).matches(id, "anything"));
        assert!(SlugRef::Slug("general".to_string()).matches(id, "general"));
        assert!(!SlugRef::Slug("general".to_string()).matches(id, "other"));
    }
}
