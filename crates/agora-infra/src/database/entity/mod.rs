//! SeaORM entities for the forum schema.

pub mod like;
pub mod messageboard;
pub mod post;
pub mod topic;
pub mod topic_read_state;
pub mod user;
