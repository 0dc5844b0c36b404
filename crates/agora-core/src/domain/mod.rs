//! Domain entities - the core business objects of the forum.

mod like;
mod messageboard;
mod post;
mod read_state;
mod topic;
mod user;

pub use like::{Like, LikeToggle};
pub use messageboard::Messageboard;
pub use post::Post;
pub use read_state::TopicReadState;
pub use topic::Topic;
pub use user::User;
