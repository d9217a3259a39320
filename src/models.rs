pub mod feed;
pub mod feed_follow;
pub mod post;
pub mod user;

pub use feed::Feed;
pub use feed_follow::FeedFollow;
pub use post::Post;
pub use user::User;
