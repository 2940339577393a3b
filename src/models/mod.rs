pub mod comment;
pub mod movie;
pub mod rating;
pub mod user;

pub use comment::{CommentThread, Reply};
pub use movie::{Movie, MovieSummary};
pub use rating::Rating;
pub use user::{UserProfile, UserSummary};
