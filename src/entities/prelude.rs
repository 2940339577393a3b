pub use super::comments::Entity as Comments;
pub use super::movies::Entity as Movies;
pub use super::ratings::Entity as Ratings;
pub use super::replies::Entity as Replies;
pub use super::users::Entity as Users;
