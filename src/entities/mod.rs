pub mod prelude;

pub mod comments;
pub mod movies;
pub mod ratings;
pub mod replies;
pub mod users;
