pub mod comment;
pub mod movie;
pub mod rating;
pub mod reply;
pub mod user;
