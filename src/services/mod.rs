pub mod catalog_error;
pub use catalog_error::{CatalogError, ErrorKind};

pub mod account_service;
pub mod account_service_impl;
pub use account_service::{AccountService, LoginResult, NewAccount};
pub use account_service_impl::SeaOrmAccountService;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::MovieService;
pub use movie_service_impl::SeaOrmMovieService;

pub mod rating_service;
pub mod rating_service_impl;
pub use rating_service::{RatingChange, RatingService};
pub use rating_service_impl::SeaOrmRatingService;

pub mod comment_service;
pub mod comment_service_impl;
pub use comment_service::CommentService;
pub use comment_service_impl::SeaOrmCommentService;
