//! Domain service for the movie catalog itself.
//!
//! Plain field-level CRUD. The only rule beyond ownership is that a movie with
//! ratings or comments cannot be deleted.

use crate::db::NewMovie;
use crate::domain::{MovieId, Page, UserId};
use crate::models::Movie;
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    async fn create_movie(&self, owner_id: UserId, movie: NewMovie) -> Result<Movie, CatalogError>;

    async fn list_movies(&self, page: Page) -> Result<Vec<Movie>, CatalogError>;

    async fn list_owned_movies(&self, owner_id: UserId) -> Result<Vec<Movie>, CatalogError>;

    /// Substring match on the title.
    async fn search_movies(&self, needle: &str, page: Page) -> Result<Vec<Movie>, CatalogError>;

    async fn get_movie(&self, movie_id: MovieId) -> Result<Movie, CatalogError>;

    /// Replaces the descriptive fields. The average rating is left as is.
    async fn update_movie(
        &self,
        movie_id: MovieId,
        acting_user_id: UserId,
        movie: NewMovie,
    ) -> Result<Movie, CatalogError>;

    /// # Errors
    ///
    /// [`CatalogError::NotFound`], then [`CatalogError::Forbidden`] for non-owners,
    /// then [`CatalogError::MovieInUse`] while ratings or comments exist.
    async fn delete_movie(&self, movie_id: MovieId, acting_user_id: UserId)
    -> Result<(), CatalogError>;
}

pub const MIN_YEAR: i32 = 1870;
pub const MAX_YEAR: i32 = 2100;

/// # Errors
///
/// Returns [`CatalogError::Validation`] for a blank title or a release
/// year outside `MIN_YEAR..=MAX_YEAR`.
pub fn validate_movie(movie: &NewMovie) -> Result<(), CatalogError> {
    if movie.title.trim().is_empty() {
        return Err(CatalogError::validation("Title cannot be empty"));
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&movie.year_released) {
        return Err(CatalogError::validation(format!(
            "Invalid release year: {}. Year must be between {MIN_YEAR} and {MAX_YEAR}",
            movie.year_released
        )));
    }

    Ok(())
}
