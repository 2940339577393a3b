//! Domain service for movie ratings.
//!
//! Owns the one-rating-per-user-per-movie rule and the derived
//! `average_rating` of every movie.

use crate::domain::{MovieId, RatingId, UserId};
use crate::models::Rating;
use crate::services::CatalogError;

/// Outcome of a rating mutation: the affected rating and the movie's average
/// as stored by the same transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingChange {
    pub rating: Rating,
    pub average_rating: Option<f64>,
}

#[async_trait::async_trait]
pub trait RatingService: Send + Sync {
    /// Rates a movie on behalf of `user_id`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if the movie does not exist.
    /// - [`CatalogError::DuplicateRating`] if the user already rated it, whatever `value` is.
    /// - [`CatalogError::RatingOutOfRange`] if `value` is outside `[0, 5]`.
    async fn create_rating(
        &self,
        movie_id: MovieId,
        user_id: UserId,
        value: f64,
    ) -> Result<RatingChange, CatalogError>;

    /// Deletes a rating owned by `acting_user_id` and recomputes the average.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] before [`CatalogError::Forbidden`].
    async fn delete_rating(
        &self,
        rating_id: RatingId,
        acting_user_id: UserId,
    ) -> Result<RatingChange, CatalogError>;

    /// All ratings of a movie in insertion order.
    async fn list_ratings(&self, movie_id: MovieId) -> Result<Vec<Rating>, CatalogError>;
}
