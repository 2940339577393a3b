//! `SeaORM` implementation of the `RatingService` trait.
//!
//! Each mutation runs in a single transaction: the rating row changes and the
//! movie's average is recomputed from the rows visible inside that same
//! transaction, so a failure at any step leaves the stored average untouched.

use crate::db::{MovieRepository, RatingRepository, Store};
use crate::domain::{Access, MovieId, RatingId, RatingValue, UserId, authorize, average_rating};
use crate::models::Rating;
use crate::services::catalog_error::is_unique_violation;
use crate::services::rating_service::{RatingChange, RatingService};
use crate::services::CatalogError;
use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use tracing::{info, warn};

pub struct SeaOrmRatingService {
    store: Store,
}

impl SeaOrmRatingService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Recomputes and stores the average rating of `movie_id` on `conn`.
pub(crate) async fn recompute_average<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
) -> Result<Option<f64>, CatalogError> {
    let values = RatingRepository::new(conn).values_for_movie(movie_id).await?;
    let average = average_rating(&values);

    MovieRepository::new(conn)
        .set_average_rating(movie_id, average)
        .await?;

    info!(
        movie_id,
        ratings = values.len(),
        average = ?average,
        "Average rating recomputed"
    );

    Ok(average)
}

#[async_trait]
impl RatingService for SeaOrmRatingService {
    async fn create_rating(
        &self,
        movie_id: MovieId,
        user_id: UserId,
        value: f64,
    ) -> Result<RatingChange, CatalogError> {
        let txn = self.store.begin().await?;

        if MovieRepository::new(&txn)
            .get(movie_id.value())
            .await?
            .is_none()
        {
            return Err(CatalogError::not_found("Movie", movie_id.value()));
        }

        let ratings = RatingRepository::new(&txn);

        if ratings
            .find_by_user_and_movie(user_id.value(), movie_id.value())
            .await?
            .is_some()
        {
            warn!(%user_id, %movie_id, "Duplicate rating rejected");
            metrics::counter!("catalog_conflicts_total", "reason" => "duplicate_rating")
                .increment(1);
            return Err(CatalogError::DuplicateRating { user_id, movie_id });
        }

        let value = RatingValue::new(value).map_err(CatalogError::RatingOutOfRange)?;

        let rating = match ratings
            .insert(movie_id.value(), user_id.value(), value.value())
            .await
        {
            Ok(rating) => rating,
            // Lost a race with a concurrent insert for the same pair.
            Err(e) if is_unique_violation(&e) => {
                metrics::counter!("catalog_conflicts_total", "reason" => "duplicate_rating")
                    .increment(1);
                return Err(CatalogError::DuplicateRating { user_id, movie_id });
            }
            Err(e) => return Err(e.into()),
        };

        let average = recompute_average(&txn, movie_id.value()).await?;
        txn.commit().await?;

        metrics::counter!("ratings_created_total").increment(1);
        info!(rating_id = rating.id, %movie_id, %user_id, rating = %value, "Rating created");

        Ok(RatingChange {
            rating: Rating::from(rating),
            average_rating: average,
        })
    }

    async fn delete_rating(
        &self,
        rating_id: RatingId,
        acting_user_id: UserId,
    ) -> Result<RatingChange, CatalogError> {
        let txn = self.store.begin().await?;
        let ratings = RatingRepository::new(&txn);

        let existing = ratings
            .get(rating_id.value())
            .await?
            .ok_or_else(|| CatalogError::not_found("Rating", rating_id.value()))?;

        if authorize(UserId::new(existing.user_id), acting_user_id) == Access::Deny {
            warn!(%rating_id, %acting_user_id, "Rating deletion denied");
            return Err(CatalogError::forbidden("delete", "rating", rating_id));
        }

        ratings.delete(existing.id).await?;
        let average = recompute_average(&txn, existing.movie_id).await?;
        txn.commit().await?;

        metrics::counter!("ratings_deleted_total").increment(1);
        info!(%rating_id, movie_id = existing.movie_id, "Rating deleted");

        Ok(RatingChange {
            rating: Rating::from(existing),
            average_rating: average,
        })
    }

    async fn list_ratings(&self, movie_id: MovieId) -> Result<Vec<Rating>, CatalogError> {
        if self.store.movies().get(movie_id.value()).await?.is_none() {
            return Err(CatalogError::not_found("Movie", movie_id.value()));
        }

        let ratings = self
            .store
            .ratings()
            .list_for_movie(movie_id.value())
            .await?;

        Ok(ratings.into_iter().map(Rating::from).collect())
    }
}
