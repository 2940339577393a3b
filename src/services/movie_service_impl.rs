//! `SeaORM` implementation of the `MovieService` trait.

use crate::db::{CommentRepository, MovieRepository, NewMovie, RatingRepository, Store};
use crate::domain::{Access, MovieId, Page, UserId, authorize};
use crate::entities::movies;
use crate::models::Movie;
use crate::services::CatalogError;
use crate::services::movie_service::{MovieService, validate_movie};
use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use tracing::{info, warn};

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Loads a movie and checks that `acting_user_id` owns it.
async fn load_owned<C: ConnectionTrait>(
    conn: &C,
    movie_id: MovieId,
    acting_user_id: UserId,
    action: &str,
) -> Result<movies::Model, CatalogError> {
    let movie = MovieRepository::new(conn)
        .get(movie_id.value())
        .await?
        .ok_or_else(|| CatalogError::not_found("Movie", movie_id.value()))?;

    if authorize(UserId::new(movie.owner_id), acting_user_id) == Access::Deny {
        warn!(%movie_id, %acting_user_id, action, "Movie mutation denied");
        return Err(CatalogError::forbidden(action, "movie", movie_id));
    }

    Ok(movie)
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn create_movie(&self, owner_id: UserId, movie: NewMovie) -> Result<Movie, CatalogError> {
        validate_movie(&movie)?;

        let created = self.store.movies().insert(owner_id.value(), movie).await?;
        info!(movie_id = created.id, %owner_id, title = %created.title, "Movie created");

        Ok(Movie::from(created))
    }

    async fn list_movies(&self, page: Page) -> Result<Vec<Movie>, CatalogError> {
        let movies = self.store.movies().list(page.skip, page.limit).await?;
        Ok(movies.into_iter().map(Movie::from).collect())
    }

    async fn list_owned_movies(&self, owner_id: UserId) -> Result<Vec<Movie>, CatalogError> {
        let movies = self.store.movies().list_by_owner(owner_id.value()).await?;
        Ok(movies.into_iter().map(Movie::from).collect())
    }

    async fn search_movies(&self, needle: &str, page: Page) -> Result<Vec<Movie>, CatalogError> {
        let movies = self
            .store
            .movies()
            .search_title(needle, page.skip, page.limit)
            .await?;
        Ok(movies.into_iter().map(Movie::from).collect())
    }

    async fn get_movie(&self, movie_id: MovieId) -> Result<Movie, CatalogError> {
        self.store
            .movies()
            .get(movie_id.value())
            .await?
            .map(Movie::from)
            .ok_or_else(|| CatalogError::not_found("Movie", movie_id.value()))
    }

    async fn update_movie(
        &self,
        movie_id: MovieId,
        acting_user_id: UserId,
        movie: NewMovie,
    ) -> Result<Movie, CatalogError> {
        let txn = self.store.begin().await?;
        let existing = load_owned(&txn, movie_id, acting_user_id, "update").await?;
        validate_movie(&movie)?;

        let updated = MovieRepository::new(&txn)
            .update_details(existing, movie)
            .await?;
        txn.commit().await?;

        info!(%movie_id, "Movie updated");
        Ok(Movie::from(updated))
    }

    async fn delete_movie(
        &self,
        movie_id: MovieId,
        acting_user_id: UserId,
    ) -> Result<(), CatalogError> {
        let txn = self.store.begin().await?;
        let movie = load_owned(&txn, movie_id, acting_user_id, "delete").await?;

        let rating_count = RatingRepository::new(&txn).count_for_movie(movie.id).await?;
        let comment_count = CommentRepository::new(&txn).count_for_movie(movie.id).await?;

        if rating_count > 0 || comment_count > 0 {
            warn!(
                %movie_id,
                rating_count,
                comment_count,
                "Movie deletion blocked by existing ratings or comments"
            );
            metrics::counter!("catalog_conflicts_total", "reason" => "movie_in_use").increment(1);
            return Err(CatalogError::MovieInUse(movie_id));
        }

        MovieRepository::new(&txn).delete(movie.id).await?;
        txn.commit().await?;

        info!(%movie_id, "Movie deleted");
        Ok(())
    }
}
