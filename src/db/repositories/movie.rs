use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::movies;

/// Descriptive fields a client may set on a movie. Ownership and the derived
/// average are deliberately absent.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub description: Option<String>,
    pub genres: Option<String>,
    pub writer: Option<String>,
    pub director: Option<String>,
    pub cast: String,
    pub language: Option<String>,
    pub runtime: Option<String>,
    pub year_released: i32,
}

pub struct MovieRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> MovieRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<movies::Model>> {
        movies::Entity::find_by_id(id)
            .one(self.conn)
            .await
            .context("Failed to query movie by ID")
    }

    pub async fn list(&self, skip: u64, limit: u64) -> Result<Vec<movies::Model>> {
        movies::Entity::find()
            .order_by_asc(movies::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.conn)
            .await
            .context("Failed to list movies")
    }

    pub async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<movies::Model>> {
        movies::Entity::find()
            .filter(movies::Column::OwnerId.eq(owner_id))
            .order_by_asc(movies::Column::Id)
            .all(self.conn)
            .await
            .context("Failed to list movies by owner")
    }

    pub async fn search_title(
        &self,
        needle: &str,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<movies::Model>> {
        movies::Entity::find()
            .filter(movies::Column::Title.contains(needle))
            .order_by_asc(movies::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.conn)
            .await
            .context("Failed to search movies by title")
    }

    pub async fn insert(&self, owner_id: i32, movie: NewMovie) -> Result<movies::Model> {
        let model = movies::ActiveModel {
            title: Set(movie.title),
            description: Set(movie.description),
            genres: Set(movie.genres),
            writer: Set(movie.writer),
            director: Set(movie.director),
            cast: Set(movie.cast),
            language: Set(movie.language),
            runtime: Set(movie.runtime),
            year_released: Set(movie.year_released),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            owner_id: Set(owner_id),
            average_rating: Set(None),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        Ok(model)
    }

    /// Replaces the descriptive fields of an existing movie.
    pub async fn update_details(
        &self,
        existing: movies::Model,
        movie: NewMovie,
    ) -> Result<movies::Model> {
        let mut active: movies::ActiveModel = existing.into();
        active.title = Set(movie.title);
        active.description = Set(movie.description);
        active.genres = Set(movie.genres);
        active.writer = Set(movie.writer);
        active.director = Set(movie.director);
        active.cast = Set(movie.cast);
        active.language = Set(movie.language);
        active.runtime = Set(movie.runtime);
        active.year_released = Set(movie.year_released);

        Ok(active.update(self.conn).await?)
    }

    pub async fn set_average_rating(&self, id: i32, average: Option<f64>) -> Result<()> {
        movies::Entity::update_many()
            .col_expr(
                movies::Column::AverageRating,
                sea_orm::sea_query::Expr::value(average),
            )
            .filter(movies::Column::Id.eq(id))
            .exec(self.conn)
            .await
            .context("Failed to store average rating")?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = movies::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
