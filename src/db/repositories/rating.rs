use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::ratings;

pub struct RatingRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> RatingRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<ratings::Model>> {
        ratings::Entity::find_by_id(id)
            .one(self.conn)
            .await
            .context("Failed to query rating by ID")
    }

    pub async fn find_by_user_and_movie(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> Result<Option<ratings::Model>> {
        ratings::Entity::find()
            .filter(ratings::Column::UserId.eq(user_id))
            .filter(ratings::Column::MovieId.eq(movie_id))
            .one(self.conn)
            .await
            .context("Failed to query existing rating")
    }

    pub async fn list_for_movie(&self, movie_id: i32) -> Result<Vec<ratings::Model>> {
        ratings::Entity::find()
            .filter(ratings::Column::MovieId.eq(movie_id))
            .order_by_asc(ratings::Column::Id)
            .all(self.conn)
            .await
            .context("Failed to list ratings for movie")
    }

    /// Raw rating values for a movie, the input to the average recomputation.
    pub async fn values_for_movie(&self, movie_id: i32) -> Result<Vec<f64>> {
        ratings::Entity::find()
            .select_only()
            .column(ratings::Column::Rating)
            .filter(ratings::Column::MovieId.eq(movie_id))
            .into_tuple::<f64>()
            .all(self.conn)
            .await
            .context("Failed to load rating values")
    }

    pub async fn count_for_movie(&self, movie_id: i32) -> Result<u64> {
        Ok(ratings::Entity::find()
            .filter(ratings::Column::MovieId.eq(movie_id))
            .count(self.conn)
            .await?)
    }

    /// Inserts a rating row. A second row for the same user and movie is
    /// rejected by the unique index; the `DbErr` is kept as the error source so
    /// callers can recognise the violation.
    pub async fn insert(&self, movie_id: i32, user_id: i32, value: f64) -> Result<ratings::Model> {
        let model = ratings::ActiveModel {
            rating: Set(value),
            movie_id: Set(movie_id),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        Ok(model)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = ratings::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
