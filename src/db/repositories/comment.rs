use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::comments;

pub struct CommentRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CommentRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<comments::Model>> {
        comments::Entity::find_by_id(id)
            .one(self.conn)
            .await
            .context("Failed to query comment by ID")
    }

    pub async fn list_for_movie(&self, movie_id: i32) -> Result<Vec<comments::Model>> {
        comments::Entity::find()
            .filter(comments::Column::MovieId.eq(movie_id))
            .order_by_asc(comments::Column::Id)
            .all(self.conn)
            .await
            .context("Failed to list comments for movie")
    }

    pub async fn count_for_movie(&self, movie_id: i32) -> Result<u64> {
        Ok(comments::Entity::find()
            .filter(comments::Column::MovieId.eq(movie_id))
            .count(self.conn)
            .await?)
    }

    pub async fn insert(&self, movie_id: i32, user_id: i32, text: &str) -> Result<comments::Model> {
        let model = comments::ActiveModel {
            comment: Set(text.to_string()),
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
        let result = comments::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
