use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{comments, replies};

pub struct ReplyRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ReplyRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<replies::Model>> {
        replies::Entity::find_by_id(id)
            .one(self.conn)
            .await
            .context("Failed to query reply by ID")
    }

    pub async fn list_for_comment(&self, comment_id: i32) -> Result<Vec<replies::Model>> {
        replies::Entity::find()
            .filter(replies::Column::CommentId.eq(comment_id))
            .order_by_asc(replies::Column::Id)
            .all(self.conn)
            .await
            .context("Failed to list replies for comment")
    }

    /// Replies for several comments in one query, ordered by insertion.
    pub async fn list_for_comments(&self, comment_ids: &[i32]) -> Result<Vec<replies::Model>> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }

        replies::Entity::find()
            .filter(replies::Column::CommentId.is_in(comment_ids.iter().copied()))
            .order_by_asc(replies::Column::Id)
            .all(self.conn)
            .await
            .context("Failed to list replies for comments")
    }

    /// Inserts a reply under `parent`, copying the parent's text and movie.
    pub async fn insert(
        &self,
        parent: &comments::Model,
        user_id: i32,
        text: &str,
    ) -> Result<replies::Model> {
        let model = replies::ActiveModel {
            reply: Set(text.to_string()),
            original_comment: Set(parent.comment.clone()),
            movie_id: Set(parent.movie_id),
            comment_id: Set(parent.id),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        Ok(model)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = replies::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_for_comment(&self, comment_id: i32) -> Result<u64> {
        let result = replies::Entity::delete_many()
            .filter(replies::Column::CommentId.eq(comment_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
