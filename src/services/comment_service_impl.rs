//! `SeaORM` implementation of the `CommentService` trait.

use crate::db::{CommentRepository, MovieRepository, ReplyRepository, Store, UserRepository};
use crate::domain::{Access, CommentId, MovieId, ReplyId, UserId, authorize};
use crate::entities::{comments, movies};
use crate::models::{CommentThread, MovieSummary, Reply, UserSummary};
use crate::services::CatalogError;
use crate::services::comment_service::{CommentService, validate_text};
use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use std::collections::HashMap;
use tracing::{info, warn};

pub struct SeaOrmCommentService {
    store: Store,
    max_text_length: usize,
}

impl SeaOrmCommentService {
    #[must_use]
    pub const fn new(store: Store, max_text_length: usize) -> Self {
        Self {
            store,
            max_text_length,
        }
    }
}

/// Assembles threads for `comments` of a single movie with a fixed number of
/// queries: one for all replies and one for all authors.
async fn build_threads<C: ConnectionTrait>(
    conn: &C,
    movie: &movies::Model,
    comments: Vec<comments::Model>,
) -> Result<Vec<CommentThread>, CatalogError> {
    let comment_ids: Vec<i32> = comments.iter().map(|c| c.id).collect();
    let all_replies = ReplyRepository::new(conn)
        .list_for_comments(&comment_ids)
        .await?;

    let mut author_ids: Vec<i32> = comments.iter().map(|c| c.user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<i32, UserSummary> = UserRepository::new(conn)
        .get_by_ids(&author_ids)
        .await?
        .iter()
        .map(|u| (u.id, UserSummary::from(u)))
        .collect();

    let mut replies_by_comment: HashMap<i32, Vec<Reply>> = HashMap::new();
    for reply in all_replies {
        replies_by_comment
            .entry(reply.comment_id)
            .or_default()
            .push(Reply::from(reply));
    }

    let movie_summary = MovieSummary::from(movie);

    comments
        .into_iter()
        .map(|comment| {
            let user = authors
                .get(&comment.user_id)
                .cloned()
                .ok_or_else(|| CatalogError::not_found("User", comment.user_id))?;

            Ok(CommentThread {
                id: CommentId::new(comment.id),
                replies: replies_by_comment.remove(&comment.id).unwrap_or_default(),
                comment: comment.comment,
                created_at: comment.created_at,
                user,
                movie: movie_summary.clone(),
            })
        })
        .collect()
}

async fn load_movie<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
) -> Result<movies::Model, CatalogError> {
    MovieRepository::new(conn)
        .get(movie_id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Movie", movie_id))
}

#[async_trait]
impl CommentService for SeaOrmCommentService {
    async fn create_comment(
        &self,
        movie_id: MovieId,
        user_id: UserId,
        text: &str,
    ) -> Result<CommentThread, CatalogError> {
        let txn = self.store.begin().await?;
        let movie = load_movie(&txn, movie_id.value()).await?;
        let text = validate_text(text, self.max_text_length)?;

        let comment = CommentRepository::new(&txn)
            .insert(movie.id, user_id.value(), text)
            .await?;
        let comment_id = comment.id;

        let mut threads = build_threads(&txn, &movie, vec![comment]).await?;
        txn.commit().await?;

        metrics::counter!("comments_created_total").increment(1);
        info!(comment_id, %movie_id, %user_id, "Comment created");

        threads
            .pop()
            .ok_or_else(|| CatalogError::Internal("Created comment vanished".to_string()))
    }

    async fn create_reply(
        &self,
        comment_id: CommentId,
        user_id: UserId,
        text: &str,
    ) -> Result<CommentThread, CatalogError> {
        let txn = self.store.begin().await?;

        let parent = CommentRepository::new(&txn)
            .get(comment_id.value())
            .await?
            .ok_or_else(|| CatalogError::not_found("Comment", comment_id.value()))?;
        let text = validate_text(text, self.max_text_length)?;

        let reply_repo = ReplyRepository::new(&txn);
        let mut thread_replies: Vec<Reply> = reply_repo
            .list_for_comment(parent.id)
            .await?
            .into_iter()
            .map(Reply::from)
            .collect();

        let reply = reply_repo.insert(&parent, user_id.value(), text).await?;
        let reply_id = reply.id;
        thread_replies.push(Reply::from(reply));

        let movie = load_movie(&txn, parent.movie_id).await?;
        let author = UserRepository::new(&txn)
            .get_by_id(parent.user_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("User", parent.user_id))?;

        txn.commit().await?;

        metrics::counter!("replies_created_total").increment(1);
        info!(reply_id, %comment_id, %user_id, "Reply created");

        Ok(CommentThread {
            id: CommentId::new(parent.id),
            comment: parent.comment,
            created_at: parent.created_at,
            user: UserSummary::from(&author),
            movie: MovieSummary::from(&movie),
            replies: thread_replies,
        })
    }

    async fn delete_comment(
        &self,
        comment_id: CommentId,
        acting_user_id: UserId,
    ) -> Result<(), CatalogError> {
        let txn = self.store.begin().await?;
        let comments = CommentRepository::new(&txn);

        let existing = comments
            .get(comment_id.value())
            .await?
            .ok_or_else(|| CatalogError::not_found("Comment", comment_id.value()))?;

        if authorize(UserId::new(existing.user_id), acting_user_id) == Access::Deny {
            warn!(%comment_id, %acting_user_id, "Comment deletion denied");
            return Err(CatalogError::forbidden("delete", "comment", comment_id));
        }

        // The foreign key cascades too; deleting explicitly keeps the count for the log.
        let removed_replies = ReplyRepository::new(&txn)
            .delete_for_comment(existing.id)
            .await?;
        comments.delete(existing.id).await?;
        txn.commit().await?;

        info!(%comment_id, removed_replies, "Comment deleted");
        Ok(())
    }

    async fn delete_reply(
        &self,
        reply_id: ReplyId,
        acting_user_id: UserId,
    ) -> Result<(), CatalogError> {
        let replies = self.store.replies();

        let existing = replies
            .get(reply_id.value())
            .await?
            .ok_or_else(|| CatalogError::not_found("Reply", reply_id.value()))?;

        if authorize(UserId::new(existing.user_id), acting_user_id) == Access::Deny {
            warn!(%reply_id, %acting_user_id, "Reply deletion denied");
            return Err(CatalogError::forbidden("delete", "reply", reply_id));
        }

        replies.delete(existing.id).await?;

        info!(%reply_id, comment_id = existing.comment_id, "Reply deleted");
        Ok(())
    }

    async fn get_comments_for_movie(
        &self,
        movie_id: MovieId,
    ) -> Result<Vec<CommentThread>, CatalogError> {
        let movie = load_movie(&self.store.conn, movie_id.value()).await?;
        let comments = self.store.comments().list_for_movie(movie.id).await?;

        build_threads(&self.store.conn, &movie, comments).await
    }
}
