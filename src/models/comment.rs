use serde::Serialize;

use super::{MovieSummary, UserSummary};
use crate::domain::{CommentId, MovieId, ReplyId, UserId};
use crate::entities::replies;

/// A comment together with its author, its movie and every reply in the order
/// the replies were written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentThread {
    pub id: CommentId,
    pub comment: String,
    pub created_at: String,
    pub user: UserSummary,
    pub movie: MovieSummary,
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub id: ReplyId,
    pub reply: String,
    pub user_id: UserId,
    pub comment_id: CommentId,
    /// Text of the parent comment when this reply was written.
    pub original_comment: String,
    pub movie_id: MovieId,
    pub created_at: String,
}

impl From<replies::Model> for Reply {
    fn from(model: replies::Model) -> Self {
        Self {
            id: ReplyId::new(model.id),
            reply: model.reply,
            user_id: UserId::new(model.user_id),
            comment_id: CommentId::new(model.comment_id),
            original_comment: model.original_comment,
            movie_id: MovieId::new(model.movie_id),
            created_at: model.created_at,
        }
    }
}
