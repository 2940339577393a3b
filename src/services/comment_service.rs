//! Domain service for comments and their replies.
//!
//! Comments are immutable once written. A reply stores a copy of its parent's
//! text and movie at creation time, so a thread can be rendered from the reply
//! rows alone.

use crate::domain::{CommentId, MovieId, ReplyId, UserId};
use crate::models::CommentThread;
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait CommentService: Send + Sync {
    /// Comments on an existing movie and returns the new, reply-less thread.
    async fn create_comment(
        &self,
        movie_id: MovieId,
        user_id: UserId,
        text: &str,
    ) -> Result<CommentThread, CatalogError>;

    /// Replies to a comment and returns the parent thread with the new reply last.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the comment does not exist.
    async fn create_reply(
        &self,
        comment_id: CommentId,
        user_id: UserId,
        text: &str,
    ) -> Result<CommentThread, CatalogError>;

    /// Deletes a comment and every reply under it.
    async fn delete_comment(
        &self,
        comment_id: CommentId,
        acting_user_id: UserId,
    ) -> Result<(), CatalogError>;

    /// Deletes a single reply.
    async fn delete_reply(&self, reply_id: ReplyId, acting_user_id: UserId)
    -> Result<(), CatalogError>;

    /// Every comment of a movie with its replies, oldest first.
    async fn get_comments_for_movie(
        &self,
        movie_id: MovieId,
    ) -> Result<Vec<CommentThread>, CatalogError>;
}

/// Checks a comment or reply body against the configured maximum length.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] for blank or oversized text.
pub fn validate_text(text: &str, max_len: usize) -> Result<&str, CatalogError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::validation("Text cannot be empty"));
    }
    if trimmed.chars().count() > max_len {
        return Err(CatalogError::validation(format!(
            "Text must be {max_len} characters or less"
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_text_trims_and_bounds() {
        assert_eq!(validate_text("  great film ", 20).unwrap(), "great film");
        assert!(validate_text("", 20).is_err());
        assert!(validate_text("   ", 20).is_err());
        assert!(validate_text(&"a".repeat(21), 20).is_err());
        assert!(validate_text(&"é".repeat(20), 20).is_ok());
    }
}
