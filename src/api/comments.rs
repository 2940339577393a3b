use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, CommentRequest, MessageResponse, ReplyRequest};
use crate::domain::{CommentId, MovieId, ReplyId};
use crate::models::CommentThread;
use crate::services::CommentService;

/// POST /movies/{id}/comments
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(movie_id): Path<i32>,
    Json(payload): Json<CommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentThread>>), ApiError> {
    let movie_id = validate_id(movie_id, "movie")?;
    let thread = state
        .comment_service()
        .create_comment(MovieId::new(movie_id), user.id, &payload.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(thread))))
}

/// GET /movies/{id}/comments
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<CommentThread>>>, ApiError> {
    let movie_id = validate_id(movie_id, "movie")?;
    let threads = state
        .comment_service()
        .get_comments_for_movie(MovieId::new(movie_id))
        .await?;
    Ok(Json(ApiResponse::success(threads)))
}

/// DELETE /comments/{id}
///
/// Removes the comment together with all of its replies.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(comment_id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let comment_id = validate_id(comment_id, "comment")?;
    state
        .comment_service()
        .delete_comment(CommentId::new(comment_id), user.id)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Comment {comment_id} deleted"
    )))))
}

/// POST /comments/{id}/replies
///
/// Responds with the whole parent thread, new reply last.
pub async fn create_reply(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(comment_id): Path<i32>,
    Json(payload): Json<ReplyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentThread>>), ApiError> {
    let comment_id = validate_id(comment_id, "comment")?;
    let thread = state
        .comment_service()
        .create_reply(CommentId::new(comment_id), user.id, &payload.reply)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(thread))))
}

/// DELETE /replies/{id}
pub async fn delete_reply(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(reply_id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let reply_id = validate_id(reply_id, "reply")?;
    state
        .comment_service()
        .delete_reply(ReplyId::new(reply_id), user.id)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Reply {reply_id} deleted"
    )))))
}
