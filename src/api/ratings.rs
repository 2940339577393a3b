use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, MessageResponse, RatingRequest};
use crate::domain::{MovieId, RatingId};
use crate::models::Rating;
use crate::services::RatingService;

/// POST /movies/{id}/ratings
///
/// Responds with the created rating. The recomputed average is read back
/// through the movie.
pub async fn create_rating(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(movie_id): Path<i32>,
    Json(payload): Json<RatingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Rating>>), ApiError> {
    let movie_id = validate_id(movie_id, "movie")?;
    let change = state
        .rating_service()
        .create_rating(MovieId::new(movie_id), user.id, payload.rating)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(change.rating))))
}

/// GET /movies/{id}/ratings
pub async fn list_ratings(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<Rating>>>, ApiError> {
    let movie_id = validate_id(movie_id, "movie")?;
    let ratings = state
        .rating_service()
        .list_ratings(MovieId::new(movie_id))
        .await?;
    Ok(Json(ApiResponse::success(ratings)))
}

/// DELETE /ratings/{id}
pub async fn delete_rating(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(rating_id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let rating_id = validate_id(rating_id, "rating")?;
    state
        .rating_service()
        .delete_rating(RatingId::new(rating_id), user.id)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Rating {rating_id} deleted"
    )))))
}
