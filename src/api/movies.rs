use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{validate_id, validate_limit, validate_search_query};
use super::{ApiError, ApiResponse, AppState, MessageResponse, MovieRequest};
use crate::domain::{MovieId, Page};
use crate::models::Movie;
use crate::services::MovieService;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: u64,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: String,
    #[serde(default)]
    pub skip: u64,
    pub limit: Option<u64>,
}

async fn resolve_page(
    state: &AppState,
    skip: u64,
    limit: Option<u64>,
) -> Result<Page, ApiError> {
    let (default_limit, max_limit) = {
        let config = state.config().read().await;
        (
            config.catalog.default_page_size,
            config.catalog.max_page_size,
        )
    };

    let limit = validate_limit(limit.unwrap_or(default_limit), max_limit)?;
    Ok(Page::new(skip, limit))
}

/// POST /movies
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MovieRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Movie>>), ApiError> {
    let movie = state
        .movie_service()
        .create_movie(user.id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(movie))))
}

/// GET /movies?skip&limit
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    let page = resolve_page(&state, query.skip, query.limit).await?;
    let movies = state.movie_service().list_movies(page).await?;
    Ok(Json(ApiResponse::success(movies)))
}

/// GET /movies/mine
pub async fn list_my_movies(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    let movies = state.movie_service().list_owned_movies(user.id).await?;
    Ok(Json(ApiResponse::success(movies)))
}

/// GET /movies/search?search&skip&limit
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    let needle = validate_search_query(&query.search)?;
    let page = resolve_page(&state, query.skip, query.limit).await?;
    let movies = state.movie_service().search_movies(needle, page).await?;
    Ok(Json(ApiResponse::success(movies)))
}

/// GET /movies/{id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    let id = validate_id(id, "movie")?;
    let movie = state.movie_service().get_movie(MovieId::new(id)).await?;
    Ok(Json(ApiResponse::success(movie)))
}

/// PUT /movies/{id}
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<MovieRequest>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    let id = validate_id(id, "movie")?;
    let movie = state
        .movie_service()
        .update_movie(MovieId::new(id), user.id, payload.into())
        .await?;
    Ok(Json(ApiResponse::success(movie)))
}

/// DELETE /movies/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id, "movie")?;
    state
        .movie_service()
        .delete_movie(MovieId::new(id), user.id)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Movie {id} deleted"
    )))))
}
