use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::CatalogError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    /// Well-formed request whose value the catalog refuses, such as a rating
    /// outside the scale.
    NotAcceptable(String),

    Conflict(String),

    Forbidden(String),

    InternalError(String),

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::NotAcceptable(msg) => write!(f, "Not acceptable: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Machine-readable error class attached to error responses, picked up by the
/// request logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotAcceptable(msg) => (StatusCode::NOT_ACCEPTABLE, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        };

        let code = self.code();
        let body = ApiResponse::<()>::error(error_message);
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(code);
        response
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::NotFound { .. } => Self::NotFound(message),
            CatalogError::DuplicateRating { .. } => Self::Conflict(message),
            CatalogError::MovieInUse(_) => Self::validation(message),
            CatalogError::RatingOutOfRange(_) => Self::NotAcceptable(message),
            CatalogError::Validation(msg) => Self::validation(msg),
            CatalogError::Forbidden(msg) => Self::Forbidden(msg),
            CatalogError::Unauthenticated => Self::Unauthorized(message),
            CatalogError::Database(msg) => Self::DatabaseError(msg),
            CatalogError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl ApiError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode(match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::DatabaseError(_) => "storage",
            ApiError::ValidationError(_) => "validation",
            ApiError::NotAcceptable(_) => "rating_out_of_range",
            ApiError::Conflict(_) => "conflict",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::InternalError(_) => "internal",
            ApiError::Unauthorized(_) => "unauthenticated",
        })
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Authentication required".to_string())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MovieId, UserId};

    fn status_of(err: CatalogError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn catalog_errors_map_to_status_codes() {
        assert_eq!(
            status_of(CatalogError::not_found("Movie", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CatalogError::DuplicateRating {
                user_id: UserId::new(1),
                movie_id: MovieId::new(1),
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CatalogError::MovieInUse(MovieId::new(1))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CatalogError::RatingOutOfRange(5.01)),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            status_of(CatalogError::validation("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CatalogError::forbidden("delete", "rating", 1)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(CatalogError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CatalogError::Database("locked".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_responses_carry_their_code() {
        let response = ApiError::from(CatalogError::DuplicateRating {
            user_id: UserId::new(1),
            movie_id: MovieId::new(1),
        })
        .into_response();
        assert_eq!(
            response.extensions().get::<ErrorCode>(),
            Some(&ErrorCode("conflict"))
        );

        let response = ApiError::from(CatalogError::RatingOutOfRange(-1.0)).into_response();
        assert_eq!(
            response.extensions().get::<ErrorCode>(),
            Some(&ErrorCode("rating_out_of_range"))
        );
    }
}
