//! Failure taxonomy shared by the catalog services.
//!
//! Every failure is caused by caller data or caller identity, except the
//! storage variants, and none of them is retried inside the services.

use thiserror::Error;

use crate::domain::{MovieId, UserId};

/// Coarse classification of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Authorization,
    Storage,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: i32 },

    #[error("User {user_id} has already rated movie {movie_id}")]
    DuplicateRating { user_id: UserId, movie_id: MovieId },

    #[error("Movie {0} cannot be deleted while it has ratings or comments")]
    MovieInUse(MovieId),

    #[error("{0} is invalid, rating must be between 0 and 5")]
    RatingOutOfRange(f64),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    #[must_use]
    pub const fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn forbidden(action: &str, entity: &str, id: impl std::fmt::Display) -> Self {
        Self::Forbidden(format!("You are not authorized to {action} {entity} {id}"))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateRating { .. } | Self::MovieInUse(_) => ErrorKind::Conflict,
            Self::RatingOutOfRange(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::Forbidden(_) | Self::Unauthenticated => ErrorKind::Authorization,
            Self::Database(_) | Self::Internal(_) => ErrorKind::Storage,
        }
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sea_orm::DbErr>() {
            Ok(db_err) => Self::Database(db_err.to_string()),
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

/// True when `err` carries a unique-constraint violation from the database.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<sea_orm::DbErr>()
            .and_then(sea_orm::DbErr::sql_err)
            .is_some_and(|sql_err| matches!(sql_err, sea_orm::SqlErr::UniqueConstraintViolation(_)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_taxonomy() {
        assert_eq!(CatalogError::not_found("Movie", 1).kind(), ErrorKind::NotFound);
        assert_eq!(
            CatalogError::DuplicateRating {
                user_id: UserId::new(1),
                movie_id: MovieId::new(2)
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            CatalogError::MovieInUse(MovieId::new(2)).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            CatalogError::RatingOutOfRange(5.01).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CatalogError::forbidden("delete", "rating", 3).kind(),
            ErrorKind::Authorization
        );
    }

    #[test]
    fn messages() {
        assert_eq!(
            CatalogError::not_found("Rating", 9).to_string(),
            "Rating 9 does not exist"
        );
        assert_eq!(
            CatalogError::forbidden("delete", "comment", 4).to_string(),
            "You are not authorized to delete comment 4"
        );
    }

    #[test]
    fn db_errors_are_storage_failures() {
        let err: CatalogError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Storage);

        let err: CatalogError = anyhow::Error::from(sea_orm::DbErr::Custom("boom".to_string()))
            .context("while loading")
            .into();
        assert!(matches!(err, CatalogError::Database(_) | CatalogError::Internal(_)));
    }

    #[test]
    fn custom_db_error_is_not_a_unique_violation() {
        let err = anyhow::Error::from(sea_orm::DbErr::Custom("boom".to_string()));
        assert!(!is_unique_violation(&err));
    }
}
