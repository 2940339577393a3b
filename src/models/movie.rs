use serde::Serialize;

use crate::domain::{MovieId, UserId};
use crate::entities::movies;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub description: Option<String>,
    pub genres: Option<String>,
    pub writer: Option<String>,
    pub director: Option<String>,
    pub cast: String,
    pub language: Option<String>,
    pub runtime: Option<String>,
    pub year_released: i32,
    pub created_at: String,
    pub owner_id: UserId,
    /// `None` until the movie receives its first rating.
    pub average_rating: Option<f64>,
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: MovieId::new(model.id),
            title: model.title,
            description: model.description,
            genres: model.genres,
            writer: model.writer,
            director: model.director,
            cast: model.cast,
            language: model.language,
            runtime: model.runtime,
            year_released: model.year_released,
            created_at: model.created_at,
            owner_id: UserId::new(model.owner_id),
            average_rating: model.average_rating,
        }
    }
}

/// Movie details embedded in a comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub year_released: i32,
}

impl From<&movies::Model> for MovieSummary {
    fn from(model: &movies::Model) -> Self {
        Self {
            id: MovieId::new(model.id),
            title: model.title.clone(),
            year_released: model.year_released,
        }
    }
}
