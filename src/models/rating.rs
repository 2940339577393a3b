use serde::Serialize;

use crate::domain::{MovieId, RatingId, UserId};
use crate::entities::ratings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub id: RatingId,
    pub rating: f64,
    pub movie_id: MovieId,
    pub user_id: UserId,
    pub created_at: String,
}

impl From<ratings::Model> for Rating {
    fn from(model: ratings::Model) -> Self {
        Self {
            id: RatingId::new(model.id),
            rating: model.rating,
            movie_id: MovieId::new(model.movie_id),
            user_id: UserId::new(model.user_id),
            created_at: model.created_at,
        }
    }
}
