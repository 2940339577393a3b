use serde::{Deserialize, Serialize};

use crate::db::NewMovie;
use crate::services::NewAccount;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl From<RegisterRequest> for NewAccount {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            full_name: req.full_name,
            password: req.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: String,
    pub description: Option<String>,
    pub genres: Option<String>,
    pub writer: Option<String>,
    pub director: Option<String>,
    #[serde(default)]
    pub cast: String,
    pub language: Option<String>,
    pub runtime: Option<String>,
    pub year_released: i32,
}

impl From<MovieRequest> for NewMovie {
    fn from(req: MovieRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            genres: req.genres,
            writer: req.writer,
            director: req.director,
            cast: req.cast,
            language: req.language,
            runtime: req.runtime,
            year_released: req.year_released,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: f64,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub reply: String,
}
