//! Domain service for user accounts.
//!
//! Handles registration, login and API key lookup. Credentials never leave
//! this layer except the API key returned on login.

use serde::Serialize;

use crate::domain::UserId;
use crate::models::UserProfile;
use crate::services::CatalogError;

/// Input for [`AccountService::register`].
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Login result containing the user and their API key.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user_id: UserId,
    pub username: String,
    pub api_key: String,
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Creates a user with a fresh API key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the password is too short or the
    /// username or email is already registered.
    async fn register(&self, account: NewAccount) -> Result<UserProfile, CatalogError>;

    /// Verifies credentials.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthenticated`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, CatalogError>;

    /// Resolves an API key to its owner, if any.
    async fn verify_api_key(&self, api_key: &str) -> Result<Option<UserProfile>, CatalogError>;

    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, CatalogError>;
}
