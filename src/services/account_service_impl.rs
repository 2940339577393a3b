//! `SeaORM` implementation of the `AccountService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::UserId;
use crate::models::UserProfile;
use crate::services::CatalogError;
use crate::services::account_service::{AccountService, LoginResult, NewAccount};
use crate::services::catalog_error::is_unique_violation;
use async_trait::async_trait;
use tracing::{info, warn};

pub struct SeaOrmAccountService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn register(&self, account: NewAccount) -> Result<UserProfile, CatalogError> {
        if account.password.len() < self.security.min_password_length {
            return Err(CatalogError::validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        let users = self.store.users();

        if users.get_by_username(&account.username).await?.is_some() {
            return Err(CatalogError::validation("Username already registered"));
        }

        if users.get_by_email(&account.email).await?.is_some() {
            return Err(CatalogError::validation("Email already registered"));
        }

        let user = users
            .create(
                &account.username,
                &account.email,
                &account.full_name,
                &account.password,
                &self.security,
            )
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    CatalogError::validation("Username or email already registered")
                } else {
                    CatalogError::from(err)
                }
            })?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(UserProfile::from(user))
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, CatalogError> {
        let is_valid = self.store.users().verify_password(username, password).await?;

        if !is_valid {
            warn!(username, "Login failed");
            return Err(CatalogError::Unauthenticated);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(CatalogError::Unauthenticated)?;

        Ok(LoginResult {
            user_id: UserId::new(user.id),
            username: user.username,
            api_key: user.api_key,
        })
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<UserProfile>, CatalogError> {
        let user = self.store.verify_api_key(api_key).await?;
        Ok(user.map(UserProfile::from))
    }

    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, CatalogError> {
        self.store
            .users()
            .get_by_id(user_id.value())
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| CatalogError::not_found("User", user_id.value()))
    }
}
