use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AccountService, CommentService, MovieService, RatingService, SeaOrmAccountService,
    SeaOrmCommentService, SeaOrmMovieService, SeaOrmRatingService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub account_service: Arc<dyn AccountService>,

    pub movie_service: Arc<dyn MovieService>,

    pub rating_service: Arc<dyn RatingService>,

    pub comment_service: Arc<dyn CommentService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already migrated store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let account_service = Arc::new(SeaOrmAccountService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AccountService + Send + Sync + 'static>;

        let movie_service = Arc::new(SeaOrmMovieService::new(store.clone()))
            as Arc<dyn MovieService + Send + Sync + 'static>;

        let rating_service = Arc::new(SeaOrmRatingService::new(store.clone()))
            as Arc<dyn RatingService + Send + Sync + 'static>;

        let comment_service = Arc::new(SeaOrmCommentService::new(
            store.clone(),
            config.catalog.max_text_length,
        )) as Arc<dyn CommentService + Send + Sync + 'static>;

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            account_service,
            movie_service,
            rating_service,
            comment_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
