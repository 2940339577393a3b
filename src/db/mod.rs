use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction,
    Statement, TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::comment::CommentRepository;
pub use repositories::movie::{MovieRepository, NewMovie};
pub use repositories::rating::RatingRepository;
pub use repositories::reply::ReplyRepository;
pub use repositories::user::{User, UserRepository};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to `:memory:` would open its own empty database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Opens a transaction that already holds the database write lock.
    /// Repositories built on it see and write the same snapshot until
    /// `commit`; dropping it rolls back.
    ///
    /// SQLite starts transactions deferred: two of them that both read before
    /// writing cannot upgrade their locks, and one fails with `SQLITE_BUSY`
    /// without waiting. Writing first makes the lock wait on the busy timeout
    /// instead, so overlapping writers queue up.
    pub async fn begin(&self) -> Result<DatabaseTransaction> {
        let txn = self.conn.begin().await?;
        let backend = txn.get_database_backend();
        txn.execute(Statement::from_string(
            backend,
            "UPDATE movies SET id = id WHERE id = -1".to_string(),
        ))
        .await?;
        Ok(txn)
    }

    #[must_use]
    pub const fn users(&self) -> UserRepository<'_, DatabaseConnection> {
        UserRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn movies(&self) -> MovieRepository<'_, DatabaseConnection> {
        MovieRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn ratings(&self) -> RatingRepository<'_, DatabaseConnection> {
        RatingRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn comments(&self) -> CommentRepository<'_, DatabaseConnection> {
        CommentRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn replies(&self) -> ReplyRepository<'_, DatabaseConnection> {
        ReplyRepository::new(&self.conn)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.users().get_by_username(username).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.users().verify_api_key(api_key).await
    }
}
