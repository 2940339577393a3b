use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_ratings_user_movie_unique ON ratings(user_id, movie_id)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_ratings_movie ON ratings(movie_id)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_comments_movie ON comments(movie_id)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_replies_comment ON replies(comment_id)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_replies_comment")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_comments_movie")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_ratings_movie")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_ratings_user_movie_unique")
            .await?;

        Ok(())
    }
}
