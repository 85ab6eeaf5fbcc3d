//! Schema definitions and migration utilities.
//!
//! This module provides embedded SQL schema definitions and utilities
//! for managing database migrations.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for users (001_users.sql).
pub const USERS_MIGRATION: &str = include_str!("../../../migrations/001_users.sql");

/// Embedded migration SQL for posts, votes, comments, bookmarks (002_posts.sql).
pub const POSTS_MIGRATION: &str = include_str!("../../../migrations/002_posts.sql");

/// Embedded migration SQL for quizzes and attempts (003_quizzes.sql).
pub const QUIZZES_MIGRATION: &str = include_str!("../../../migrations/003_quizzes.sql");

/// Embedded migration SQL for notifications (004_notifications.sql).
pub const NOTIFICATIONS_MIGRATION: &str =
    include_str!("../../../migrations/004_notifications.sql");

/// Run all pending migrations against the database.
///
/// This function is idempotent - it can be run multiple times safely.
/// Migrations check for existing objects before creating them.
///
/// # Errors
///
/// Returns an error if any migration fails to execute.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    let steps = [
        ("001_users.sql", USERS_MIGRATION),
        ("002_posts.sql", POSTS_MIGRATION),
        ("003_quizzes.sql", QUIZZES_MIGRATION),
        ("004_notifications.sql", NOTIFICATIONS_MIGRATION),
    ];

    for (name, sql) in steps {
        tracing::debug!("Running migration {}...", name);
        sqlx::raw_sql(sql)
            .execute(pool)
            .await
            .map_err(|e| StoreError::MigrationError(format!("{} failed: {}", name, e)))?;
    }

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `posts` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'posts'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}
