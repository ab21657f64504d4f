//! Database initialization.

use std::path::Path;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::StoreResult;

/// Initialize the database connection pool and create tables if needed.
///
/// Creates the database file (and its parent directory) on first run.
pub async fn init_database(db_path: &Path) -> StoreResult<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    configure_and_migrate(&pool).await?;
    Ok(pool)
}

/// In-memory database for tests.
///
/// A single connection keeps every query on the same in-memory instance.
pub async fn init_in_memory() -> StoreResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    configure_and_migrate(&pool).await?;
    Ok(pool)
}

async fn configure_and_migrate(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows concurrent readers while the worker writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    create_lectures_table(pool).await?;
    Ok(())
}

async fn create_lectures_table(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lectures (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            status          TEXT NOT NULL DEFAULT 'processing',
            transcript      TEXT,
            summary         TEXT,
            topics_json     TEXT,
            quiz_json       TEXT,
            key_points_json TEXT,
            examples_json   TEXT,
            lda_topics_json TEXT,
            notes_json      TEXT,
            error_message   TEXT,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_lectures_status ON lectures(status)")
        .execute(pool)
        .await?;

    Ok(())
}
