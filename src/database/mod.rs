use rocket::serde::json::Json;
use rocket::*;
use sqlx::Row;

mod request_error;
pub mod requests;
mod score;

pub use request_error::*;
pub use score::*;

pub type DatabasePool = sqlx::SqlitePool;
pub type ScoreId = i64;

/// Brings a database (fresh or pre-existing) up to the current schema.
/// Idempotent: safe to run on every process start.
pub async fn init_database(pool: &DatabasePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS scores ( \
            id INTEGER PRIMARY KEY AUTOINCREMENT, \
            mode TEXT NOT NULL, \
            seed TEXT NOT NULL, \
            name TEXT NOT NULL, \
            score INTEGER NOT NULL, \
            time_ms INTEGER NOT NULL, \
            blinks INTEGER NOT NULL, \
            moves INTEGER NOT NULL, \
            created_at INTEGER NOT NULL \
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_scores_mode_seed ON scores (mode, seed)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_scores_score ON scores (score)")
        .execute(pool)
        .await?;

    // Additive migration: old database files predate the invalid_moves
    // column. SQLite has no ADD COLUMN IF NOT EXISTS, so check first.
    let has_invalid_moves: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pragma_table_info('scores') WHERE name = 'invalid_moves'",
    )
    .fetch_one(pool)
    .await?;

    if has_invalid_moves == 0 {
        sqlx::query("ALTER TABLE scores ADD COLUMN invalid_moves INTEGER NOT NULL DEFAULT 0")
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// Single-connection in-memory database for tests. One connection keeps the
/// `sqlite::memory:` database alive for the pool's whole lifetime.
#[cfg(test)]
pub async fn memory_pool() -> DatabasePool {
    use std::str::FromStr;

    let options = sqlx::sqlite::SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid in-memory connection string");
    sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("failed to open an in-memory database")
}
