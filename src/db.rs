//! Favorites store.
//!
//! One row per user: `user_id -> JSON array of movie ids`. The array keeps
//! insertion order and never holds duplicates; every mutation rewrites the
//! whole array in a single statement (last-writer-wins per user key).
//! Same-user events are serialized by the dispatcher, so the
//! read-modify-write here never races with itself.

use std::str::FromStr;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;

use crate::error::BotError;

/// Open (and create if missing) the favorites database.
pub async fn connect(database_url: &str) -> Result<SqlitePool, BotError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| BotError::StoreUnavailable(e.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;
    Ok(pool)
}

/// Initialize the database schema
pub async fn init_database_schema(pool: &SqlitePool) -> Result<(), BotError> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS favorites (
            user_id INTEGER PRIMARY KEY,
            movie_ids TEXT NOT NULL DEFAULT '[]'
        )",
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Create an empty favorites list for the user if none exists yet.
/// Calling it again for a known user is a no-op.
pub async fn register_user(pool: &SqlitePool, user_id: i64) -> Result<(), BotError> {
    sqlx::query("INSERT OR IGNORE INTO favorites (user_id, movie_ids) VALUES (?1, '[]')")
        .bind(user_id)
        .execute(pool)
        .await?;

    info!("Registered user {user_id}");
    Ok(())
}

/// The user's favorite movie ids in insertion order. Unknown users get an
/// empty list, not an error.
pub async fn get_favorites(pool: &SqlitePool, user_id: i64) -> Result<Vec<i64>, BotError> {
    let row = sqlx::query("SELECT movie_ids FROM favorites WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let raw: String = row.try_get("movie_ids")?;
            serde_json::from_str(&raw).map_err(|e| BotError::StoreUnavailable(e.to_string()))
        }
        None => Ok(Vec::new()),
    }
}

/// Append a movie to the user's favorites. No-op if already present.
pub async fn add_favorite(pool: &SqlitePool, user_id: i64, movie_id: i64) -> Result<(), BotError> {
    let mut favorites = get_favorites(pool, user_id).await?;

    if !favorites.contains(&movie_id) {
        favorites.push(movie_id);
    }

    set_favorites(pool, user_id, &favorites).await
}

/// Remove a movie from the user's favorites. No-op if absent.
pub async fn remove_favorite(
    pool: &SqlitePool,
    user_id: i64,
    movie_id: i64,
) -> Result<(), BotError> {
    let mut favorites = get_favorites(pool, user_id).await?;
    favorites.retain(|id| *id != movie_id);

    set_favorites(pool, user_id, &favorites).await
}

/// Reset the user's favorites to an empty list.
pub async fn clear_favorites(pool: &SqlitePool, user_id: i64) -> Result<(), BotError> {
    set_favorites(pool, user_id, &[]).await
}

/// Every stored list, ordered by user id. Admin diagnostics only.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<(i64, Vec<i64>)>, BotError> {
    let rows = sqlx::query("SELECT user_id, movie_ids FROM favorites ORDER BY user_id")
        .fetch_all(pool)
        .await?;

    let mut result = Vec::with_capacity(rows.len());
    for row in rows {
        let user_id: i64 = row.try_get("user_id")?;
        let raw: String = row.try_get("movie_ids")?;
        let movie_ids = serde_json::from_str(&raw)
            .map_err(|e| BotError::StoreUnavailable(e.to_string()))?;
        result.push((user_id, movie_ids));
    }

    Ok(result)
}

/// Writes the complete list in one statement.
async fn set_favorites(pool: &SqlitePool, user_id: i64, movie_ids: &[i64]) -> Result<(), BotError> {
    let payload = serde_json::to_string(movie_ids)
        .map_err(|e| BotError::StoreUnavailable(e.to_string()))?;

    sqlx::query(
        "INSERT INTO favorites (user_id, movie_ids) VALUES (?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET movie_ids = excluded.movie_ids",
    )
    .bind(user_id)
    .bind(payload)
    .execute(pool)
    .await?;

    Ok(())
}
