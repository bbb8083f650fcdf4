use anyhow::Result;
use kinobot::db;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup_test_db(dir: &TempDir) -> Result<SqlitePool> {
    let url = format!("sqlite://{}", dir.path().join("favorites.db").display());
    let pool = db::connect(&url).await?;
    db::init_database_schema(&pool).await?;
    Ok(pool)
}

#[tokio::test]
async fn test_unknown_user_has_empty_favorites() -> Result<()> {
    let dir = TempDir::new()?;
    let pool = setup_test_db(&dir).await?;

    assert_eq!(db::get_favorites(&pool, 404).await?, Vec::<i64>::new());
    Ok(())
}

#[tokio::test]
async fn test_register_user_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let pool = setup_test_db(&dir).await?;

    db::register_user(&pool, 5).await?;
    assert_eq!(db::get_favorites(&pool, 5).await?, Vec::<i64>::new());

    db::add_favorite(&pool, 5, 603).await?;

    // A second /start must not wipe the list
    db::register_user(&pool, 5).await?;
    assert_eq!(db::get_favorites(&pool, 5).await?, vec![603]);
    Ok(())
}

#[tokio::test]
async fn test_add_keeps_insertion_order_without_duplicates() -> Result<()> {
    let dir = TempDir::new()?;
    let pool = setup_test_db(&dir).await?;
    db::register_user(&pool, 1).await?;

    db::add_favorite(&pool, 1, 10).await?;
    db::add_favorite(&pool, 1, 20).await?;
    db::add_favorite(&pool, 1, 30).await?;
    db::add_favorite(&pool, 1, 20).await?;

    assert_eq!(db::get_favorites(&pool, 1).await?, vec![10, 20, 30]);
    Ok(())
}

#[tokio::test]
async fn test_remove_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let pool = setup_test_db(&dir).await?;
    db::register_user(&pool, 1).await?;

    db::add_favorite(&pool, 1, 10).await?;
    db::add_favorite(&pool, 1, 20).await?;

    db::remove_favorite(&pool, 1, 10).await?;
    assert_eq!(db::get_favorites(&pool, 1).await?, vec![20]);

    // Removing an absent id changes nothing and is not an error
    db::remove_favorite(&pool, 1, 10).await?;
    db::remove_favorite(&pool, 1, 999).await?;
    assert_eq!(db::get_favorites(&pool, 1).await?, vec![20]);
    Ok(())
}

#[tokio::test]
async fn test_add_then_remove_restores_previous_state() -> Result<()> {
    let dir = TempDir::new()?;
    let pool = setup_test_db(&dir).await?;
    db::register_user(&pool, 1).await?;
    db::add_favorite(&pool, 1, 10).await?;

    let before = db::get_favorites(&pool, 1).await?;
    db::add_favorite(&pool, 1, 55).await?;
    db::remove_favorite(&pool, 1, 55).await?;

    assert_eq!(db::get_favorites(&pool, 1).await?, before);
    Ok(())
}

#[tokio::test]
async fn test_clear_always_yields_empty() -> Result<()> {
    let dir = TempDir::new()?;
    let pool = setup_test_db(&dir).await?;

    db::register_user(&pool, 1).await?;
    db::add_favorite(&pool, 1, 10).await?;
    db::add_favorite(&pool, 1, 20).await?;

    db::clear_favorites(&pool, 1).await?;
    assert_eq!(db::get_favorites(&pool, 1).await?, Vec::<i64>::new());

    // Clearing an already empty (or never registered) list also works
    db::clear_favorites(&pool, 1).await?;
    db::clear_favorites(&pool, 2).await?;
    assert_eq!(db::get_favorites(&pool, 2).await?, Vec::<i64>::new());
    Ok(())
}

#[tokio::test]
async fn test_mutations_work_for_unregistered_users() -> Result<()> {
    let dir = TempDir::new()?;
    let pool = setup_test_db(&dir).await?;

    // A user who never sent /start can still favorite a movie
    db::add_favorite(&pool, 77, 603).await?;
    assert_eq!(db::get_favorites(&pool, 77).await?, vec![603]);
    Ok(())
}

#[tokio::test]
async fn test_favorites_survive_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    let url = format!("sqlite://{}", dir.path().join("favorites.db").display());

    {
        let pool = db::connect(&url).await?;
        db::init_database_schema(&pool).await?;
        db::add_favorite(&pool, 5, 603).await?;
        db::add_favorite(&pool, 5, 604).await?;
        pool.close().await;
    }

    let pool = db::connect(&url).await?;
    db::init_database_schema(&pool).await?;
    assert_eq!(db::get_favorites(&pool, 5).await?, vec![603, 604]);
    Ok(())
}

#[tokio::test]
async fn test_get_all_lists_every_user() -> Result<()> {
    let dir = TempDir::new()?;
    let pool = setup_test_db(&dir).await?;

    db::register_user(&pool, 2).await?;
    db::add_favorite(&pool, 1, 10).await?;
    db::add_favorite(&pool, 1, 20).await?;

    let all = db::get_all(&pool).await?;
    assert_eq!(all, vec![(1, vec![10, 20]), (2, vec![])]);
    Ok(())
}
