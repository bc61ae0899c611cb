use anyhow::Result;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

/// Creates an in-memory SQLite pool with the catalog schema applied
pub async fn create_test_pool() -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory databases should use a single connection
        .connect_with(connect_options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Inserts a product row verbatim, bypassing slug derivation.
///
/// Lets tests seed legacy rows with missing or blank slugs.
pub async fn insert_product(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    slug: Option<&str>,
) -> Result<()> {
    sqlx::query("INSERT INTO products (id, name, slug) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await?;
    Ok(())
}
