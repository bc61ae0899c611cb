use super::models::ProductRecord;
use sqlx::SqlitePool;

pub async fn list_products(pool: &SqlitePool) -> Result<Vec<ProductRecord>, sqlx::Error> {
    sqlx::query_as::<_, ProductRecord>(
        "SELECT id, name, slug FROM products ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_product_by_id(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<ProductRecord>, sqlx::Error> {
    sqlx::query_as::<_, ProductRecord>("SELECT id, name, slug FROM products WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_product_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<ProductRecord>, sqlx::Error> {
    sqlx::query_as::<_, ProductRecord>("SELECT id, name, slug FROM products WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn slug_taken(
    pool: &SqlitePool,
    slug: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = if let Some(exclude_id) = exclude_id {
        sqlx::query_scalar("SELECT 1 FROM products WHERE slug = ? AND id != ? LIMIT 1")
            .bind(slug)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await?
    } else {
        sqlx::query_scalar("SELECT 1 FROM products WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(pool)
            .await?
    };

    Ok(exists.is_some())
}

pub async fn insert_product(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    slug: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO products (id, name, slug) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await?;
    Ok(())
}

/// Set the slug of product `id`. Fails with `RowNotFound` when no such product exists.
pub async fn update_product_slug(
    pool: &SqlitePool,
    id: &str,
    slug: &str,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query("UPDATE products SET slug = ? WHERE id = ?")
        .bind(slug)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}
