use anyhow::Context;
use sqlx::SqlitePool;

use super::db::{insert_product, slug_taken};
use super::models::ProductRecord;
use crate::config::SlugSettings;
use crate::slug::{self, Resolution, RetryPolicy, SlugResolver};
use crate::validation::slug::validate_slug;

pub struct CreateProductInput {
    pub name: String,
    /// Explicit slug. Derived from the name when absent.
    pub slug: Option<String>,
}

pub async fn create_product_raw(
    pool: &SqlitePool,
    settings: &SlugSettings,
    input: CreateProductInput,
) -> anyhow::Result<ProductRecord> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(anyhow::anyhow!("product name cannot be empty"));
    }

    let slug = match input.slug {
        Some(slug) => {
            validate_slug(&slug).map_err(|e| anyhow::anyhow!("invalid slug: {}", e))?;
            if slug_taken(pool, &slug, None).await? {
                return Err(anyhow::anyhow!("slug '{}' is already in use", slug));
            }
            slug
        }
        None => derive_slug(pool, settings, &name).await?.into_slug(),
    };

    let id = cuid2::create_id();
    insert_product(pool, &id, &name, &slug)
        .await
        .with_context(|| format!("failed to insert product '{}'", name))?;

    tracing::info!(id = %id, slug = %slug, "product created");

    Ok(ProductRecord {
        id,
        name,
        slug: Some(slug),
    })
}

/// The slug a new product called `name` would receive right now. Nothing is written.
pub async fn preview_slug(
    pool: &SqlitePool,
    settings: &SlugSettings,
    name: &str,
) -> anyhow::Result<Resolution> {
    derive_slug(pool, settings, name).await
}

async fn derive_slug(
    pool: &SqlitePool,
    settings: &SlugSettings,
    name: &str,
) -> anyhow::Result<Resolution> {
    let (base, placeholder) = slug::base_token(name, &settings.placeholder);
    if placeholder {
        tracing::warn!(name, placeholder = %base, "name has no sluggable characters");
    }

    let resolver = SlugResolver::new(pool, RetryPolicy::from(settings));
    let resolution = resolver
        .resolve(&base, None)
        .await
        .with_context(|| format!("failed to resolve slug for '{}'", name))?;
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::db::fetch_product_by_slug;
    use crate::test_helpers::create_test_pool;

    fn input(name: &str, slug: Option<&str>) -> CreateProductInput {
        CreateProductInput {
            name: name.to_string(),
            slug: slug.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_derives_unique_slugs() {
        let pool = create_test_pool().await.unwrap();
        let settings = SlugSettings::default();

        let first = create_product_raw(&pool, &settings, input("Whey Protein", None))
            .await
            .unwrap();
        let second = create_product_raw(&pool, &settings, input("Whey  Protein!", None))
            .await
            .unwrap();

        assert_eq!(first.slug.as_deref(), Some("whey-protein"));
        assert_eq!(second.slug.as_deref(), Some("whey-protein-1"));
        assert_ne!(first.id, second.id);

        let stored = fetch_product_by_slug(&pool, "whey-protein-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, second);
    }

    #[tokio::test]
    async fn create_with_explicit_slug() {
        let pool = create_test_pool().await.unwrap();
        let settings = SlugSettings::default();

        let product = create_product_raw(&pool, &settings, input("Whey", Some("whey-isolate")))
            .await
            .unwrap();
        assert_eq!(product.slug.as_deref(), Some("whey-isolate"));

        let taken = create_product_raw(&pool, &settings, input("Other", Some("whey-isolate"))).await;
        assert!(taken.is_err());

        let invalid = create_product_raw(&pool, &settings, input("Other", Some("Whey Isolate"))).await;
        assert!(invalid.is_err());
    }

    #[tokio::test]
    async fn create_rejects_blank_names() {
        let pool = create_test_pool().await.unwrap();
        let result = create_product_raw(&pool, &SlugSettings::default(), input("   ", None)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unsluggable_names_get_placeholder() {
        let pool = create_test_pool().await.unwrap();
        let settings = SlugSettings::default();

        let first = create_product_raw(&pool, &settings, input("¡¡!!", None))
            .await
            .unwrap();
        let second = create_product_raw(&pool, &settings, input("Протеин", None))
            .await
            .unwrap();

        assert_eq!(first.slug.as_deref(), Some("product"));
        assert_eq!(second.slug.as_deref(), Some("product-1"));
    }

    #[tokio::test]
    async fn preview_does_not_write() {
        let pool = create_test_pool().await.unwrap();
        let settings = SlugSettings::default();

        create_product_raw(&pool, &settings, input("Creatina", None))
            .await
            .unwrap();

        let preview = preview_slug(&pool, &settings, "Creatina").await.unwrap();
        assert_eq!(preview, Resolution::Unique("creatina-1".to_string()));

        let again = preview_slug(&pool, &settings, "Creatina").await.unwrap();
        assert_eq!(again, preview);
    }
}
