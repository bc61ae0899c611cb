//! One-shot backfill of missing product slugs
//!
//! Every product without a slug gets one derived from its name. Products that
//! already carry a non-blank slug are left alone, so running the backfill
//! again is harmless. Each update is committed on its own; a failure part way
//! through leaves the earlier updates in place.

use anyhow::{Context, Result};
use metrics::counter;

use crate::config::SlugSettings;
use crate::db::Store;
use crate::product::db::{list_products, update_product_slug};
use crate::slug::{self, RetryPolicy, SlugResolver};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub updated: usize,
    pub skipped: usize,
    /// Updated entries whose slug came from the timestamp fallback
    pub fallbacks: usize,
    /// Updated entries whose name had nothing to slugify
    pub placeholders: usize,
}

impl MigrationReport {
    pub fn total(&self) -> usize {
        self.updated + self.skipped
    }
}

pub async fn run(store: &Store, settings: &SlugSettings) -> Result<MigrationReport> {
    let pool = store.pool();
    let products = list_products(pool)
        .await
        .context("failed to load products")?;

    tracing::info!(count = products.len(), "backfilling product slugs");

    let resolver = SlugResolver::new(store, RetryPolicy::from(settings));
    let mut report = MigrationReport::default();

    for product in products {
        if let Some(existing) = product.assigned_slug() {
            tracing::info!(id = %product.id, slug = existing, "skipped, slug already set");
            counter!("catalog.slug_migration.skipped").increment(1);
            report.skipped += 1;
            continue;
        }

        let (base, placeholder) = slug::base_token(&product.name, &settings.placeholder);
        if placeholder {
            tracing::warn!(
                id = %product.id,
                name = %product.name,
                "name has no sluggable characters, using placeholder"
            );
            report.placeholders += 1;
        }

        let resolution = resolver
            .resolve(&base, Some(&product.id))
            .await
            .with_context(|| format!("failed to resolve slug for product {}", product.id))?;

        if resolution.is_fallback() {
            counter!("catalog.slug_migration.fallback").increment(1);
            report.fallbacks += 1;
        }

        update_product_slug(pool, &product.id, resolution.as_str())
            .await
            .with_context(|| format!("failed to store slug for product {}", product.id))?;

        tracing::info!(
            id = %product.id,
            name = %product.name,
            slug = resolution.as_str(),
            "slug assigned"
        );
        counter!("catalog.slug_migration.updated").increment(1);
        report.updated += 1;
    }

    tracing::info!(
        updated = report.updated,
        skipped = report.skipped,
        fallbacks = report.fallbacks,
        placeholders = report.placeholders,
        "slug backfill complete"
    );

    Ok(report)
}
