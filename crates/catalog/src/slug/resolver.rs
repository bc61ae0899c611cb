use async_trait::async_trait;
use sqlx::SqlitePool;

use super::MAX_SLUG_LEN;
use super::normalize::truncate;
use crate::config::SlugSettings;
use crate::db::Store;
use crate::product::db::slug_taken;

/// Point lookups the resolver needs from the catalog store.
#[async_trait]
pub trait SlugIndex: Send + Sync {
    /// Whether an entry other than `exclude_id` already holds `slug`.
    async fn slug_taken(&self, slug: &str, exclude_id: Option<&str>) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl SlugIndex for SqlitePool {
    async fn slug_taken(&self, slug: &str, exclude_id: Option<&str>) -> Result<bool, sqlx::Error> {
        slug_taken(self, slug, exclude_id).await
    }
}

#[async_trait]
impl SlugIndex for Store {
    async fn slug_taken(&self, slug: &str, exclude_id: Option<&str>) -> Result<bool, sqlx::Error> {
        slug_taken(self.pool(), slug, exclude_id).await
    }
}

/// Outcome of resolving a base token against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The token was confirmed absent from the store.
    Unique(String),
    /// Every numbered suffix collided; the token carries a millisecond
    /// timestamp and was not checked again.
    ExhaustedFallback(String),
}

impl Resolution {
    pub fn as_str(&self) -> &str {
        match self {
            Resolution::Unique(slug) | Resolution::ExhaustedFallback(slug) => slug,
        }
    }

    pub fn into_slug(self) -> String {
        match self {
            Resolution::Unique(slug) | Resolution::ExhaustedFallback(slug) => slug,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::ExhaustedFallback(_))
    }
}

/// How many lookups to spend, the bare base included, before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 100 }
    }
}

impl From<&SlugSettings> for RetryPolicy {
    fn from(settings: &SlugSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
        }
    }
}

/// Finds a store-unique slug for a base token.
///
/// Probes `base`, then `base-1`, `base-2`, ... until the policy's lookup
/// budget is spent, then falls back to `base-<unix millis>`.
pub struct SlugResolver<'a, I: ?Sized> {
    index: &'a I,
    policy: RetryPolicy,
}

impl<'a, I: SlugIndex + ?Sized> SlugResolver<'a, I> {
    pub fn new(index: &'a I, policy: RetryPolicy) -> Self {
        Self { index, policy }
    }

    pub async fn resolve(
        &self,
        base: &str,
        exclude_id: Option<&str>,
    ) -> Result<Resolution, sqlx::Error> {
        if !self.index.slug_taken(base, exclude_id).await? {
            return Ok(Resolution::Unique(base.to_string()));
        }

        for attempt in 1..self.policy.max_attempts {
            let candidate = with_suffix(base, &attempt.to_string());
            if !self.index.slug_taken(&candidate, exclude_id).await? {
                tracing::debug!(base, slug = %candidate, attempt, "resolved slug collision");
                return Ok(Resolution::Unique(candidate));
            }
        }

        let millis = chrono::Utc::now().timestamp_millis();
        let candidate = with_suffix(base, &millis.to_string());
        tracing::warn!(
            base,
            slug = %candidate,
            attempts = self.policy.max_attempts,
            "numbered slug suffixes exhausted, using timestamp suffix"
        );
        Ok(Resolution::ExhaustedFallback(candidate))
    }
}

/// Append `-suffix`, shortening the base so the result stays within bounds.
fn with_suffix(base: &str, suffix: &str) -> String {
    let room = MAX_SLUG_LEN.saturating_sub(suffix.len() + 1);
    let head = truncate(base.to_string(), room);
    if head.is_empty() {
        suffix.to_string()
    } else {
        format!("{head}-{suffix}")
    }
}
