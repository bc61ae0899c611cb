#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
}

impl ProductRecord {
    /// The slug, if one has actually been assigned. Blank values count as missing.
    pub fn assigned_slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    }
}
