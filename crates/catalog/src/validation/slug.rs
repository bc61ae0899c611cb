use crate::slug::MAX_SLUG_LEN;

pub fn validate_slug(slug: &str) -> anyhow::Result<()> {
    if slug.len() > MAX_SLUG_LEN {
        return Err(anyhow::anyhow!(
            "slug must be at most {MAX_SLUG_LEN} characters"
        ));
    }

    let is_valid = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if is_valid {
        Ok(())
    } else {
        Err(anyhow::anyhow!("slug must be lowercase kebab-case"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_kebab_case() {
        assert!(validate_slug("whey-protein").is_ok());
        assert!(validate_slug("omega3").is_ok());
        assert!(validate_slug("a").is_ok());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LEN)).is_ok());
    }

    #[test]
    fn rejects_malformed() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Whey").is_err());
        assert!(validate_slug("-whey").is_err());
        assert!(validate_slug("whey-").is_err());
        assert!(validate_slug("whey--protein").is_err());
        assert!(validate_slug("whey protein").is_err());
        assert!(validate_slug("proteína").is_err());
    }

    #[test]
    fn rejects_overlong() {
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LEN + 1)).is_err());
    }
}
