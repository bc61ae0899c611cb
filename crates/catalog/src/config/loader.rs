//! Configuration file loading and parsing
//!
//! Loads catalog configuration from RON files, searching the standard
//! locations when no explicit path is given.

use super::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Per-project config locations, checked in order
const CONFIG_FILENAMES: &[&str] = &["nutri.ron", ".nutri/config.ron"];

/// Load configuration from a specific file path
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_ron(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Find and load the catalog config for the `nutri` tooling.
///
/// `NUTRI_CONFIG_PATH` wins when it points at an existing file; otherwise the
/// first of `nutri.ron` and `.nutri/config.ron` under the working directory is
/// used. With none present the defaults apply, which still need
/// `NUTRI_DB_PATH` to locate the catalog database.
pub fn load_with_discovery() -> Result<Config> {
    if let Ok(env_path) = std::env::var("NUTRI_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            tracing::info!("Loading config from NUTRI_CONFIG_PATH: {}", path.display());
            return load_from_file(&path);
        } else {
            tracing::warn!(
                "NUTRI_CONFIG_PATH specified but file not found: {}",
                path.display()
            );
        }
    }

    for filename in CONFIG_FILENAMES {
        let path = PathBuf::from(filename);
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            return load_from_file(&path);
        }
    }

    tracing::info!("No config file found, using defaults");
    Ok(Config::default())
}

/// Parse and validate a RON configuration string
fn parse_ron(content: &str) -> Result<Config> {
    let config: Config = ron::from_str(content).context("Failed to parse RON configuration")?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_ron("Config()").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let ron = r#"
Config(
    database: Database(
        path: Some("/var/lib/nutri"),
    ),
    slugs: SlugSettings(
        max_attempts: 25,
        placeholder: "item",
    ),
)
        "#;

        let config = parse_ron(ron).unwrap();
        assert_eq!(
            config.database.path.as_deref(),
            Some(Path::new("/var/lib/nutri"))
        );
        assert_eq!(config.slugs.max_attempts, 25);
        assert_eq!(config.slugs.placeholder, "item");
    }

    #[test]
    fn test_partial_slug_section_uses_defaults() {
        let config = parse_ron("Config(slugs: SlugSettings(max_attempts: 3))").unwrap();
        assert_eq!(config.slugs.max_attempts, 3);
        assert_eq!(config.slugs.placeholder, "product");
    }

    #[test]
    fn test_invalid_placeholder_rejected() {
        let result = parse_ron(r#"Config(slugs: SlugSettings(placeholder: "-bad-"))"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nutri.ron");

        std::fs::write(
            &config_path,
            r#"Config(database: Database(path: Some("./data")))"#,
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.database.path.as_deref(), Some(Path::new("./data")));
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_from_file(temp_dir.path().join("missing.ron"));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_ron() {
        assert!(parse_ron("Config(database: [").is_err());
    }
}
