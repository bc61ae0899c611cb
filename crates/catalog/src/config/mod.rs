//! Configuration management for the catalog tooling
//!
//! Configuration is stored in RON format and covers where the catalog
//! database lives and how slugs are resolved when names collide.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::validation::slug::validate_slug;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub database: Database,

    #[serde(default)]
    pub slugs: SlugSettings,
}

impl Config {
    /// Validate every section of the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.slugs.validate()
    }
}

/// Database configuration section
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Database {
    /// Directory holding `catalog.db`. `NUTRI_DB_PATH` takes precedence.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Slug resolution settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SlugSettings {
    /// Lookups spent, the bare name included, before falling back to a timestamp suffix
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base token used when a name normalizes to nothing
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl SlugSettings {
    pub fn validate(&self) -> Result<(), String> {
        validate_slug(&self.placeholder)
            .map_err(|e| format!("Slug placeholder '{}' is invalid: {}", self.placeholder, e))
    }
}

impl Default for SlugSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_max_attempts() -> u32 {
    100
}

fn default_placeholder() -> String {
    "product".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database.path.is_none());
        assert_eq!(config.slugs.max_attempts, 100);
        assert_eq!(config.slugs.placeholder, "product");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_placeholder_must_be_a_slug() {
        let settings = SlugSettings {
            max_attempts: 10,
            placeholder: "Not A Slug".to_string(),
        };
        assert!(settings.validate().is_err());

        let settings = SlugSettings {
            max_attempts: 10,
            placeholder: "".to_string(),
        };
        assert!(settings.validate().is_err());
    }
}
