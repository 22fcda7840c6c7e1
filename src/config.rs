use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::BrowserError;
use crate::favorites::DEFAULT_FAVORITES_KEY;
use crate::query::DEFAULT_QUICK_MAX_MINUTES;

/// Settings for the recipe browser
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// File backing the favorites store
    #[serde(default = "default_favorites_path")]
    pub favorites_path: PathBuf,
    /// Key the favorites list is stored under
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
    /// Quiet interval before a search is committed, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Recipes strictly shorter than this count as quick
    #[serde(default = "default_quick_max_minutes")]
    pub quick_max_minutes: u32,
    /// JSON catalog to use instead of the built-in one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            favorites_path: default_favorites_path(),
            favorites_key: default_favorites_key(),
            debounce_ms: default_debounce_ms(),
            quick_max_minutes: default_quick_max_minutes(),
            catalog_path: None,
        }
    }
}

// Default value functions
fn default_favorites_path() -> PathBuf {
    PathBuf::from("recipe-favorites.json")
}

fn default_favorites_key() -> String {
    DEFAULT_FAVORITES_KEY.to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_quick_max_minutes() -> u32 {
    DEFAULT_QUICK_MAX_MINUTES
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BROWSER__ prefix
    /// 2. recipe-browser.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BROWSER__DEBOUNCE_MS
    pub fn load() -> Result<Self, BrowserError> {
        load_config("recipe-browser")
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Load configuration from the named file (extension optional) and
/// environment variables
pub fn load_config(file_name: &str) -> Result<BrowserConfig, BrowserError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file_name).required(false))
        .add_source(
            Environment::with_prefix("RECIPE_BROWSER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = BrowserConfig::default();
        assert_eq!(config.favorites_key, "recipeFavorites");
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.quick_max_minutes, 30);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("browser.toml");
        std::fs::write(
            &path,
            "debounce_ms = 150\nquick_max_minutes = 20\nfavorites_path = \"favs.json\"\n",
        )
        .unwrap();

        let config = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.quick_max_minutes, 20);
        assert_eq!(config.favorites_path, PathBuf::from("favs.json"));
        assert_eq!(config.favorites_key, "recipeFavorites");
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("browser.toml");
        std::fs::write(&path, "debounce_ms = \"soon\"\n").unwrap();

        let result = load_config(path.to_str().unwrap());
        assert!(matches!(result, Err(BrowserError::Config(_))));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("browser.toml");
        std::fs::write(&path, "debounce_ms = [\n").unwrap();

        let err = load_config(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");

        let config = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(config.favorites_key, BrowserConfig::default().favorites_key);
    }
}
