// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration: the backend
//! connection and gallery settings, stored in a `settings.toml` file.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to the `_with_override()` functions
//! 2. **Environment variable** `MOCKUP_GALLERY_CONFIG_DIR`
//! 3. **Platform default** - via the `dirs` crate
//!
//! # Examples
//!
//! ```no_run
//! use mockup_gallery::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.gallery.max_images = Some(20);
//! config::save(&config).expect("Failed to save config");
//! ```
//!
//! ```toml
//! [backend]
//! url = "https://demo.example.co"
//! api_key = "anon-key"
//! bucket = "project-mockups"
//! table = "project_mockups"
//! request_timeout_secs = 30
//!
//! [gallery]
//! max_images = 10
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::mockup::MaxImages;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MockupGallery";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "MOCKUP_GALLERY_CONFIG_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
}

/// Connection to the hosted backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            bucket: Some(DEFAULT_BUCKET.to_string()),
            table: Some(DEFAULT_TABLE.to_string()),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    pub fn bucket(&self) -> &str {
        non_blank(self.bucket.as_deref()).unwrap_or(DEFAULT_BUCKET)
    }

    pub fn table(&self) -> &str {
        non_blank(self.table.as_deref()).unwrap_or(DEFAULT_TABLE)
    }

    /// Request timeout, clamped to the supported range.
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default)]
    pub max_images: Option<usize>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            max_images: Some(MaxImages::default().value()),
        }
    }
}

impl GalleryConfig {
    /// Configured ceiling, clamped to `capacity_bounds`.
    pub fn max_images(&self) -> MaxImages {
        self.max_images.map(MaxImages::bounded).unwrap_or_default()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Returns the config directory.
///
/// Returns `None` if no platform config directory exists and no override
/// is set.
pub fn config_dir_with_override(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        return Some(dir);
    }
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn config_path_with_override(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(override_dir).map(|dir| dir.join(CONFIG_FILE))
}

pub fn load() -> Result<Config> {
    load_with_override(None)
}

/// Loads the config from `override_dir`, or the resolved directory.
///
/// A missing file yields the defaults.
pub fn load_with_override(override_dir: Option<PathBuf>) -> Result<Config> {
    match config_path_with_override(override_dir) {
        Some(path) if path.exists() => load_from_path(&path),
        _ => Ok(Config::default()),
    }
}

pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

pub fn save_with_override(config: &Config, override_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(override_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// # Errors
///
/// Returns [`Error::Io`](crate::error::Error::Io) if the file cannot be read
/// and [`Error::Config`](crate::error::Error::Config) if it is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mockup::capacity_bounds;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_backend() {
        let mut config = Config::default();
        config.backend.url = Some("https://demo.example.co".to_string());
        config.backend.api_key = Some("anon".to_string());
        config.gallery.max_images = Some(20);

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_rejects_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[backend]\nurl = \"https://demo.example.co\"\n")
            .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.backend.url.as_deref(), Some("https://demo.example.co"));
        assert_eq!(loaded.backend.bucket(), DEFAULT_BUCKET);
        assert_eq!(loaded.backend.table(), DEFAULT_TABLE);
        assert_eq!(loaded.gallery.max_images(), MaxImages::default());
    }

    #[test]
    fn load_with_override_returns_default_when_missing() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let loaded =
            load_with_override(Some(temp_dir.path().to_path_buf())).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn save_with_override_writes_settings_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let dir = temp_dir.path().join("cfg");
        save_with_override(&Config::default(), Some(dir.clone())).expect("save should succeed");
        assert!(dir.join(CONFIG_FILE).exists());
    }

    #[test]
    fn blank_names_fall_back_to_defaults() {
        let backend = BackendConfig {
            bucket: Some("  ".to_string()),
            table: None,
            ..BackendConfig::default()
        };
        assert_eq!(backend.bucket(), DEFAULT_BUCKET);
        assert_eq!(backend.table(), DEFAULT_TABLE);
    }

    #[test]
    fn request_timeout_is_clamped() {
        let mut backend = BackendConfig {
            request_timeout_secs: Some(0),
            ..BackendConfig::default()
        };
        assert_eq!(backend.request_timeout(), Duration::from_secs(MIN_REQUEST_TIMEOUT_SECS));

        backend.request_timeout_secs = Some(100_000);
        assert_eq!(backend.request_timeout(), Duration::from_secs(MAX_REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn max_images_is_clamped() {
        let gallery = GalleryConfig {
            max_images: Some(1_000),
        };
        assert_eq!(gallery.max_images().value(), capacity_bounds::MAX_IMAGES);
    }
}
