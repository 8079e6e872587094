//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/shuls/config.toml`. A
//! missing file yields the defaults, and `SHULS_BASE_URL` overrides the
//! server address.

use crate::paths::ShulsPaths;
use shuls_core::{ClientConfig, Result, ShulsError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "SHULS_BASE_URL";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` resolves the platform default on load
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the platform default config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading `path` instead of the default location.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// The file this service reads and writes.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => ShulsPaths::config_file(),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|_| ShulsError::internal("config cache lock poisoned"))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let mut loaded = Self::load_from(&self.config_path()?)?;
        apply_base_url_override(&mut loaded, std::env::var(BASE_URL_ENV).ok());

        let mut cache = self
            .config
            .write()
            .map_err(|_| ShulsError::internal("config cache lock poisoned"))?;
        *cache = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cache) = self.config.write() {
            *cache = None;
        }
    }

    /// Reads a config file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<ClientConfig> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(ClientConfig::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes `config` to the service's file, creating parent directories.
    pub fn save(&self, config: &ClientConfig) -> Result<PathBuf> {
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(config)?)?;
        self.invalidate_cache();
        tracing::info!("Wrote config to {}", path.display());
        Ok(path)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces `base_url` with a non-empty override value.
pub fn apply_base_url_override(config: &mut ClientConfig, value: Option<String>) {
    if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        tracing::debug!("Using {} from {}", url, BASE_URL_ENV);
        config.base_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuls_core::config::DEFAULT_BASE_URL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigService::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_loads_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"https://shuls.example\"\n\n[selection]\nmin_query_length = 4\n",
        )
        .unwrap();

        let config = ConfigService::load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://shuls.example");
        assert_eq!(config.selection.min_query_length, 4);
        assert_eq!(config.selection.debounce_ms, 1000);
    }

    #[test]
    fn test_invalid_toml_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [").unwrap();

        let err = ConfigService::load_from(&path).unwrap_err();
        assert!(matches!(err, ShulsError::Serialization { .. }));
    }

    #[test]
    fn test_save_then_reload_through_cache() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("nested").join("config.toml"));

        let mut config = ClientConfig::default();
        config.selection.selected_zoom = 15;
        service.save(&config).unwrap();

        let loaded = service.get_config().unwrap();
        assert_eq!(loaded.selection.selected_zoom, 15);
    }

    #[test]
    fn test_base_url_override() {
        let mut config = ClientConfig::default();
        apply_base_url_override(&mut config, Some("  ".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        apply_base_url_override(&mut config, Some("https://staging.shuls".to_string()));
        assert_eq!(config.base_url, "https://staging.shuls");
    }
}
