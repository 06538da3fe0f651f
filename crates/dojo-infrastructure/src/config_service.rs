//! Configuration service implementation.
//!
//! Loads the client configuration from `config.toml`, creating it with
//! defaults on first use.

use crate::client_config::ClientConfig;
use crate::paths::DojoPaths;
use dojo_core::{DojoError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config location.
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(DojoPaths::config_file()?))
    }

    /// Creates a service for an explicit config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// Environment overrides are applied on top of the file contents and
    /// are never written back.
    pub fn get_config(&self) -> Result<ClientConfig> {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let loaded = self
            .load_or_create()?
            .with_overrides(|key| std::env::var(key).ok());
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` to disk and replaces the cached copy.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, content)?;
        tracing::info!(path = %self.path.display(), "Saved client configuration");
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        Ok(())
    }

    /// Applies `change` to the file contents and writes them back.
    ///
    /// Environment overrides are not persisted; they are reapplied on the
    /// next `get_config`.
    pub fn update<F>(&self, change: F) -> Result<ClientConfig>
    where
        F: FnOnce(&mut ClientConfig),
    {
        let mut config = self.load_or_create()?;
        change(&mut config);
        self.save(&config)?;
        self.invalidate_cache();
        Ok(config)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn load_or_create(&self) -> Result<ClientConfig> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                DojoError::config(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No config found, writing defaults");
                let default_config = ClientConfig::default();
                self.save(&default_config)?;
                Ok(default_config)
            }
            Err(e) => Err(e.into()),
        }
    }
}
