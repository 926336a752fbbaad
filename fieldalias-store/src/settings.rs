//! Settings store backends
//!
//! The settings store persists the single [`AliasConfig`] document. Loading
//! when nothing has been persisted yet yields the default configuration.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::fsutil::atomic_write;
use crate::types::AliasConfig;

/// Storage abstraction for the alias configuration
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the current configuration, or defaults if none is persisted.
    async fn load(&self) -> Result<AliasConfig>;

    /// Persist the configuration.
    async fn save(&self, config: &AliasConfig) -> Result<()>;
}

/// YAML-based settings store: one `settings.yaml` document.
pub struct YamlSettingsStore {
    path: PathBuf,
}

impl YamlSettingsStore {
    /// Create new storage persisting to the given file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SettingsStore for YamlSettingsStore {
    async fn load(&self) -> Result<AliasConfig> {
        if !self.path.exists() {
            return Ok(AliasConfig::default());
        }
        let content = fs::read_to_string(&self.path).await?;
        Ok(serde_yaml::from_str(&content)?)
    }

    async fn save(&self, config: &AliasConfig) -> Result<()> {
        let yaml = serde_yaml::to_string(config)?;
        atomic_write(&self.path, yaml.as_bytes()).await
    }
}

/// In-memory settings store for tests and embedding hosts.
#[derive(Default)]
pub struct MemorySettingsStore {
    config: Mutex<AliasConfig>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known configuration instead of defaults.
    pub fn with_config(config: AliasConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<AliasConfig> {
        Ok(self.config.lock().await.clone())
    }

    async fn save(&self, config: &AliasConfig) -> Result<()> {
        *self.config.lock().await = config.clone();
        Ok(())
    }
}
