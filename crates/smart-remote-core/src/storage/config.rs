//! Config file storage.
//!
//! A single `config.json` in the data directory. A missing file means
//! defaults.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{ConfigError, Result, StorageError};

const CONFIG_FILE: &str = "config.json";

/// Takes a `PathBuf` in the constructor so tests and the CLI can each point
/// it somewhere different.
pub struct ConfigStorage {
    dir: PathBuf,
}

impl ConfigStorage {
    pub fn new(dir: PathBuf) -> std::result::Result<Self, StorageError> {
        std::fs::create_dir_all(&dir).map_err(StorageError::Io)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load and validate the config, falling back to defaults when absent.
    pub async fn load(&self) -> Result<RemoteConfig> {
        let path = self.path();
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(RemoteConfig::default());
        }

        let content = fs::read_to_string(&path).await.map_err(StorageError::Io)?;
        let config: RemoteConfig =
            serde_json::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, config: &RemoteConfig) -> Result<()> {
        config.validate()?;

        let content = serde_json::to_string_pretty(config).map_err(StorageError::Serialization)?;
        fs::write(self.path(), content).await.map_err(StorageError::Io)?;
        Ok(())
    }

    /// Load, apply `edit`, save. Returns the saved config.
    pub async fn update<F>(&self, edit: F) -> Result<RemoteConfig>
    where
        F: FnOnce(&mut RemoteConfig),
    {
        let mut config = self.load().await?;
        edit(&mut config);
        self.save(&config).await?;
        Ok(config)
    }
}
