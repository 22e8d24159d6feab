//! Persistence of the last connected device.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::StorageError;
use crate::types::DeviceDescriptor;

const LAST_DEVICE_FILE: &str = "last_device.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDevice {
    pub device: DeviceDescriptor,
    pub saved_at: DateTime<Utc>,
}

/// Key-value persistence for the last connected device.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    async fn load(&self) -> Result<Option<StoredDevice>, StorageError>;
    async fn save(&self, device: &DeviceDescriptor) -> Result<(), StorageError>;
    async fn clear(&self) -> Result<(), StorageError>;
}

pub struct JsonDeviceStore {
    path: PathBuf,
}

impl JsonDeviceStore {
    pub fn new(dir: PathBuf) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&dir).map_err(StorageError::Io)?;
        Ok(Self {
            path: dir.join(LAST_DEVICE_FILE),
        })
    }
}

#[async_trait]
impl DeviceStore for JsonDeviceStore {
    async fn load(&self) -> Result<Option<StoredDevice>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        let stored = serde_json::from_str(&content)?;
        Ok(Some(stored))
    }

    async fn save(&self, device: &DeviceDescriptor) -> Result<(), StorageError> {
        let stored = StoredDevice {
            device: device.clone(),
            saved_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}
