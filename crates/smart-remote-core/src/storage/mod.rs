//! Storage for the config file and the last connected device.

pub mod config;
pub mod last_device;

pub use config::ConfigStorage;
pub use last_device::{DeviceStore, JsonDeviceStore, StoredDevice};

/// Platform-specific data directory for SmartRemote.
pub fn default_data_dir() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("", "smart-remote", "smart-remote")
        .map(|dirs| dirs.data_dir().to_path_buf())
}
