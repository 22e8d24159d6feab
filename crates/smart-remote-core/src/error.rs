//! Error types for SmartRemote core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Wake error: {0}")]
    Wake(#[from] WakeError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Controller and channel errors
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Key '{key}' is not mapped for the {channel} channel")]
    UnmappedKey { key: String, channel: String },

    #[error("Request to {ip} failed: {message}")]
    RequestFailed { ip: String, message: String },

    #[error("{ip} answered with HTTP {status}")]
    BadStatus { ip: String, status: u16 },

    #[error("Device {ip} is offline")]
    Offline { ip: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Discovery errors. None of these escape a scanner; they are logged and the
/// scan returns what it collected.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to open discovery socket: {0}")]
    Socket(#[source] std::io::Error),

    #[error("Failed to send search request: {0}")]
    Send(#[source] std::io::Error),

    #[error("Could not determine local address: {0}")]
    LocalAddress(String),

    #[error("Invalid subnet prefix: {0}")]
    InvalidPrefix(String),
}

/// Wake-on-LAN errors
#[derive(Debug, Error)]
pub enum WakeError {
    #[error("Invalid MAC address '{0}': expected 12 hex digits")]
    InvalidMac(String),

    #[error("Broadcast failed: {0}")]
    Broadcast(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Terminal outcome of a command routed through the fallback orchestrator.
///
/// Only produced once the primary channel and the single permitted infrared
/// retry are exhausted, so every variant is worth showing to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ControlError {
    #[error("Connection lost and IR bridge at {bridge} not found")]
    BridgeUnavailable { bridge: String },

    #[error("IR bridge did not accept '{command}'")]
    InfraredFailed { command: String },

    #[error("Switched to IR bridge but '{command}' still failed")]
    RetryFailed { command: String },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_key_display() {
        let err = DeviceError::UnmappedKey {
            key: "netflix".to_string(),
            channel: "infrared".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Key 'netflix' is not mapped for the infrared channel"
        );
    }

    #[test]
    fn test_control_error_serialization() {
        let err = ControlError::BridgeUnavailable {
            bridge: "192.168.1.100".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("BridgeUnavailable"));
    }

    #[test]
    fn test_core_error_from_wake_error() {
        let err: CoreError = WakeError::InvalidMac("zz".to_string()).into();
        assert!(format!("{}", err).contains("Invalid MAC address"));
    }

    #[test]
    fn test_core_error_from_storage_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CoreError::Storage(StorageError::Io(io));
        assert!(matches!(err, CoreError::Storage(StorageError::Io(_))));
    }
}
