//! Shared data types.
//!
//! Everything here is serializable so the CLI can print it as JSON and the
//! device store can persist the last selected descriptor.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// A device found by one of the scanners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    /// Device address (primary identifier)
    pub ip: IpAddr,
    /// Human-friendly name, or a generic label when none could be fetched
    pub name: String,
    /// What kind of device answered
    pub kind: DeviceKind,
    /// Hardware address, when learned during a connection handshake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
}

impl DeviceDescriptor {
    pub fn new(ip: IpAddr, name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            ip,
            name: name.into(),
            kind,
            mac: None,
        }
    }

    /// Copy of this descriptor carrying the MAC learned while connecting.
    pub fn with_mac(&self, mac: Option<String>) -> Self {
        Self {
            mac: mac.or_else(|| self.mac.clone()),
            ..self.clone()
        }
    }
}

/// Device classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Television with a native network control API
    NetworkTv,
    /// HTTP-to-infrared relay
    InfraredBridge,
    /// Anything else that answered discovery (DIAL, Android, UPnP)
    GenericSmartDevice,
}

impl DeviceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DeviceKind::NetworkTv => "Network TV",
            DeviceKind::InfraredBridge => "IR Bridge",
            DeviceKind::GenericSmartDevice => "Smart Device",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The transport a controller talks over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Network,
    Infrared,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Network => "network",
            Channel::Infrared => "infrared",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerState {
    /// `host` or `host:port` the controller sends to
    pub target_address: String,
    pub display_name: String,
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

impl ControllerState {
    pub fn new(target_address: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            target_address: target_address.into(),
            display_name: display_name.into(),
            connected: false,
            mac_address: None,
        }
    }
}

/// Connectivity as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityStatus {
    Connected,
    Disconnected,
    Disabled,
}

/// Result of the platform network query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub network_name: String,
    pub local_address: Option<IpAddr>,
    pub status: ConnectivityStatus,
}

impl NetworkStatus {
    pub fn is_connected(&self) -> bool {
        self.status == ConnectivityStatus::Connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_serialization() {
        let desc = DeviceDescriptor::new(
            "192.168.1.20".parse().unwrap(),
            "Living Room",
            DeviceKind::NetworkTv,
        );
        let json = serde_json::to_string(&desc).unwrap();
        assert!(json.contains("\"kind\":\"network_tv\""));
        assert!(!json.contains("mac"));

        let back: DeviceDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }

    #[test]
    fn test_with_mac_keeps_existing_when_none_learned() {
        let mut desc = DeviceDescriptor::new(
            "10.0.0.5".parse().unwrap(),
            "TV",
            DeviceKind::NetworkTv,
        );
        desc.mac = Some("AA:BB:CC:DD:EE:FF".to_string());

        assert_eq!(desc.with_mac(None).mac.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(
            desc.with_mac(Some("11:22:33:44:55:66".to_string())).mac.as_deref(),
            Some("11:22:33:44:55:66")
        );
    }
}
