//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::json;
use smart_remote_core::{DeviceDescriptor, RemoteConfig};

use super::{KeyRow, OutputFormatter, StatusReport};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[DeviceDescriptor]) -> String {
        Self::to_json(&json!({
            "devices": devices,
            "count": devices.len()
        }))
    }

    fn format_action(&self, action: &str, target: &str, success: bool) -> String {
        Self::to_json(&json!({
            "action": action,
            "target": target,
            "success": success
        }))
    }

    fn format_keys(&self, rows: &[KeyRow]) -> String {
        Self::to_json(&json!({ "keys": rows }))
    }

    fn format_status(&self, status: &StatusReport) -> String {
        Self::to_json(status)
    }

    fn format_config(&self, config: &RemoteConfig, path: &str) -> String {
        Self::to_json(&json!({
            "path": path,
            "config": config
        }))
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smart_remote_core::DeviceKind;

    #[test]
    fn test_devices_json_shape() {
        let devices = vec![DeviceDescriptor::new(
            "192.168.1.20".parse().unwrap(),
            "Living Room",
            DeviceKind::NetworkTv,
        )];
        let out: serde_json::Value =
            serde_json::from_str(&JsonOutput::new().format_devices(&devices)).unwrap();

        assert_eq!(out["count"], 1);
        assert_eq!(out["devices"][0]["ip"], "192.168.1.20");
        assert_eq!(out["devices"][0]["kind"], "network_tv");
    }

    #[test]
    fn test_action_json() {
        let out: serde_json::Value =
            serde_json::from_str(&JsonOutput::new().format_action("key vol_up", "192.168.1.20", false))
                .unwrap();
        assert_eq!(out["success"], false);
        assert_eq!(out["action"], "key vol_up");
    }
}
