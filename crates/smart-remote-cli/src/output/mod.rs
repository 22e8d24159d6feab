//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use serde::Serialize;
use smart_remote_core::storage::StoredDevice;
use smart_remote_core::{DeviceDescriptor, NetworkStatus, RemoteConfig};

/// One row of the key listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRow {
    pub key: &'static str,
    pub network: Option<&'static str>,
    pub infrared: Option<&'static str>,
}

/// Everything `status` reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub network: NetworkStatus,
    pub last_device: Option<StoredDevice>,
    /// Whether the TV control port answered; `None` when there is no TV
    pub device_reachable: Option<bool>,
    pub bridge_address: String,
    pub bridge_online: bool,
}

/// Output formatter trait
pub trait OutputFormatter {
    /// Format device list
    fn format_devices(&self, devices: &[DeviceDescriptor]) -> String;

    /// Format the outcome of one action against a target
    fn format_action(&self, action: &str, target: &str, success: bool) -> String;

    /// Format the key registry
    fn format_keys(&self, rows: &[KeyRow]) -> String;

    /// Format status
    fn format_status(&self, status: &StatusReport) -> String;

    /// Format the configuration and where it lives
    fn format_config(&self, config: &RemoteConfig, path: &str) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
