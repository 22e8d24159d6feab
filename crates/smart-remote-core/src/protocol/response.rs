//! Response parsing utilities for device protocol.
//!
//! Device documents are small XML blobs. They are scanned as text: a missing
//! or unterminated tag yields `None`, never an error.

use super::commands::HEARTBEAT_TOKEN;

/// Extract the content of the first `<tag>...</tag>` pair, trimmed.
pub fn extract_tag(body: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let start = body.find(&open)? + open.len();
    let len = body[start..].find(&close)?;

    Some(body[start..start + len].trim().to_string())
}

/// Like [`extract_tag`], but treats an empty element as absent.
fn non_empty_tag(body: &str, tag: &str) -> Option<String> {
    extract_tag(body, tag).filter(|value| !value.is_empty())
}

/// Fields recovered from an ECP `query/device-info` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub user_device_name: Option<String>,
    pub model_name: Option<String>,
    pub mac: Option<String>,
}

impl DeviceInfo {
    /// Name to show for the device, if the document carried one.
    pub fn display_name(&self) -> Option<&str> {
        self.user_device_name
            .as_deref()
            .or(self.model_name.as_deref())
    }
}

/// Parse a device-info document.
pub fn parse_device_info(body: &str) -> DeviceInfo {
    DeviceInfo {
        user_device_name: non_empty_tag(body, "user-device-name"),
        model_name: non_empty_tag(body, "model-name"),
        mac: non_empty_tag(body, "wifi-mac").or_else(|| non_empty_tag(body, "ethernet-mac")),
    }
}

/// Friendly name from a device description (ECP or UPnP flavour).
pub fn friendly_name(body: &str) -> Option<String> {
    non_empty_tag(body, "user-device-name")
        .or_else(|| non_empty_tag(body, "model-name"))
        .or_else(|| non_empty_tag(body, "friendlyName"))
}

/// Whether a heartbeat body identifies an IR bridge.
pub fn is_heartbeat(body: &str) -> bool {
    body.to_lowercase().contains(HEARTBEAT_TOKEN)
}
