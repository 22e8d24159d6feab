//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use smart_remote_core::{DeviceDescriptor, DeviceKind, RemoteConfig};

use super::{KeyRow, OutputFormatter, StatusReport};

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn kind_cell(kind: DeviceKind) -> Cell {
        let cell = Cell::new(kind.display_name());
        match kind {
            DeviceKind::NetworkTv => cell.fg(Color::Green),
            DeviceKind::InfraredBridge => cell.fg(Color::Cyan),
            DeviceKind::GenericSmartDevice => cell.fg(Color::Yellow),
        }
    }

    fn yes_no(value: bool) -> ColoredString {
        if value {
            "Yes".green()
        } else {
            "No".red()
        }
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[DeviceDescriptor]) -> String {
        if devices.is_empty() {
            return "No devices found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["IP", "Name", "Kind", "MAC"]);

        for device in devices {
            table.add_row(vec![
                Cell::new(device.ip),
                Cell::new(&device.name),
                Self::kind_cell(device.kind),
                Cell::new(device.mac.as_deref().unwrap_or("-")),
            ]);
        }

        format!("{}\n\nFound {} device(s)", table, devices.len())
    }

    fn format_action(&self, action: &str, target: &str, success: bool) -> String {
        let status = if success {
            "[OK]".green()
        } else {
            "[FAIL]".red()
        };
        format!("{} {} -> {}", status, action, target)
    }

    fn format_keys(&self, rows: &[KeyRow]) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Key", "Network (ECP)", "Infrared"]);

        for row in rows {
            let code = |value: Option<&str>| match value {
                Some(v) => Cell::new(v),
                None => Cell::new("-").fg(Color::DarkGrey),
            };
            table.add_row(vec![Cell::new(row.key), code(row.network), code(row.infrared)]);
        }

        table.to_string()
    }

    fn format_status(&self, status: &StatusReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Network: {}", status.network.network_name.bold()));
        lines.push(format!("  Connected:  {}", Self::yes_no(status.network.is_connected())));
        if let Some(addr) = status.network.local_address {
            lines.push(format!("  Address:    {}", addr));
        }

        match &status.last_device {
            Some(stored) => {
                let device = &stored.device;
                lines.push(format!("Device: {} ({})", device.name.bold(), device.ip));
                lines.push(format!("  Kind:       {}", device.kind));
                lines.push(format!(
                    "  MAC:        {}",
                    device.mac.as_deref().unwrap_or("unknown")
                ));
                lines.push(format!(
                    "  Last used:  {}",
                    stored
                        .saved_at
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                ));
                if let Some(reachable) = status.device_reachable {
                    lines.push(format!("  Reachable:  {}", Self::yes_no(reachable)));
                }
            }
            None => lines.push(format!("Device: {}", "none".dimmed())),
        }

        lines.push(format!("IR bridge: {}", status.bridge_address));
        lines.push(format!("  Online:     {}", Self::yes_no(status.bridge_online)));

        lines.join("\n")
    }

    fn format_config(&self, config: &RemoteConfig, path: &str) -> String {
        let prefixes = if config.fallback_prefixes.is_empty() {
            "none".dimmed().to_string()
        } else {
            config.fallback_prefixes.join(", ")
        };

        [
            format!("Config: {}", path.dimmed()),
            format!("  Bridge:             {}", config.bridge_address),
            format!("  Fallback subnets:   {}", prefixes),
            format!("  Discovery timeout:  {} ms", config.discovery_timeout_ms),
            format!("  Probe timeout:      {} ms", config.probe_timeout_ms),
            format!("  Probe concurrency:  {}", config.probe_concurrency),
            format!("  Heartbeat port:     {}", config.heartbeat_port),
            format!("  TV port:            {}", config.tv_port),
        ]
        .join("\n")
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}
