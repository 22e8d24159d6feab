//! Status command implementation.

use std::time::Duration;

use smart_remote_core::device::IrBridgeController;
use smart_remote_core::network::check_reachability;
use smart_remote_core::storage::{DeviceStore, JsonDeviceStore};
use smart_remote_core::DeviceKind;
use tracing::warn;

use crate::context::Context;
use crate::error::CliError;
use crate::output::{get_formatter, StatusReport};

const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(1);

/// Run the status command
pub async fn run_status(ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let session = ctx.session()?;
    let network = session.network_status();

    let store = JsonDeviceStore::new(ctx.data_dir.clone())?;
    let last_device = match store.load().await {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Failed to read last device: {}", e);
            None
        }
    };

    let device_reachable = match &last_device {
        Some(stored) if stored.device.kind == DeviceKind::NetworkTv => Some(
            check_reachability(stored.device.ip, ctx.config.tv_port, REACHABILITY_TIMEOUT).await,
        ),
        _ => None,
    };

    let bridge = IrBridgeController::new(ctx.config.bridge_address.clone())?;
    let bridge_online = bridge.ping().await.is_ok();

    let report = StatusReport {
        network,
        last_device,
        device_reachable,
        bridge_address: ctx.config.bridge_address.clone(),
        bridge_online,
    };
    println!("{}", formatter.format_status(&report));

    Ok(())
}
