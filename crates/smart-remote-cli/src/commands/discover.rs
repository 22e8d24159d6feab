//! Discover command implementation.

use smart_remote_core::DeviceKind;

use super::spinner;
use crate::cli::DiscoverArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the discover command
pub async fn run_discover(args: DiscoverArgs, ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let session = ctx.session()?;

    if !session.network_status().is_connected() {
        return Err(CliError::Offline);
    }

    let pb = spinner(
        format!(
            "Searching for TVs ({} ms) and IR bridges...",
            ctx.config.discovery_timeout_ms
        ),
        ctx.json,
    );
    let report = session.scan().await;
    pb.finish_and_clear();

    let devices = report.devices();
    println!("{}", formatter.format_devices(&devices));

    if devices.is_empty() {
        return Err(CliError::NoDevicesFound);
    }

    if args.connect {
        let Some(tv) = devices.iter().find(|d| d.kind != DeviceKind::InfraredBridge) else {
            return Err(CliError::NoDevicesFound);
        };
        let ok = session.connect(tv).await;
        println!("{}", formatter.format_action("connect", &tv.name, ok));
        if !ok {
            return Err(CliError::CommandFailed(format!("connect to {}", tv.ip)));
        }
    }

    Ok(())
}
