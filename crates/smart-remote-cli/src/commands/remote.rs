//! Key and launch commands against the last connected device.

use std::time::Duration;

use smart_remote_core::RemoteSession;
use tracing::debug;

use crate::cli::{KeyArgs, LaunchArgs};
use crate::context::Context;
use crate::error::CliError;
use crate::output::get_formatter;

/// Session with the stored device's controller installed.
///
/// An unreachable device is still installed so commands can fall back to
/// the IR bridge.
pub(crate) async fn restored_session(ctx: &Context) -> Result<(RemoteSession, String), CliError> {
    let session = ctx.session()?;
    let reachable = session.restore().await;
    debug!("Stored device reachable: {}", reachable);

    let target = session
        .current_device()
        .await
        .map(|d| d.name)
        .unwrap_or_else(|| "no device".to_string());
    Ok((session, target))
}

/// Run the key command
pub async fn run_key(args: KeyArgs, ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let (session, target) = restored_session(ctx).await?;

    let mut failed = Vec::new();
    for (i, key) in args.keys.iter().enumerate() {
        if i > 0 && args.delay > 0 {
            tokio::time::sleep(Duration::from_millis(args.delay)).await;
        }

        let ok = session.send_key(key).await;
        println!("{}", formatter.format_action(&format!("key {}", key), &target, ok));
        if !ok {
            failed.push(key.as_str());
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::CommandFailed(format!("key {}", failed.join(", "))))
    }
}

/// Run the launch command
pub async fn run_launch(args: LaunchArgs, ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let (session, target) = restored_session(ctx).await?;

    if session.current_device().await.is_none() {
        return Err(CliError::NoDevice);
    }

    let ok = session.launch_app(&args.app_id).await;
    println!(
        "{}",
        formatter.format_action(&format!("launch {}", args.app_id), &target, ok)
    );

    if ok {
        Ok(())
    } else {
        Err(CliError::CommandFailed(format!("launch {}", args.app_id)))
    }
}
