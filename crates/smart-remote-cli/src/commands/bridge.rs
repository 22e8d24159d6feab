//! IR bridge commands.

use super::spinner;
use crate::cli::{BridgeArgs, BridgeCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the bridge command
pub async fn run_bridge(args: BridgeArgs, ctx: &Context) -> Result<(), CliError> {
    match args.command {
        BridgeCommands::Locate { save } => run_locate(save, ctx).await,
        BridgeCommands::Test { address } => run_test(address, ctx).await,
    }
}

async fn run_locate(save: bool, ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let session = ctx.session()?;

    let pb = spinner("Looking for the IR bridge...", ctx.json);
    let located = session.locate_bridge().await;
    pb.finish_and_clear();

    let Some(address) = located else {
        println!("{}", formatter.format_action("locate bridge", "-", false));
        return Err(CliError::NoDevicesFound);
    };
    println!("{}", formatter.format_action("locate bridge", &address, true));

    if save && address != ctx.config.bridge_address {
        ctx.storage
            .update(|config| config.bridge_address = address.clone())
            .await?;
        println!(
            "{}",
            formatter.format_message(&format!("Saved bridge address {}", address))
        );
    }

    Ok(())
}

async fn run_test(address: Option<String>, ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let session = ctx.session()?;
    let address = address.unwrap_or_else(|| ctx.config.bridge_address.clone());

    let ok = session.test_bridge(&address).await;
    println!("{}", formatter.format_action("bridge heartbeat", &address, ok));

    if ok {
        Ok(())
    } else {
        Err(CliError::CommandFailed(format!("heartbeat to {}", address)))
    }
}
