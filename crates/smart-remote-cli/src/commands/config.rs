//! Config command implementation.

use smart_remote_core::discovery::SubnetPrefix;

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the config command
pub async fn run_config(args: ConfigArgs, ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let path = ctx.storage.path().display().to_string();

    let config = match args.command {
        ConfigCommands::Show => {
            println!("{}", formatter.format_config(&ctx.config, &path));
            return Ok(());
        }
        ConfigCommands::SetBridge { address } => {
            let address = address.trim().to_string();
            if address.is_empty() {
                return Err(CliError::InvalidArgument(
                    "bridge address must not be empty".to_string(),
                ));
            }
            ctx.storage
                .update(|config| config.bridge_address = address)
                .await?
        }
        ConfigCommands::AddSubnet { prefix } => {
            let prefix = prefix
                .parse::<SubnetPrefix>()
                .map_err(|e| CliError::InvalidArgument(e.to_string()))?
                .to_string();
            ctx.storage
                .update(|config| {
                    if !config.fallback_prefixes.contains(&prefix) {
                        config.fallback_prefixes.push(prefix);
                    }
                })
                .await?
        }
        ConfigCommands::ClearSubnets => {
            ctx.storage
                .update(|config| config.fallback_prefixes.clear())
                .await?
        }
    };

    println!("{}", formatter.format_config(&config, &path));
    Ok(())
}
