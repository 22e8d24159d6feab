//! Power commands.

use super::remote::restored_session;
use crate::context::Context;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the power-on command
pub async fn run_power_on(ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let (session, target) = restored_session(ctx).await?;

    let ok = session.power_on().await;
    println!("{}", formatter.format_action("power on", &target, ok));

    if ok {
        Ok(())
    } else {
        Err(CliError::CommandFailed("power on".to_string()))
    }
}

/// Run the power-off command
pub async fn run_power_off(ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let (session, target) = restored_session(ctx).await?;

    if session.current_device().await.is_none() {
        return Err(CliError::NoDevice);
    }

    let ok = session.power_off().await;
    println!("{}", formatter.format_action("power off", &target, ok));

    if ok {
        Ok(())
    } else {
        Err(CliError::CommandFailed("power off".to_string()))
    }
}
